// Copyright (C) 2025 Paul Hampson
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License version 3 as  published by the
// Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BOARD_NAME: &str = "Nintendo Wii Remote Balance Board";
pub const SYSFS_INPUT_ROOT: &str = "/sys/class/input";
pub const DEV_INPUT_ROOT: &str = "/dev/input";

const MAX_EVENT_NODES: usize = 64;
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Looks for an input node whose device name is the balance board and returns its device path.
pub fn find_board(sysfs_root: &Path, dev_root: &Path) -> Option<PathBuf> {
    (0..MAX_EVENT_NODES)
        .map(|i| format!("event{}", i))
        .find(|node| {
            fs::read_to_string(sysfs_root.join(node).join("device").join("name"))
                .map(|name| name.trim_end() == BOARD_NAME)
                .unwrap_or(false)
        })
        .map(|node| dev_root.join(node))
}

/// Blocks until the board shows up, e.g. after it has been paired.
pub fn wait_for_board() -> PathBuf {
    let sysfs_root = Path::new(SYSFS_INPUT_ROOT);
    let dev_root = Path::new(DEV_INPUT_ROOT);
    loop {
        if let Some(path) = find_board(sysfs_root, dev_root) {
            log::info!("Found balance board at {}", path.display());
            return path;
        }
        log::trace!("No balance board yet");
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_node(sysfs: &Path, node: &str, name: &str) {
        let device = sysfs.join(node).join("device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("name"), format!("{}\n", name)).unwrap();
    }

    #[test]
    fn finds_board_among_other_devices() {
        let sysfs = tempfile::tempdir().unwrap();
        add_node(sysfs.path(), "event0", "AT Translated Set 2 keyboard");
        add_node(sysfs.path(), "event1", "Nintendo Wii Remote");
        add_node(sysfs.path(), "event5", BOARD_NAME);

        assert_eq!(
            find_board(sysfs.path(), Path::new("/dev/input")),
            Some(PathBuf::from("/dev/input/event5"))
        );
    }

    #[test]
    fn no_board() {
        let sysfs = tempfile::tempdir().unwrap();
        add_node(sysfs.path(), "event0", "Power Button");
        assert_eq!(find_board(sysfs.path(), Path::new("/dev/input")), None);
    }

    #[test]
    fn name_must_match_exactly() {
        let sysfs = tempfile::tempdir().unwrap();
        add_node(sysfs.path(), "event2", "Nintendo Wii Remote Balance Board Pro");
        assert_eq!(find_board(sysfs.path(), Path::new("/dev/input")), None);
    }
}
