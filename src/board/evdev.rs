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

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Error as IoError, ErrorKind, Read, Result as IoResult};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use wiiweigh_core::{BoardEvent, BoardEventSource, SourceRead};

/// `struct input_event` is a `struct timeval` followed by type, code and value.
const TIMESTAMP_BYTES: usize = size_of::<libc::timeval>();
pub(crate) const INPUT_EVENT_BYTES: usize = size_of::<libc::input_event>();

#[derive(Debug)]
pub enum EvdevError {
    Io(IoError),
    /// The kernel always hands out whole events, anything else means the node is not evdev.
    ShortRead(usize),
}

impl fmt::Display for EvdevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvdevError::Io(e) => write!(f, "input device read failed: {}", e),
            EvdevError::ShortRead(n) => write!(f, "short read of {} bytes from input device", n),
        }
    }
}

impl std::error::Error for EvdevError {}

impl From<IoError> for EvdevError {
    fn from(err: IoError) -> Self {
        EvdevError::Io(err)
    }
}

/// Balance board read through its `/dev/input/eventN` node.
pub struct EvdevBoard {
    device: File,
    path: PathBuf,
}

impl EvdevBoard {
    pub fn open(path: &Path) -> IoResult<Self> {
        let device = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;
        log::debug!("Opened {}", path.display());

        Ok(Self {
            device,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Splits a native-endian `struct input_event` into `(type, code, value)`.
pub(crate) fn decode_input_event(raw: &[u8; INPUT_EVENT_BYTES]) -> (u16, u16, i32) {
    let body = &raw[TIMESTAMP_BYTES..];
    let event_type = u16::from_ne_bytes([body[0], body[1]]);
    let code = u16::from_ne_bytes([body[2], body[3]]);
    let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);
    (event_type, code, value)
}

impl BoardEventSource for EvdevBoard {
    type Error = EvdevError;

    fn read_event(&mut self) -> Result<SourceRead, Self::Error> {
        let mut raw = [0u8; INPUT_EVENT_BYTES];
        loop {
            match self.device.read(&mut raw) {
                Ok(0) => return Ok(SourceRead::EndOfStream),
                Ok(INPUT_EVENT_BYTES) => {
                    let (event_type, code, value) = decode_input_event(&raw);
                    log::trace!("type {:#x} code {:#x} value {}", event_type, code, value);
                    if let Some(event) = BoardEvent::from_input(event_type, code, value) {
                        return Ok(SourceRead::Event(event));
                    }
                }
                Ok(n) => return Err(EvdevError::ShortRead(n)),
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(SourceRead::WouldBlock),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiiweigh_core::event::{ABS_HAT0X, ABS_HAT1X, BTN_A, EV_ABS, EV_KEY, EV_SYN, SYN_REPORT};
    use wiiweigh_core::Axis;

    const EV_MSC: u16 = 0x04;

    fn encode_input_event(event_type: u16, code: u16, value: i32) -> [u8; INPUT_EVENT_BYTES] {
        let mut raw = [0u8; INPUT_EVENT_BYTES];
        raw[TIMESTAMP_BYTES..TIMESTAMP_BYTES + 2].copy_from_slice(&event_type.to_ne_bytes());
        raw[TIMESTAMP_BYTES + 2..TIMESTAMP_BYTES + 4].copy_from_slice(&code.to_ne_bytes());
        raw[TIMESTAMP_BYTES + 4..TIMESTAMP_BYTES + 8].copy_from_slice(&value.to_ne_bytes());
        raw
    }

    fn board_from(records: &[[u8; INPUT_EVENT_BYTES]], trailing: &[u8]) -> (tempfile::NamedTempFile, EvdevBoard) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for record in records {
            file.write_all(record).unwrap();
        }
        file.write_all(trailing).unwrap();
        file.flush().unwrap();
        let board = EvdevBoard::open(file.path()).unwrap();
        (file, board)
    }

    #[test]
    fn decodes_event_fields() {
        let raw = encode_input_event(EV_ABS, ABS_HAT0X, -1234);
        assert_eq!(decode_input_event(&raw), (EV_ABS, ABS_HAT0X, -1234));
    }

    #[test]
    fn reads_board_events_and_skips_others() {
        let records = [
            encode_input_event(EV_ABS, ABS_HAT1X, 1500),
            encode_input_event(EV_MSC, 0, 7),
            encode_input_event(EV_SYN, SYN_REPORT, 0),
            encode_input_event(EV_KEY, BTN_A, 1),
        ];
        let (_file, mut board) = board_from(&records, &[]);

        assert_eq!(
            board.read_event().unwrap(),
            SourceRead::Event(BoardEvent::AxisUpdate(Axis::FrontLeft, 1500))
        );
        assert_eq!(board.read_event().unwrap(), SourceRead::Event(BoardEvent::Sync));
        assert_eq!(board.read_event().unwrap(), SourceRead::Event(BoardEvent::Cancel));
        assert_eq!(board.read_event().unwrap(), SourceRead::EndOfStream);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let (_file, mut board) = board_from(&[], &[0u8; 5]);
        let err = board.read_event().unwrap_err();
        assert!(matches!(err, EvdevError::ShortRead(5)));
        assert_eq!(err.to_string(), "short read of 5 bytes from input device");
    }

    #[test]
    fn missing_device_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EvdevBoard::open(&dir.path().join("event99")).is_err());
    }
}
