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

use std::io::{Result as IoResult, Write};
use wiiweigh_core::WeightDisplay;

const BELL: char = '\x07';

/// User facing output. In terse mode only the weight itself is printed.
pub(crate) struct Reporter<W: Write> {
    out: W,
    terse: bool,
}

impl<W: Write> Reporter<W> {
    pub(crate) fn new(out: W, terse: bool) -> Self {
        Self { out, terse }
    }

    pub(crate) fn status(&mut self, message: &str) -> IoResult<()> {
        if self.terse {
            return Ok(());
        }
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    pub(crate) fn board_ready(&mut self) -> IoResult<()> {
        self.status(&format!("{}Balance board found, please step on.", BELL))
    }

    pub(crate) fn result(&mut self, weight: &WeightDisplay) -> IoResult<()> {
        if self.terse {
            writeln!(self.out, "{}", weight)?;
        } else {
            writeln!(self.out, "{}Done, weight: {}kg.", BELL, weight)?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(terse: bool, report: impl FnOnce(&mut Reporter<&mut Vec<u8>>) -> IoResult<()>) -> String {
        let mut out = Vec::new();
        let mut reporter = Reporter::new(&mut out, terse);
        report(&mut reporter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn verbose_output() {
        let text = output(false, |r| {
            r.status("Waiting for balance board...")?;
            r.board_ready()?;
            r.result(&WeightDisplay::new(6280, 0.0))
        });
        assert_eq!(
            text,
            "Waiting for balance board...\n\x07Balance board found, please step on.\n\x07Done, weight: 62.80kg.\n"
        );
    }

    #[test]
    fn terse_output_is_only_the_weight() {
        let text = output(true, |r| {
            r.status("Waiting for balance board...")?;
            r.board_ready()?;
            r.result(&WeightDisplay::new(7512, 0.5))
        });
        assert_eq!(text, "75.62\n");
    }
}
