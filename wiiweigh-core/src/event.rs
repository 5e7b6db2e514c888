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

use crate::Centigrams;
use strum::{EnumCount, EnumIter};

// Linux input event types and codes used by the balance board driver
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0x00;
pub const BTN_A: u16 = 0x130;

pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;
pub const ABS_HAT1X: u16 = 0x12;
pub const ABS_HAT1Y: u16 = 0x13;

/// One of the four load sensors under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount, EnumIter)]
pub enum Axis {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl Axis {
    pub fn from_abs_code(code: u16) -> Option<Self> {
        match code {
            ABS_HAT1X => Some(Axis::FrontLeft),
            ABS_HAT0X => Some(Axis::FrontRight),
            ABS_HAT0Y => Some(Axis::BackLeft),
            ABS_HAT1Y => Some(Axis::BackRight),
            _ => None,
        }
    }

    pub fn abs_code(self) -> u16 {
        match self {
            Axis::FrontLeft => ABS_HAT1X,
            Axis::FrontRight => ABS_HAT0X,
            Axis::BackLeft => ABS_HAT0Y,
            Axis::BackRight => ABS_HAT1Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    AxisUpdate(Axis, Centigrams),
    Sync,
    Cancel,
}

impl BoardEvent {
    /// Maps a raw `(type, code, value)` input event. Events the board does not care about
    /// give `None`.
    pub fn from_input(event_type: u16, code: u16, value: i32) -> Option<Self> {
        match (event_type, code) {
            (EV_ABS, code) => Axis::from_abs_code(code).map(|axis| BoardEvent::AxisUpdate(axis, value)),
            (EV_SYN, SYN_REPORT) => Some(BoardEvent::Sync),
            // press and release both abort
            (EV_KEY, BTN_A) => Some(BoardEvent::Cancel),
            _ => None,
        }
    }
}
