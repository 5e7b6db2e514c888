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

use crate::select::select_nth;
use crate::Centigrams;
use core::fmt;

/// Median of `samples`. For an even count the two central values are averaged, rounding down.
///
/// Only one selection pass is made: once the upper median sits at `len / 2`, the lower median
/// is the largest value to its left.
///
/// # Panics
///
/// If `samples` is empty.
pub fn median(samples: &mut [Centigrams]) -> Centigrams {
    assert!(!samples.is_empty(), "median of an empty sample set");

    let middle = samples.len() / 2;
    let upper = select_nth(samples, middle);
    if samples.len() % 2 == 1 {
        return upper;
    }

    let lower = samples[..middle].iter().copied().max().unwrap_or(upper);
    ((lower as i64 + upper as i64) >> 1) as Centigrams
}

/// Formats a median in display units, two decimal places, shifted by a user adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightDisplay {
    centigrams: Centigrams,
    adjust: f64,
}

impl WeightDisplay {
    pub fn new(centigrams: Centigrams, adjust: f64) -> Self {
        Self { centigrams, adjust }
    }

    pub fn value(&self) -> f64 {
        self.adjust + self.centigrams as f64 / 100.0
    }
}

impl fmt::Display for WeightDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}
