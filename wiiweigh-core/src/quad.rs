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

use crate::event::Axis;
use crate::Centigrams;
use strum::EnumCount;

const SENSORS: usize = Axis::COUNT;

/// Latest reading of each sensor within the current report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorQuad {
    slots: [Option<Centigrams>; SENSORS],
}

impl SensorQuad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, axis: Axis, value: Centigrams) {
        self.slots[axis as usize] = Some(value);
    }

    pub fn reading(&self, axis: Axis) -> Option<Centigrams> {
        self.slots[axis as usize]
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Closes the current report. Returns the composite sample if every sensor reported, and
    /// always clears the quad for the next report.
    pub fn sync(&mut self) -> Option<Centigrams> {
        let composite = if self.is_complete() {
            Some(
                self.slots
                    .iter()
                    .flatten()
                    .fold(0 as Centigrams, |sum, v| sum.saturating_add(*v)),
            )
        } else {
            log::trace!("Dropping incomplete report {:?}", self.slots);
            None
        };
        self.slots = [None; SENSORS];
        composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(quad: &mut SensorQuad, values: [Centigrams; 4]) {
        quad.update(Axis::FrontLeft, values[0]);
        quad.update(Axis::FrontRight, values[1]);
        quad.update(Axis::BackLeft, values[2]);
        quad.update(Axis::BackRight, values[3]);
    }

    #[test]
    fn complete_report_sums_all_sensors() {
        let mut quad = SensorQuad::new();
        fill(&mut quad, [1500, 1600, 1550, 1650]);
        assert!(quad.is_complete());
        assert_eq!(quad.sync(), Some(6300));
    }

    #[test]
    fn later_update_overwrites() {
        let mut quad = SensorQuad::new();
        fill(&mut quad, [1, 1, 1, 1]);
        quad.update(Axis::BackLeft, 10);
        assert_eq!(quad.reading(Axis::BackLeft), Some(10));
        assert_eq!(quad.sync(), Some(13));
    }

    #[test]
    fn incomplete_report_is_dropped_and_reset() {
        let mut quad = SensorQuad::new();
        quad.update(Axis::FrontLeft, 100);
        quad.update(Axis::FrontRight, 100);
        quad.update(Axis::BackLeft, 100);
        assert_eq!(quad.sync(), None);

        // the three earlier values must not carry over
        quad.update(Axis::BackRight, 100);
        assert!(!quad.is_complete());
        assert_eq!(quad.sync(), None);
    }

    #[test]
    fn reset_after_complete_report() {
        let mut quad = SensorQuad::new();
        fill(&mut quad, [5, 5, 5, 5]);
        assert_eq!(quad.sync(), Some(20));
        assert_eq!(quad, SensorQuad::new());
        assert_eq!(quad.sync(), None);
    }

    #[test]
    fn zero_and_negative_readings_count_as_set() {
        let mut quad = SensorQuad::new();
        fill(&mut quad, [0, -3, 0, 2]);
        assert_eq!(quad.sync(), Some(-1));
    }

    #[test]
    fn sum_saturates() {
        let mut quad = SensorQuad::new();
        fill(&mut quad, [i32::MAX, 1, 1, 1]);
        assert_eq!(quad.sync(), Some(i32::MAX));
    }
}
