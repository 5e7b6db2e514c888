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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::ops::Range;
use wiiweigh_core::{Axis, BoardEvent, BoardEventSource, Centigrams, SourceRead};

/// Composite weight while the simulated person stands still.
pub const STANDING_RANGE: Range<Centigrams> = 6200..6700;

// report count and weight range of each phase
const STEP_ON: (usize, Range<Centigrams>) = (15, 0..1000);
const STANDING: (usize, Range<Centigrams>) = (150, STANDING_RANGE);
const STEP_OFF: (usize, Range<Centigrams>) = (18, 0..1000);

/// Generates the event stream of someone stepping on and off a board, with the board idling
/// between reports.
pub struct SimulatedBoard {
    rng: StdRng,
    pending: VecDeque<SourceRead>,
    reports_left: VecDeque<Range<Centigrams>>,
}

impl SimulatedBoard {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let reports_left = [STEP_ON, STANDING, STEP_OFF]
            .into_iter()
            .flat_map(|(count, range)| std::iter::repeat_n(range, count))
            .collect();

        Self {
            rng,
            pending: VecDeque::new(),
            reports_left,
        }
    }

    fn queue_report(&mut self, composite: Centigrams) {
        // spread the load unevenly over the sensors
        let front_left = self.rng.gen_range(0..=composite / 2);
        let front_right = self.rng.gen_range(0..=(composite - front_left) / 2);
        let back_left = (composite - front_left - front_right) / 2;
        let back_right = composite - front_left - front_right - back_left;

        for (axis, value) in [
            (Axis::FrontLeft, front_left),
            (Axis::FrontRight, front_right),
            (Axis::BackLeft, back_left),
            (Axis::BackRight, back_right),
        ] {
            self.pending
                .push_back(SourceRead::Event(BoardEvent::AxisUpdate(axis, value)));
        }
        self.pending.push_back(SourceRead::Event(BoardEvent::Sync));
        self.pending.push_back(SourceRead::WouldBlock);
    }
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEventSource for SimulatedBoard {
    type Error = Infallible;

    fn read_event(&mut self) -> Result<SourceRead, Self::Error> {
        if self.pending.is_empty() {
            match self.reports_left.pop_front() {
                Some(range) => {
                    let composite = self.rng.gen_range(range);
                    self.queue_report(composite);
                }
                None => return Ok(SourceRead::EndOfStream),
            }
        }
        Ok(self.pending.pop_front().unwrap_or(SourceRead::EndOfStream))
    }
}
