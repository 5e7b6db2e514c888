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

use crate::{Centigrams, SampleBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOccupancy,
    Capturing,
    Done,
}

/// Keeps the contiguous run of samples taken while the board is occupied.
///
/// Samples below the threshold before anyone steps on are dropped. The first sample below the
/// threshold after that ends the session and is not kept, nor is anything after a full buffer.
#[derive(Debug)]
pub struct SessionFilter {
    state: SessionState,
    threshold: Centigrams,
    samples: SampleBuffer,
}

impl SessionFilter {
    pub fn new(threshold: Centigrams) -> Self {
        Self {
            state: SessionState::AwaitingOccupancy,
            threshold,
            samples: SampleBuffer::new(),
        }
    }

    pub fn offer(&mut self, sample: Centigrams) -> SessionState {
        let occupied = sample >= self.threshold;

        match self.state {
            SessionState::AwaitingOccupancy if occupied => {
                log::debug!("Board occupied, first sample {}", sample);
                self.accept(sample);
                if self.state == SessionState::AwaitingOccupancy {
                    self.state = SessionState::Capturing;
                }
            }
            SessionState::AwaitingOccupancy => {
                log::trace!("Discarding {} while board is empty", sample);
            }
            SessionState::Capturing if occupied => {
                self.accept(sample);
            }
            SessionState::Capturing => {
                log::debug!(
                    "Board vacated ({} < {}), {} samples kept",
                    sample,
                    self.threshold,
                    self.samples.len()
                );
                self.state = SessionState::Done;
            }
            SessionState::Done => {}
        }

        self.state
    }

    fn accept(&mut self, sample: Centigrams) {
        log::trace!("Sample {} = {}", self.samples.len(), sample);
        if self.samples.push(sample).is_err() || self.samples.is_full() {
            log::debug!("Sample buffer full");
            self.state = SessionState::Done;
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    pub fn samples(&self) -> &[Centigrams] {
        &self.samples
    }

    pub fn into_samples(self) -> SampleBuffer {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_CAPACITY;

    const THRESHOLD: Centigrams = 1000;

    fn run(samples: &[Centigrams]) -> SessionFilter {
        let mut filter = SessionFilter::new(THRESHOLD);
        for sample in samples {
            filter.offer(*sample);
        }
        filter
    }

    #[test]
    fn keeps_only_occupied_run() {
        let filter = run(&[10, 20, 5000, 5100, 5050, 30]);
        assert_eq!(filter.state(), SessionState::Done);
        assert_eq!(filter.samples(), &[5000, 5100, 5050]);
    }

    #[test]
    fn ignores_samples_after_done() {
        let filter = run(&[5000, 30, 5000, 5000]);
        assert!(filter.is_done());
        assert_eq!(filter.samples(), &[5000]);
    }

    #[test]
    fn never_occupied() {
        let filter = run(&[0, 999, 500, -20, 999]);
        assert_eq!(filter.state(), SessionState::AwaitingOccupancy);
        assert!(filter.samples().is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut filter = SessionFilter::new(THRESHOLD);
        assert_eq!(filter.offer(THRESHOLD), SessionState::Capturing);
        assert_eq!(filter.offer(THRESHOLD - 1), SessionState::Done);
        assert_eq!(filter.samples(), &[THRESHOLD]);
    }

    #[test]
    fn stops_at_capacity() {
        let mut filter = SessionFilter::new(THRESHOLD);
        for i in 0..SAMPLE_CAPACITY {
            let state = filter.offer(2000 + i as Centigrams);
            if i + 1 < SAMPLE_CAPACITY {
                assert_eq!(state, SessionState::Capturing);
            } else {
                assert_eq!(state, SessionState::Done);
            }
        }

        // still above the threshold, but there is no room
        assert_eq!(filter.offer(9000), SessionState::Done);
        assert_eq!(filter.samples().len(), SAMPLE_CAPACITY);
        assert_eq!(filter.samples().last(), Some(&(2000 + SAMPLE_CAPACITY as Centigrams - 1)));
    }

    #[test]
    fn long_stream_stays_bounded() {
        let mut filter = SessionFilter::new(THRESHOLD);
        for _ in 0..5 * SAMPLE_CAPACITY {
            filter.offer(6000);
            assert!(filter.samples().len() <= SAMPLE_CAPACITY);
        }
        assert_eq!(filter.into_samples().len(), SAMPLE_CAPACITY);
    }
}
