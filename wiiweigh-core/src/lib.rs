#![cfg_attr(not(test), no_std)]
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

//! Capture and estimation core for four-sensor balance boards.
//!
//! Board events are reassembled into composite samples by [`quad::SensorQuad`], filtered into a
//! bounded buffer by [`session::SessionFilter`] and reduced to a single value by
//! [`median::median`].

pub mod capture;
pub mod event;
pub mod median;
pub mod quad;
pub mod select;
pub mod session;

use embedded_hal::delay::DelayNs;

pub use capture::{capture, BoardEventSource, CaptureError, CaptureSession, SourceRead};
pub use event::{Axis, BoardEvent};
pub use median::{median, WeightDisplay};
pub use session::{SessionFilter, SessionState};

/// Raw board unit, one hundredth of the displayed weight unit.
pub type Centigrams = i32;

/// Maximum number of samples kept for a single capture.
pub const SAMPLE_CAPACITY: usize = 200;

/// Accepted samples of one capture, in order of acceptance.
pub type SampleBuffer = heapless::Vec<Centigrams, SAMPLE_CAPACITY>;

/// 20kg
pub const DEFAULT_OCCUPANCY_THRESHOLD: Centigrams = 2000;

const DEFAULT_POLL_INTERVAL_MS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Composite samples below this value are treated as an empty board.
    pub threshold: Centigrams,
    /// Sleep between reads while the source has nothing to deliver.
    pub poll_interval_ms: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_OCCUPANCY_THRESHOLD,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl CaptureConfig {
    pub fn with_threshold(threshold: Centigrams) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Runs one capture against `source` and returns the median of the accepted samples.
pub fn weigh<S, D>(
    source: &mut S,
    delay: &mut D,
    config: &CaptureConfig,
) -> Result<Centigrams, CaptureError>
where
    S: BoardEventSource,
    D: DelayNs,
{
    let mut samples = capture(source, delay, config)?;
    log::debug!("Estimating from {} samples", samples.len());
    Ok(median(&mut samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::tests::{sample_events, ScriptedSource, CountingDelay};

    #[test]
    fn weighs_example_session() {
        let mut events = Vec::new();
        for sample in [50, 6300, 6250, 6280, 40] {
            events.extend(sample_events(sample));
        }
        let mut source = ScriptedSource::new(events);
        let mut delay = CountingDelay::default();

        let weight = weigh(&mut source, &mut delay, &CaptureConfig::with_threshold(1000)).unwrap();

        assert_eq!(weight, 6280);
        assert_eq!(WeightDisplay::new(weight, 0.0).to_string(), "62.80");
    }

    #[test]
    fn default_config_uses_twenty_kilo_threshold() {
        let config = CaptureConfig::default();
        assert_eq!(config.threshold, 2000);
        assert_eq!(config.poll_interval_ms, 1);
    }
}
