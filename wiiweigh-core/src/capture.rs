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

use crate::event::BoardEvent;
use crate::quad::SensorQuad;
use crate::session::{SessionFilter, SessionState};
use crate::{CaptureConfig, SampleBuffer};
use core::fmt::{self, Debug};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The board button was pressed while measuring.
    Cancelled,
    NoDataCollected,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Cancelled => write!(f, "Button pressed, aborting."),
            CaptureError::NoDataCollected => write!(f, "No valid data collected."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRead {
    Event(BoardEvent),
    /// Nothing available yet, try again later.
    WouldBlock,
    EndOfStream,
}

pub trait BoardEventSource {
    type Error: Debug;

    /// Returns the next board event without blocking. Raw events that carry nothing for the
    /// board should be skipped by the implementation.
    fn read_event(&mut self) -> Result<SourceRead, Self::Error>;
}

/// Aggregation and filtering state for one capture.
#[derive(Debug)]
pub struct CaptureSession {
    quad: SensorQuad,
    filter: SessionFilter,
}

impl CaptureSession {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            quad: SensorQuad::new(),
            filter: SessionFilter::new(config.threshold),
        }
    }

    pub fn handle_event(&mut self, event: BoardEvent) -> Result<SessionState, CaptureError> {
        match event {
            BoardEvent::AxisUpdate(axis, value) => self.quad.update(axis, value),
            BoardEvent::Sync => {
                if let Some(sample) = self.quad.sync() {
                    self.filter.offer(sample);
                }
            }
            BoardEvent::Cancel => {
                log::warn!(
                    "Capture cancelled with {} samples taken",
                    self.filter.samples().len()
                );
                return Err(CaptureError::Cancelled);
            }
        }
        Ok(self.filter.state())
    }

    pub fn state(&self) -> SessionState {
        self.filter.state()
    }

    pub fn finish(self) -> Result<SampleBuffer, CaptureError> {
        let samples = self.filter.into_samples();
        if samples.is_empty() {
            return Err(CaptureError::NoDataCollected);
        }
        Ok(samples)
    }
}

/// Reads `source` until the board is vacated, the buffer fills or the source stops, and
/// returns the accepted samples.
///
/// A failing source ends the capture like the end of the stream does, keeping what was
/// collected.
pub fn capture<S, D>(
    source: &mut S,
    delay: &mut D,
    config: &CaptureConfig,
) -> Result<SampleBuffer, CaptureError>
where
    S: BoardEventSource,
    D: DelayNs,
{
    let mut session = CaptureSession::new(config);

    loop {
        match source.read_event() {
            Ok(SourceRead::Event(event)) => {
                if session.handle_event(event)? == SessionState::Done {
                    break;
                }
            }
            Ok(SourceRead::WouldBlock) => delay.delay_ms(config.poll_interval_ms),
            Ok(SourceRead::EndOfStream) => {
                log::debug!("Event source ended in state {:?}", session.state());
                break;
            }
            Err(e) => {
                log::error!("Event source failed: {:?}", e);
                break;
            }
        }
    }

    session.finish()
}
