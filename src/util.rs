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

use embedded_hal::delay::DelayNs;
use log::LevelFilter;
use std::io::{Error as IoError, ErrorKind, Result as IoResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use wiiweigh_core::{Centigrams, DEFAULT_OCCUPANCY_THRESHOLD};

pub(crate) const USAGE: &str = "Usage: wiiweigh [-a ADJUST] [-t THRESHOLD] [-w] [--device PATH] [--simulate [--seed N]] [--log-level LEVEL]

  -a, --adjust ADJUST        added to the displayed weight
  -t, --threshold THRESHOLD  minimum board reading (1/100 kg) counted as occupied
  -w, --terse                print only the weight
      --device PATH          input device to read instead of searching for the board
      --simulate             weigh a simulated person instead of a real board
      --seed N               make the simulated readings repeatable
      --log-level LEVEL      OFF, ERROR, WARN, INFO, DEBUG or TRACE";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CliConfig {
    pub adjust: f64,
    pub terse: bool,
    pub threshold: Centigrams,
    pub device: Option<PathBuf>,
    pub simulate: bool,
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            adjust: 0.0,
            terse: false,
            threshold: DEFAULT_OCCUPANCY_THRESHOLD,
            device: None,
            simulate: false,
            seed: None,
            log_level: LevelFilter::Info,
        }
    }
}

pub(crate) fn is_help_requested(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "-h" || arg == "--help")
}

/// Parses the arguments following the program name.
pub(crate) fn parse_args(args: &[String]) -> IoResult<CliConfig> {
    let mut config = CliConfig::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-a" | "--adjust" => config.adjust = parse_value(arg, args.next())?,
            "-t" | "--threshold" => config.threshold = parse_value(arg, args.next())?,
            "-w" | "--terse" => config.terse = true,
            "--device" => config.device = Some(PathBuf::from(flag_value(arg, args.next())?)),
            "--simulate" => config.simulate = true,
            "--seed" => config.seed = Some(parse_value(arg, args.next())?),
            "--log-level" => config.log_level = parse_log_level(flag_value(arg, args.next())?),
            other => {
                return Err(IoError::new(
                    ErrorKind::InvalidInput,
                    format!("Unknown argument: {}", other),
                ));
            }
        }
    }

    Ok(config)
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> IoResult<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| IoError::new(ErrorKind::InvalidInput, format!("{} needs a value", flag)))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> IoResult<T> {
    let value = flag_value(flag, value)?;
    value.parse().map_err(|_| {
        IoError::new(
            ErrorKind::InvalidInput,
            format!("Invalid value for {}: {}", flag, value),
        )
    })
}

pub(crate) fn parse_log_level(level_str: &str) -> LevelFilter {
    match level_str.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "TRACE" => LevelFilter::Trace,
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        _ => {
            eprintln!("Unknown log level: {}. Using INFO", level_str);
            LevelFilter::Info
        }
    }
}

/// Sleeps the calling thread.
pub(crate) struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}
