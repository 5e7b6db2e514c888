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

mod board;
mod report;
mod util;

use board::discovery;
use board::evdev::EvdevBoard;
use board::simulated::SimulatedBoard;
use report::Reporter;
use std::io::{Result as IoResult, Write};
use util::{CliConfig, ThreadDelay};
use wiiweigh_core::{CaptureConfig, CaptureError, Centigrams, WeightDisplay};

fn main() -> IoResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if util::is_help_requested(&args) {
        println!("{}", util::USAGE);
        return Ok(());
    }

    let config = match util::parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", util::USAGE);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level)
        .format_timestamp_millis()
        .init();

    log::debug!("Configuration: {:?}", config);

    let mut reporter = Reporter::new(std::io::stdout(), config.terse);
    let capture_config = CaptureConfig::with_threshold(config.threshold);

    let outcome = if config.simulate {
        weigh_simulated(&mut reporter, &config, &capture_config)?
    } else {
        weigh_on_board(&mut reporter, &config, &capture_config)?
    };

    match outcome {
        Ok(median) => {
            log::info!("Median of capture: {}", median);
            reporter.result(&WeightDisplay::new(median, config.adjust))
        }
        Err(e) => {
            log::debug!("Capture failed: {:?}", e);
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn weigh_on_board<W: Write>(
    reporter: &mut Reporter<W>,
    config: &CliConfig,
    capture_config: &CaptureConfig,
) -> IoResult<Result<Centigrams, CaptureError>> {
    let path = match &config.device {
        Some(path) => path.clone(),
        None => {
            reporter.status("Waiting for balance board...")?;
            discovery::wait_for_board()
        }
    };

    reporter.board_ready()?;

    let mut board = EvdevBoard::open(&path)?;
    log::info!("Reading weight from {}", board.path().display());
    Ok(wiiweigh_core::weigh(&mut board, &mut ThreadDelay, capture_config))
}

fn weigh_simulated<W: Write>(
    reporter: &mut Reporter<W>,
    config: &CliConfig,
    capture_config: &CaptureConfig,
) -> IoResult<Result<Centigrams, CaptureError>> {
    reporter.status("SIMULATOR: pretending balance board found.")?;
    reporter.board_ready()?;

    let mut board = match config.seed {
        Some(seed) => SimulatedBoard::seeded(seed),
        None => SimulatedBoard::new(),
    };
    Ok(wiiweigh_core::weigh(&mut board, &mut ThreadDelay, capture_config))
}
