//! # ROTARY Clock
//!
//! Draws the rotary clock in the terminal.
//!
//! ```bash
//! # Defaults, or ./rotary_clock.toml if present
//! ./rotary_clock
//!
//! # Explicit config
//! ./rotary_clock my_clock.toml
//!
//! # More log output (stderr)
//! RUST_LOG=rotary_ui=debug ./rotary_clock 2> clock.log
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use rotary::{logging, ClockConfig, HostSurface, TerminalCanvas};

fn main() -> ExitCode {
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    // Logging is configured from the file, so config errors go straight to stderr.
    let config = match ClockConfig::load(path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("rotary_clock: {err}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.log.level);
    tracing::info!(
        size = config.clock.size,
        frame_rate = config.host.frame_rate,
        "starting rotary clock"
    );

    let mut host = HostSurface::new(&config);
    host.start(Instant::now());

    let stdout = std::io::stdout();
    let mut canvas = TerminalCanvas::new(stdout.lock(), &config.host);

    match host.run(&mut canvas, config.host.run_for()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, frames = host.frames(), "rotary clock failed");
            ExitCode::FAILURE
        }
    }
}
