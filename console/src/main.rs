//! RBMK reactor simulator — terminal driver.
//!
//! This is the thin driver spec.md keeps out of the core's detailed
//! design: it owns the single [`Reactor`], paces it at a fixed `dt`,
//! reads command lines from stdin, and renders a text dashboard. None of
//! the reactor physics lives here.

mod dashboard;

use std::time::Duration;

use anyhow::Result;
use rbmk_reactor::{constants::DEFAULT_DT, Reactor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

fn parse_args() -> f64 {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--dt" {
            if let Some(value) = args.next() {
                if let Ok(dt) = value.parse::<f64>() {
                    return dt;
                }
                log::warn!("ignoring unparseable --dt value {value:?}");
            }
        }
    }
    DEFAULT_DT
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let dt = parse_args();
    log::info!("starting RBMK reactor simulator, dt={dt}s");

    let mut reactor = Reactor::new();
    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(dt));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_command_error: Option<String> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                reactor.step(dt);
                let snapshot = reactor.telemetry_snapshot();
                if snapshot.telemetry_time == 0.0 {
                    log::trace!(
                        "telemetry: {}",
                        serde_json::to_string(&snapshot).unwrap_or_default()
                    );
                }
                dashboard::render(&reactor, last_command_error.as_deref());
            }
            line = stdin_lines.next_line() => {
                let Some(line) = line? else {
                    log::info!("stdin closed, shutting down");
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match rbmk_reactor::parse_command(line) {
                    Ok(rbmk_reactor::Command::Exit) => {
                        log::info!("exit requested");
                        break;
                    }
                    Ok(command) => match rbmk_reactor::apply_command(&mut reactor, &command) {
                        Ok(()) => {
                            log::debug!("accepted command: {line}");
                            last_command_error = None;
                        }
                        Err(err) => {
                            log::debug!("rejected command {line:?}: {err}");
                            last_command_error = Some(err.to_string());
                        }
                    },
                    Err(err) => {
                        log::debug!("command parse error for {line:?}: {err}");
                        last_command_error = Some(err.to_string());
                    }
                }
            }
        }
    }

    Ok(())
}
