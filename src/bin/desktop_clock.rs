//! Terminal digital clock.
//!
//! The composition root for desktop: it builds the controller around the
//! system clock and a terminal line, runs it on tokio, and turns stdin lines
//! into host events:
//!
//! ```text
//! hide | show                      - report a visibility transition
//! start | stop | restart | render  - control the clock
//! quit                             - exit (Ctrl+C works too)
//! ```
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin desktop_clock --features runtime
//! RUST_LOG=debug cargo run --bin desktop_clock --features runtime
//! ```

use anyhow::Context;
use env_logger::Env;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

use rs_digiclock::hal::{LocalClock, TerminalDocument};
use rs_digiclock::services::{log_builder, ClockHandle, ClockService, VisibilityPublisher};
use rs_digiclock::{ClockCommand, Config, Visibility};

fn main() -> anyhow::Result<()> {
    // Central configuration - modify this for your setup
    let config = Config::default();

    log_builder(&config.log, Env::default()).init();

    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    rt.block_on(async {
        println!("=================================");
        println!("  rs-digiclock");
        println!("=================================");
        println!();
        println!("Commands: hide, show, start, stop, restart, render, quit");
        println!();

        let mut document = TerminalDocument::new().with_element(config.clock.display_id.as_str());
        let service = ClockService::new(&config.clock, &mut document, LocalClock::new());

        let visibility = VisibilityPublisher::new();
        let subscription = visibility.subscribe();
        let (quit_tx, quit_rx) = oneshot::channel();

        spawn_stdin_reader(service.handle(), visibility, quit_tx);

        let shutdown = async {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!("ctrl-c handler failed: {}", e);
                    }
                }
                Ok(()) = quit_rx => {}
            }
        };

        let controller = service.run(subscription, shutdown).await;
        println!();
        info!("final state: {:?}", controller.state());
    });

    Ok(())
}

/// Spawn the task turning stdin lines into visibility changes and commands.
///
/// Dropping `quit` without sending leaves the clock running.
fn spawn_stdin_reader(
    handle: ClockHandle,
    visibility: VisibilityPublisher,
    quit: oneshot::Sender<()>,
) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("stdin read failed: {}", e);
                    break;
                }
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
                let _ = quit.send(());
                return;
            }

            if let Some(v) = Visibility::from_text(input) {
                visibility.publish(v);
            } else if let Some(cmd) = ClockCommand::from_text(input) {
                if !handle.send(cmd) {
                    break;
                }
            } else {
                warn!("unknown command '{}'", input);
            }
        }
        // stdin closed: keep ticking until Ctrl+C
    });
}
