use crate::core::controller::{ControllerError, PollOutcome, PollingController};
use crate::core::feed_client::RaceFeed;
use crate::interfaces::gui_interface::{Command, DashboardState};
use crate::post::race_summary::RaceSummary;
use crate::pre::read_dashboard_pars::DashboardPars;
use crate::view::display_mapper::map_display;
use anyhow::Context;
use flume::{Receiver, RecvTimeoutError, Sender};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// handle_feed creates a polling controller for the inserted feed and drives it until the race is
/// over (console case) or the GUI quits (GUI case), and returns the summary for post-processing.
///
/// Without a command receiver the race is started right away and followed until polling stops.
/// With a command receiver the loop waits for commands and polls whenever the polling interval
/// elapsed while the race is active. Every state change is published via tx if inserted.
pub fn handle_feed<F: RaceFeed>(
    feed: F,
    dashboard_pars: &DashboardPars,
    poll_interval: f64,
    tx: Option<&Sender<DashboardState>>,
    rx_cmd: Option<&Receiver<Command>>,
) -> anyhow::Result<RaceSummary> {
    // create the controller and load the race information
    let mut controller = PollingController::new(feed, Duration::from_secs_f64(poll_interval));
    controller.load_metadata();
    publish(&controller, tx)?;

    match rx_cmd {
        None => {
            // CONSOLE -----------------------------------------------------------------------------
            let outcome = controller
                .start()
                .context("Failed to start following the race!")?;
            log_outcome(&controller, outcome, dashboard_pars);
            publish(&controller, tx)?;

            while controller.is_active() {
                sleep(controller.poll_interval());

                let outcome = controller.poll();
                log_outcome(&controller, outcome, dashboard_pars);
                publish(&controller, tx)?;
            }
        }
        Some(rx_cmd) => {
            // GUI ---------------------------------------------------------------------------------
            let mut next_poll = Instant::now() + controller.poll_interval();

            loop {
                // wait for a command, but not longer than until the next poll is due
                let cmd = if controller.is_active() {
                    let timeout = next_poll.saturating_duration_since(Instant::now());

                    match rx_cmd.recv_timeout(timeout) {
                        Ok(cmd) => Some(cmd),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                } else {
                    match rx_cmd.recv() {
                        Ok(cmd) => Some(cmd),
                        Err(_) => break,
                    }
                };

                match cmd {
                    None => {
                        let outcome = controller.poll();
                        log_outcome(&controller, outcome, dashboard_pars);
                        next_poll = Instant::now() + controller.poll_interval();
                    }
                    Some(Command::Quit) => break,
                    Some(cmd) => match apply_command(&mut controller, cmd) {
                        Ok(outcome) => {
                            log_outcome(&controller, outcome, dashboard_pars);
                            next_poll = Instant::now() + controller.poll_interval();
                        }
                        Err(e) => tracing::warn!("Ignoring command {:?}: {}", cmd, e),
                    },
                }

                publish(&controller, tx)?;
            }
        }
    }

    Ok(controller.race_summary())
}

/// apply_command executes a lifecycle command on the controller.
fn apply_command<F: RaceFeed>(
    controller: &mut PollingController<F>,
    cmd: Command,
) -> Result<PollOutcome, ControllerError> {
    match cmd {
        Command::Start => controller.start(),
        Command::Restart => Ok(controller.restart()),
        Command::Pause => controller.pause().map(|_| PollOutcome::Skipped),
        Command::Resume => controller.resume().map(|_| PollOutcome::Skipped),
        Command::Quit => Ok(PollOutcome::Skipped),
    }
}

/// publish sends the current dashboard state if a sender was inserted.
fn publish<F: RaceFeed>(
    controller: &PollingController<F>,
    tx: Option<&Sender<DashboardState>>,
) -> anyhow::Result<()> {
    if let Some(tx) = tx {
        tx.send(controller.dashboard_state())
            .context("Failed to send dashboard state to GUI!")?;
    }
    Ok(())
}

/// log_outcome prints a one-line summary of every stored snapshot.
fn log_outcome<F: RaceFeed>(
    controller: &PollingController<F>,
    outcome: PollOutcome,
    dashboard_pars: &DashboardPars,
) {
    if let PollOutcome::Updated { lap_recorded } = outcome {
        let display_model = map_display(
            controller.store().current(),
            controller.store().lap_history(),
            controller.metadata(),
            controller.is_active(),
            dashboard_pars,
        );

        tracing::info!(
            "{} | last lap {} | {} | {} on {} ({}) | track {} | rain {} | throttle {} | {} | {}",
            display_model.lap_label,
            display_model.last_lap_time,
            display_model.position,
            display_model.tyre_compound,
            display_model.tyre_life,
            display_model.tyre_health.map_or("--", |h| h.label()),
            display_model.track_temp,
            display_model.rainfall,
            display_model.throttle,
            display_model.flag.label(),
            display_model.pace_message
        );

        if !lap_recorded {
            tracing::debug!("Snapshot without a valid lap time, lap history unchanged");
        }
        if let Some(msg) = &display_model.incident_message {
            tracing::warn!("Race control: {}", msg);
        }
    }
}
