use crate::core::feed_client::{FeedError, RaceFeed};
use crate::core::snapshot::{RaceMetadata, RaceStatus};
use crate::core::snapshot_store::SnapshotStore;
use crate::interfaces::gui_interface::DashboardState;
use crate::post::race_summary::RaceSummary;
use helpers::buffer::RingBuffer;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Number of fetch round-trip times the rolling average is computed over.
const NO_FETCH_DURATIONS_AVG: usize = 10;

/// RacePhase is the race lifecycle as seen by the dashboard:
/// Ready -> Active -> {Paused <-> Active} -> Finished, Finished -> Active only via restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Ready,
    Active,
    Paused,
    Finished,
}

impl RacePhase {
    pub fn label(&self) -> &'static str {
        match self {
            RacePhase::Ready => "Ready",
            RacePhase::Active => "Race In Progress",
            RacePhase::Paused => "Paused",
            RacePhase::Finished => "Race Finished",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RacePhase::Active)
    }
}

impl Default for RacePhase {
    fn default() -> Self {
        RacePhase::Ready
    }
}

impl fmt::Display for RacePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("cannot {action} while the race is in phase '{from}'")]
    InvalidTransition { from: RacePhase, action: &'static str },
}

/// UiState is the transient view state owned by the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub phase: RacePhase,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn is_race_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn race_status(&self) -> &'static str {
        self.phase.label()
    }
}

/// PollOutcome describes what a single poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The race is not active, nothing was fetched.
    Skipped,
    /// A snapshot was stored. lap_recorded tells whether its lap was appended to the history.
    Updated { lap_recorded: bool },
    /// The feed signalled the end of the race.
    Finished,
    /// The fetch failed, polling was deactivated and the error recorded.
    Failed,
}

/// PollingController owns the race lifecycle and all data received from the feed. It is driven
/// from a single thread: the feed loop calls poll() whenever the polling interval elapsed.
pub struct PollingController<F: RaceFeed> {
    feed: F,
    poll_interval: Duration,
    store: SnapshotStore,
    metadata: RaceMetadata,
    metadata_error: Option<String>,
    ui_state: UiState,
    fetch_durations: RingBuffer<u32>,
}

impl<F: RaceFeed> PollingController<F> {
    pub fn new(feed: F, poll_interval: Duration) -> PollingController<F> {
        PollingController {
            feed,
            poll_interval,
            store: SnapshotStore::new(),
            metadata: RaceMetadata::placeholder(),
            metadata_error: None,
            ui_state: Default::default(),
            fetch_durations: RingBuffer::new(NO_FETCH_DURATIONS_AVG),
        }
    }

    /// load_metadata fetches the race information. On failure the placeholder metadata is kept
    /// and a persistent error is set, the dashboard stays usable.
    pub fn load_metadata(&mut self) {
        match self.feed.fetch_race_info() {
            Ok(metadata) => {
                tracing::info!(
                    "Loaded race information: {} {} ({}), {} laps",
                    metadata.circuit,
                    metadata.season,
                    metadata.driver,
                    metadata.total_laps
                );
                self.metadata = metadata;
                self.metadata_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load race information: {}", e);
                self.metadata = RaceMetadata::placeholder();
                self.metadata_error = Some(format!("Failed to load race information: {}", e));
            }
        }
    }

    /// start begins a new race. It is only allowed while the dashboard is ready.
    pub fn start(&mut self) -> Result<PollOutcome, ControllerError> {
        if self.ui_state.phase != RacePhase::Ready {
            return Err(ControllerError::InvalidTransition {
                from: self.ui_state.phase,
                action: "start",
            });
        }
        Ok(self.begin_race())
    }

    /// restart begins a new race from any phase.
    pub fn restart(&mut self) -> PollOutcome {
        self.begin_race()
    }

    pub fn pause(&mut self) -> Result<(), ControllerError> {
        if self.ui_state.phase != RacePhase::Active {
            return Err(ControllerError::InvalidTransition {
                from: self.ui_state.phase,
                action: "pause",
            });
        }
        self.ui_state.phase = RacePhase::Paused;
        tracing::info!("Race paused after {} laps", self.store.lap_history().len());
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ControllerError> {
        if self.ui_state.phase != RacePhase::Paused {
            return Err(ControllerError::InvalidTransition {
                from: self.ui_state.phase,
                action: "resume",
            });
        }
        self.ui_state.phase = RacePhase::Active;
        tracing::info!("Race resumed");
        Ok(())
    }

    /// begin_race resets history and error, asks the backend to rewind and fetches the first
    /// snapshot right away.
    fn begin_race(&mut self) -> PollOutcome {
        self.store.clear();
        self.ui_state.last_error = None;

        // a failed reset must not prevent the race from starting
        if let Err(e) = self.feed.reset() {
            tracing::warn!("Failed to reset the race backend: {}", e);
        }

        self.ui_state.phase = RacePhase::Active;
        tracing::info!("Race started");
        self.poll()
    }

    /// poll fetches the next snapshot if the race is active.
    pub fn poll(&mut self) -> PollOutcome {
        if !self.ui_state.is_race_active() {
            tracing::debug!("Skipping poll, race is {}", self.ui_state.phase);
            return PollOutcome::Skipped;
        }

        let t_start = Instant::now();
        let result = self.feed.fetch_snapshot();
        self.fetch_durations
            .push(t_start.elapsed().as_millis().min(u32::MAX as u128) as u32);

        match result {
            Ok(snapshot) => {
                let finished = snapshot.race_status() == RaceStatus::Finished;
                let lap_recorded = self.store.ingest(snapshot);

                if finished {
                    self.finish();
                    PollOutcome::Finished
                } else {
                    PollOutcome::Updated { lap_recorded }
                }
            }
            Err(FeedError::RaceFinished) => {
                self.finish();
                PollOutcome::Finished
            }
            Err(e) => {
                tracing::error!("Failed to fetch race feed: {}", e);
                self.ui_state.phase = RacePhase::Ready;
                self.ui_state.last_error = Some(e.to_string());
                PollOutcome::Failed
            }
        }
    }

    fn finish(&mut self) {
        self.ui_state.phase = RacePhase::Finished;
        tracing::info!(
            "Race finished after {} recorded laps",
            self.store.lap_history().len()
        );
    }

    pub fn is_active(&self) -> bool {
        self.ui_state.is_race_active()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn metadata(&self) -> &RaceMetadata {
        &self.metadata
    }

    pub fn metadata_error(&self) -> Option<&str> {
        self.metadata_error.as_deref()
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn avg_fetch_ms(&self) -> Option<f64> {
        self.fetch_durations.get_avg()
    }

    /// dashboard_state copies everything the GUI needs for drawing.
    pub fn dashboard_state(&self) -> DashboardState {
        DashboardState {
            phase: self.ui_state.phase,
            last_error: self.ui_state.last_error.to_owned(),
            metadata: self.metadata.to_owned(),
            metadata_error: self.metadata_error.to_owned(),
            snapshot: self.store.current().cloned(),
            lap_history: self.store.lap_history().to_owned(),
            avg_fetch_ms: self.avg_fetch_ms(),
        }
    }

    pub fn race_summary(&self) -> RaceSummary {
        RaceSummary {
            metadata: self.metadata.to_owned(),
            phase: self.ui_state.phase,
            last_error: self.ui_state.last_error.to_owned(),
            lap_history: self.store.lap_history().to_owned(),
        }
    }
}
