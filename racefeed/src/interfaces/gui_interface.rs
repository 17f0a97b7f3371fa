use crate::core::controller::RacePhase;
use crate::core::lap_history::LapTimeHistory;
use crate::core::snapshot::{RaceMetadata, RaceSnapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Command is sent from the GUI to the feed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// DashboardState is the copy of the controller state the feed loop publishes after every change.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub phase: RacePhase,
    pub last_error: Option<String>,
    pub metadata: RaceMetadata,
    pub metadata_error: Option<String>,
    pub snapshot: Option<RaceSnapshot>,
    pub lap_history: LapTimeHistory,
    pub avg_fetch_ms: Option<f64>,
}

impl DashboardState {
    pub fn is_race_active(&self) -> bool {
        self.phase.is_active()
    }
}
