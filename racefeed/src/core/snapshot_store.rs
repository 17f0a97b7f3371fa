use crate::core::lap_history::LapTimeHistory;
use crate::core::snapshot::RaceSnapshot;

/// SnapshotStore holds the latest snapshot and the lap time series accumulated from all
/// snapshots received since the race was started.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    current: Option<RaceSnapshot>,
    lap_history: LapTimeHistory,
}

impl SnapshotStore {
    pub fn new() -> SnapshotStore {
        Default::default()
    }

    /// ingest replaces the current snapshot and appends its lap to the history if the lap time
    /// is valid. The return value indicates whether a lap was appended.
    pub fn ingest(&mut self, snapshot: RaceSnapshot) -> bool {
        let lap_recorded = self
            .lap_history
            .record(snapshot.current_lap, snapshot.raw_lap_time);
        self.current = Some(snapshot);
        lap_recorded
    }

    /// clear drops the current snapshot and empties the lap history.
    pub fn clear(&mut self) {
        self.current = None;
        self.lap_history.clear();
    }

    pub fn current(&self) -> Option<&RaceSnapshot> {
        self.current.as_ref()
    }

    pub fn lap_history(&self) -> &LapTimeHistory {
        &self.lap_history
    }
}
