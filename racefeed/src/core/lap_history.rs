use serde::{Deserialize, Serialize};

/// LapTime is a single point of the lap time chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapTime {
    pub lap: u32,
    pub time_s: f64,
}

/// LapTimeHistory is the append-only series of completed laps. It is only emptied when a race is
/// (re)started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapTimeHistory {
    entries: Vec<LapTime>,
}

impl LapTimeHistory {
    pub fn new() -> LapTimeHistory {
        LapTimeHistory { entries: vec![] }
    }

    /// record appends the lap if its lap time is valid (> 0.0) and returns whether it was
    /// appended.
    pub fn record(&mut self, lap: u32, time_s: f64) -> bool {
        // NaN is rejected as well
        if !(time_s > 0.0) {
            return false;
        }

        self.entries.push(LapTime { lap, time_s });
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LapTime] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LapTime> {
        self.entries.last()
    }

    /// last_delta returns the lap time difference between the two latest entries (negative if
    /// the latest lap was faster).
    pub fn last_delta(&self) -> Option<f64> {
        match self.entries.as_slice() {
            [.., prev, last] => Some(last.time_s - prev.time_s),
            _ => None,
        }
    }

    pub fn best(&self) -> Option<&LapTime> {
        self.entries
            .iter()
            .fold(None, |best: Option<&LapTime>, cur| match best {
                Some(b) if b.time_s <= cur.time_s => Some(b),
                _ => Some(cur),
            })
    }

    pub fn avg_time_s(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.iter().map(|e| e.time_s).sum::<f64>() / self.entries.len() as f64)
    }
}
