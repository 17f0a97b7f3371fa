use crate::core::controller::RacePhase;
use crate::core::lap_history::LapTimeHistory;
use crate::core::snapshot::RaceMetadata;
use crate::view::display_mapper::{format_lap_time, PLACEHOLDER};
use std::fmt;

/// RaceSummary contains all information that is required for post-processing a followed race.
#[derive(Debug, Clone)]
pub struct RaceSummary {
    pub metadata: RaceMetadata,
    pub phase: RacePhase,
    pub last_error: Option<String>,
    pub lap_history: LapTimeHistory,
}

impl RaceSummary {
    /// print_lap_times prints the recorded lap times to the console output.
    pub fn print_lap_times(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for RaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "RESULT: {} {} ({}), status: {}",
            self.metadata.circuit, self.metadata.season, self.metadata.driver, self.phase
        )?;

        if let Some(err) = &self.last_error {
            writeln!(f, "RESULT: Polling stopped with error: {}", err)?;
        }

        writeln!(f, "lap,  lap time,    delta")?;
        let mut prev_time_s: Option<f64> = None;

        for lap_time in self.lap_history.entries() {
            let delta = match prev_time_s {
                Some(prev) => format!("{:+8.3}s", lap_time.time_s - prev),
                None => format!("{:>9}", PLACEHOLDER),
            };
            writeln!(
                f,
                "{:3}, {:>9}, {}",
                lap_time.lap,
                format_lap_time(lap_time.time_s),
                delta
            )?;
            prev_time_s = Some(lap_time.time_s);
        }

        let best = self
            .lap_history
            .best()
            .map_or(PLACEHOLDER.to_owned(), |b| {
                format!("{} (lap {})", format_lap_time(b.time_s), b.lap)
            });
        let avg = self
            .lap_history
            .avg_time_s()
            .map_or(PLACEHOLDER.to_owned(), format_lap_time);
        write!(
            f,
            "RESULT: {} laps recorded, best {}, average {}",
            self.lap_history.len(),
            best,
            avg
        )
    }
}
