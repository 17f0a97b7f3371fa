use serde::{Deserialize, Serialize};

/// RaceStatus is the overall race status reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Ready,
    Active,
    Finished,
}

impl RaceStatus {
    /// from_raw interprets the free-text status string of a snapshot. Unknown strings are treated
    /// as an active race since the feed only answers with data while a race is running.
    pub fn from_raw(raw: &str) -> RaceStatus {
        match raw.trim().to_lowercase().as_str() {
            "ready" => RaceStatus::Ready,
            "race finished" | "finished" => RaceStatus::Finished,
            _ => RaceStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyClass {
    Aggressive,
    Neutral,
    Defensive,
}

impl StrategyClass {
    pub const ALL: [StrategyClass; 3] = [
        StrategyClass::Aggressive,
        StrategyClass::Neutral,
        StrategyClass::Defensive,
    ];

    /// from_label parses a recommendation label case-insensitively.
    pub fn from_label(label: &str) -> Option<StrategyClass> {
        StrategyClass::ALL
            .iter()
            .copied()
            .find(|class| class.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrategyClass::Aggressive => "Aggressive",
            StrategyClass::Neutral => "Neutral",
            StrategyClass::Defensive => "Defensive",
        }
    }
}

/// StrategyScores contains one confidence value per strategy class. The values are either
/// fractions (as produced by the strategy classifier) or percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyScores {
    #[serde(default, alias = "AGGRESSIVE", alias = "Aggressive")]
    pub aggressive: f64,
    #[serde(default, alias = "NEUTRAL", alias = "Neutral")]
    pub neutral: f64,
    #[serde(default, alias = "DEFENSIVE", alias = "Defensive")]
    pub defensive: f64,
}

impl StrategyScores {
    /// Scores shown as long as the feed did not deliver any.
    pub const FALLBACK: StrategyScores = StrategyScores {
        aggressive: 10.0,
        neutral: 80.0,
        defensive: 10.0,
    };

    pub fn get(&self, class: StrategyClass) -> f64 {
        match class {
            StrategyClass::Aggressive => self.aggressive,
            StrategyClass::Neutral => self.neutral,
            StrategyClass::Defensive => self.defensive,
        }
    }

    /// as_array returns the scores in the order of StrategyClass::ALL.
    pub fn as_array(&self) -> [f64; 3] {
        [self.aggressive, self.neutral, self.defensive]
    }
}

/// RaceSnapshot is a single response of the feed endpoint. Field names follow the JSON payload
/// of the race emulator backend. All fields except the lap number are optional on the wire.
///
/// * `status` - Free-text race status, e.g. "In Progress" or "Race Finished"
/// * `current_lap` - Lap the snapshot belongs to
/// * `raw_lap_time` - (s) Lap time, values <= 0.0 mark an incomplete lap
/// * `track_temp` - (°C) Track temperature
/// * `rain_amount` - (mm) Rainfall
/// * `throttle_percent` - (%) Throttle application
/// * `position` - Current race position of the car
/// * `tyre_compound` - Tyre compound, e.g. "Medium"
/// * `stint_lap_count` - Number of laps driven on the current tyre set
/// * `tyre_wear_pct` - (%) Tyre wear
/// * `engine_power_pct` - (%) Engine power
/// * `flag_status` - Race control flag, e.g. "Yellow" or "Safety Car"
/// * `incident_message` - Race control message belonging to the flag
/// * `delta_message` - Pace trend message, e.g. "PUSH" or "WARNING - Degradation detected"
/// * `recommendation` - Recommended strategy class
/// * `recommendation_confidence` - Confidence of the recommended strategy
/// * `confidence_scores` - Confidence per strategy class
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RaceSnapshot {
    #[serde(default)]
    pub status: String,
    #[serde(alias = "lap_number")]
    pub current_lap: u32,
    #[serde(default, alias = "current_lap_time")]
    pub raw_lap_time: f64,
    pub track_temp: Option<f64>,
    #[serde(alias = "rainfall_mm")]
    pub rain_amount: Option<f64>,
    #[serde(alias = "throttle_pct")]
    pub throttle_percent: Option<f64>,
    #[serde(alias = "current_position")]
    pub position: Option<u32>,
    pub tyre_compound: Option<String>,
    pub stint_lap_count: Option<u32>,
    pub tyre_wear_pct: Option<f64>,
    pub engine_power_pct: Option<f64>,
    pub flag_status: Option<String>,
    pub incident_message: Option<String>,
    #[serde(alias = "signal")]
    pub delta_message: Option<String>,
    #[serde(rename = "ML_Recommendation", alias = "recommended_strategy")]
    pub recommendation: Option<String>,
    #[serde(rename = "ML_Confidence")]
    pub recommendation_confidence: Option<f64>,
    pub confidence_scores: Option<StrategyScores>,
}

impl RaceSnapshot {
    pub fn race_status(&self) -> RaceStatus {
        RaceStatus::from_raw(&self.status)
    }
}

/// RaceMetadata is fetched once per session and not changed afterwards.
///
/// * `season` - Season of the race
/// * `driver` - Driver whose car is followed
/// * `circuit` - Name of the circuit
/// * `total_laps` - Total number of laps in the race (0 if unknown)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceMetadata {
    #[serde(default)]
    pub season: u32,
    #[serde(default = "not_available")]
    pub driver: String,
    #[serde(default = "not_available")]
    pub circuit: String,
    #[serde(default, alias = "tot_no_laps")]
    pub total_laps: u32,
}

fn not_available() -> String {
    String::from("N/A")
}

impl RaceMetadata {
    /// placeholder is shown if the race information could not be loaded.
    pub fn placeholder() -> RaceMetadata {
        RaceMetadata {
            season: 0,
            driver: not_available(),
            circuit: not_available(),
            total_laps: 0,
        }
    }
}

impl Default for RaceMetadata {
    fn default() -> Self {
        RaceMetadata::placeholder()
    }
}
