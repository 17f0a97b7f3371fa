use crate::core::lap_history::LapTimeHistory;
use crate::core::snapshot::{RaceMetadata, RaceSnapshot, StrategyClass, StrategyScores};
use crate::pre::read_dashboard_pars::DashboardPars;
use helpers::general::argmax_all;
use helpers::units::{celsius_to_fahrenheit, fraction_to_percent, round_to_decimals};

/// Text shown for values the feed did not (yet) deliver.
pub const PLACEHOLDER: &str = "--";

/// Pace signal thresholds (s) applied to the delta to the previous lap.
const PUSH_DELTA: f64 = -0.5;
const WARNING_DELTA: f64 = 2.0;

/// Keyword in the pace message that may trigger a yellow flag.
const WARNING_KEYWORD: &str = "WARNING";

/// Sums up to this tolerance are still treated as fractions.
const FRACTION_SUM_TOL: f64 = 1e-6;

/// Recommendation the backend sends before the first classification.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    None,
    Yellow,
    Red,
}

impl FlagKind {
    /// classify maps the race control flag string to the displayed flag.
    pub fn classify(flag_status: &str) -> FlagKind {
        match flag_status.trim().to_lowercase().as_str() {
            "yellow" | "safety car" => FlagKind::Yellow,
            "red" => FlagKind::Red,
            _ => FlagKind::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlagKind::None => "No flag",
            FlagKind::Yellow => "Yellow flag",
            FlagKind::Red => "Red flag",
        }
    }
}

/// classify_flag determines the displayed flag. The explicit flag field takes precedence, the
/// pace message is only considered if enabled, the race is active and no flag is out.
pub fn classify_flag(
    flag_status: Option<&str>,
    delta_message: Option<&str>,
    race_active: bool,
    delta_warning_yellow: bool,
) -> FlagKind {
    let flag = flag_status.map_or(FlagKind::None, FlagKind::classify);

    if flag == FlagKind::None
        && delta_warning_yellow
        && race_active
        && delta_message.map_or(false, |msg| msg.to_uppercase().contains(WARNING_KEYWORD))
    {
        return FlagKind::Yellow;
    }

    flag
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TyreHealth {
    Good,
    Fair,
    Degrading,
    Critical,
}

impl TyreHealth {
    /// from_wear classifies the tyre wear (%).
    pub fn from_wear(wear_pct: f64) -> TyreHealth {
        if wear_pct < 30.0 {
            TyreHealth::Good
        } else if wear_pct < 60.0 {
            TyreHealth::Fair
        } else if wear_pct < 80.0 {
            TyreHealth::Degrading
        } else {
            TyreHealth::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TyreHealth::Good => "GOOD",
            TyreHealth::Fair => "FAIR",
            TyreHealth::Degrading => "DEGRADING",
            TyreHealth::Critical => "CRITICAL",
        }
    }

    pub fn expected_life(&self) -> &'static str {
        match self {
            TyreHealth::Good => "High (20+ laps)",
            TyreHealth::Fair => "Medium (10-20 laps)",
            TyreHealth::Degrading => "Low (5-10 laps)",
            TyreHealth::Critical => "Critical (<5 laps)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceSignal {
    Push,
    Maintain,
    Warning,
}

impl PaceSignal {
    pub fn from_delta(delta_s: f64) -> PaceSignal {
        if delta_s < PUSH_DELTA {
            PaceSignal::Push
        } else if delta_s > WARNING_DELTA {
            PaceSignal::Warning
        } else {
            PaceSignal::Maintain
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaceSignal::Push => "PUSH - Delta improving!",
            PaceSignal::Maintain => "MAINTAIN - Stable pace",
            PaceSignal::Warning => "WARNING - Degradation detected",
        }
    }
}

/// StrategyBar is one bar of the strategy panel.
///
/// * `percent` - (%) Confidence as delivered (fractions scaled to percent)
/// * `percent_rounded` - (%) Rounded confidence, used for the label and the fill
/// * `fill` - Filled share of the bar in [0.0, 1.0]
/// * `highlighted` - true for every class holding the maximum confidence
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyBar {
    pub class: StrategyClass,
    pub percent: f64,
    pub percent_rounded: i64,
    pub fill: f64,
    pub highlighted: bool,
}

impl StrategyBar {
    pub fn label(&self) -> String {
        format!("{}%", self.percent_rounded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyView {
    pub recommendation: String,
    pub confidence: String,
    pub bars: Vec<StrategyBar>,
}

/// map_strategy converts the confidences into bars. Fractions are scaled to percent, values are
/// never renormalized. All tied maxima are highlighted.
pub fn map_strategy(scores: &StrategyScores) -> Vec<StrategyBar> {
    let vals = scores.as_array();
    let is_fraction = vals.iter().all(|&x| x <= 1.0)
        && vals.iter().sum::<f64>() <= 1.0 + FRACTION_SUM_TOL;

    let percents: Vec<f64> = vals
        .iter()
        .map(|&x| if is_fraction { fraction_to_percent(x) } else { x })
        .collect();
    let idxs_max = argmax_all(&percents);

    StrategyClass::ALL
        .iter()
        .zip(percents.iter())
        .enumerate()
        .map(|(i, (&class, &percent))| {
            let percent_rounded = percent.round() as i64;
            StrategyBar {
                class,
                percent,
                percent_rounded,
                fill: (percent_rounded as f64 / 100.0).max(0.0).min(1.0),
                highlighted: idxs_max.contains(&i),
            }
        })
        .collect()
}

/// DisplayModel contains everything the panels show, derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub lap_label: String,
    pub last_lap_time: String,
    pub track_temp_f: Option<f64>,
    pub track_temp: String,
    pub rainfall: String,
    pub is_raining: bool,
    pub flag: FlagKind,
    pub incident_message: Option<String>,
    pub position: String,
    pub tyre_compound: String,
    pub tyre_life: String,
    pub tyre_health: Option<TyreHealth>,
    pub throttle: String,
    pub engine_power: String,
    pub pace_delta: Option<f64>,
    pub pace_message: String,
    pub strategy: StrategyView,
}

/// map_display derives the display model. It is a pure function of its inputs and is evaluated
/// again whenever a new snapshot arrives.
pub fn map_display(
    snapshot: Option<&RaceSnapshot>,
    lap_history: &LapTimeHistory,
    metadata: &RaceMetadata,
    race_active: bool,
    pars: &DashboardPars,
) -> DisplayModel {
    // lap information
    let lap_label = match snapshot {
        Some(s) if metadata.total_laps > 0 => {
            format!("Lap {}/{}", s.current_lap, metadata.total_laps)
        }
        Some(s) => format!("Lap {}", s.current_lap),
        None => format!("Lap {}", PLACEHOLDER),
    };
    let last_lap_time = match lap_history.last() {
        Some(lap_time) => format_lap_time(lap_time.time_s),
        None => PLACEHOLDER.to_owned(),
    };

    // weather
    let track_temp_f = snapshot
        .and_then(|s| s.track_temp)
        .map(|temp_c| round_to_decimals(celsius_to_fahrenheit(temp_c), 1));
    let track_temp = track_temp_f.map_or(PLACEHOLDER.to_owned(), |temp_f| {
        format!("{:.1} °F", temp_f)
    });
    let rain_amount = snapshot.and_then(|s| s.rain_amount);
    let rainfall = rain_amount.map_or(PLACEHOLDER.to_owned(), |rain| format!("{:.1} mm", rain));

    // pace -> a message sent by the backend wins over the one derived from the history
    let pace_delta = lap_history.last_delta();
    let pace_message = match snapshot.and_then(|s| s.delta_message.as_deref()) {
        Some(msg) if !msg.trim().is_empty() => msg.trim().to_owned(),
        _ => pace_delta
            .map_or(PaceSignal::Maintain, PaceSignal::from_delta)
            .label()
            .to_owned(),
    };

    // flag
    let flag = classify_flag(
        snapshot.and_then(|s| s.flag_status.as_deref()),
        Some(pace_message.as_str()),
        race_active,
        pars.delta_warning_yellow,
    );
    let incident_message = match snapshot.and_then(|s| s.incident_message.as_deref()) {
        Some(msg) if flag != FlagKind::None && !msg.trim().is_empty() => {
            Some(msg.trim().to_owned())
        }
        _ => None,
    };

    // car
    let position = snapshot
        .and_then(|s| s.position)
        .map_or(format!("P{}", PLACEHOLDER), |p| format!("P{}", p));
    let tyre_compound = snapshot
        .and_then(|s| s.tyre_compound.as_deref())
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("Unknown")
        .to_owned();
    let tyre_life = match snapshot.and_then(|s| s.stint_lap_count) {
        Some(1) => String::from("1 lap"),
        Some(n) => format!("{} laps", n),
        None => PLACEHOLDER.to_owned(),
    };
    let tyre_health = snapshot
        .and_then(|s| s.tyre_wear_pct)
        .map(TyreHealth::from_wear);
    let throttle = snapshot
        .and_then(|s| s.throttle_percent)
        .map_or(PLACEHOLDER.to_owned(), format_percent);
    let engine_power = snapshot
        .and_then(|s| s.engine_power_pct)
        .map_or(PLACEHOLDER.to_owned(), format_percent);

    // strategy -> without scores from the feed the defaults are shown, but the highlight follows
    // the recommendation so both never contradict each other
    let recommendation = snapshot
        .and_then(|s| s.recommendation.as_deref())
        .map(str::trim)
        .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case(NOT_AVAILABLE));
    let confidence = match recommendation {
        Some(_) => snapshot
            .and_then(|s| s.recommendation_confidence)
            .map_or(PLACEHOLDER.to_owned(), |x| format_percent(scale_fraction(x))),
        None => PLACEHOLDER.to_owned(),
    };

    let bars = match snapshot.and_then(|s| s.confidence_scores) {
        Some(scores) => map_strategy(&scores),
        None => {
            let mut bars = map_strategy(&pars.strategy_defaults);
            if let Some(class) = recommendation.and_then(StrategyClass::from_label) {
                for bar in bars.iter_mut() {
                    bar.highlighted = bar.class == class;
                }
            }
            bars
        }
    };

    let strategy = StrategyView {
        recommendation: recommendation.unwrap_or(PLACEHOLDER).to_owned(),
        confidence,
        bars,
    };

    DisplayModel {
        lap_label,
        last_lap_time,
        track_temp_f,
        track_temp,
        rainfall,
        is_raining: rain_amount.map_or(false, |rain| rain > 0.0),
        flag,
        incident_message,
        position,
        tyre_compound,
        tyre_life,
        tyre_health,
        throttle,
        engine_power,
        pace_delta,
        pace_message,
        strategy,
    }
}

/// scale_fraction converts a single confidence in [0.0, 1.0] to percent and passes larger values.
fn scale_fraction(x: f64) -> f64 {
    if x <= 1.0 {
        fraction_to_percent(x)
    } else {
        x
    }
}

/// format_percent rounds x to an integer percentage.
pub fn format_percent(x: f64) -> String {
    format!("{}%", x.round() as i64)
}

/// format_lap_time formats a lap time in seconds as m:ss.mmm.
pub fn format_lap_time(time_s: f64) -> String {
    if !(time_s > 0.0) {
        return PLACEHOLDER.to_owned();
    }

    let ms_tot = (time_s * 1000.0).round() as u64;
    format!(
        "{}:{:02}.{:03}",
        ms_tot / 60_000,
        (ms_tot % 60_000) / 1000,
        ms_tot % 1000
    )
}
