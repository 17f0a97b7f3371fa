use crate::core::lap_history::LapTimeHistory;
use crate::interfaces::gui_interface::RgbColor;
use crate::view::display_mapper::FlagKind;
use helpers::general::{max, min};

pub const COLOR_NEUTRAL: RgbColor = RgbColor { r: 160, g: 160, b: 160 };
pub const COLOR_HIGHLIGHT: RgbColor = RgbColor { r: 0, g: 210, b: 190 };
pub const COLOR_YELLOW: RgbColor = RgbColor { r: 255, g: 215, b: 0 };
pub const COLOR_RED: RgbColor = RgbColor { r: 225, g: 6, b: 0 };
pub const COLOR_GREEN: RgbColor = RgbColor { r: 0, g: 180, b: 80 };

/// Lap time axis padding (s) if all laps have the same time.
const MIN_Y_PADDING: f64 = 0.5;

pub fn flag_color(flag: FlagKind) -> RgbColor {
    match flag {
        FlagKind::None => COLOR_GREEN,
        FlagKind::Yellow => COLOR_YELLOW,
        FlagKind::Red => COLOR_RED,
    }
}

pub fn strategy_bar_color(highlighted: bool) -> RgbColor {
    if highlighted {
        COLOR_HIGHLIGHT
    } else {
        COLOR_NEUTRAL
    }
}

/// blink_visible returns whether a blinking flag is drawn at the inserted frame time. With
/// blinking disabled the flag is always drawn.
pub fn blink_visible(time_s: f64, blink_enabled: bool, frequency_hz: f64) -> bool {
    if !blink_enabled || frequency_hz <= 0.0 {
        return true;
    }
    (time_s * frequency_hz * 2.0).floor() as i64 % 2 == 0
}

/// GraphAxes contains the value ranges of the lap time chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphAxes {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// graph_axes determines the axes of the lap time chart from the history. The lap time range is
/// padded by the inserted share of its span on both sides. None is returned for an empty history.
pub fn graph_axes(lap_history: &LapTimeHistory, padding: f64) -> Option<GraphAxes> {
    if lap_history.is_empty() {
        return None;
    }

    let laps: Vec<f64> = lap_history.entries().iter().map(|e| e.lap as f64).collect();
    let times: Vec<f64> = lap_history.entries().iter().map(|e| e.time_s).collect();

    let (mut x_min, mut x_max) = (min(&laps), max(&laps));
    if x_max - x_min < 1.0 {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let (y_min, y_max) = (min(&times), max(&times));
    let y_pad = ((y_max - y_min) * padding).max(MIN_Y_PADDING);

    Some(GraphAxes {
        x_min,
        x_max,
        y_min: y_min - y_pad,
        y_max: y_max + y_pad,
    })
}
