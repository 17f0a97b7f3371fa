use crate::core::snapshot::StrategyScores;
use anyhow::Context;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::path::Path;

/// DashboardPars contains the parameters of the display mapping.
///
/// * `strategy_defaults` - Strategy confidences shown until the feed delivers some
/// * `delta_warning_yellow` - Show a yellow flag if the pace message contains a warning while the
/// race is active and race control reports no flag
/// * `blink_frequency_hz` - (Hz) Blink frequency of the flag panel
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardPars {
    #[serde(default = "default_strategy_defaults")]
    pub strategy_defaults: StrategyScores,
    #[serde(default)]
    pub delta_warning_yellow: bool,
    #[serde(default = "default_blink_frequency_hz")]
    pub blink_frequency_hz: f64,
}

fn default_strategy_defaults() -> StrategyScores {
    StrategyScores::FALLBACK
}

fn default_blink_frequency_hz() -> f64 {
    1.0
}

impl Default for DashboardPars {
    fn default() -> Self {
        DashboardPars {
            strategy_defaults: default_strategy_defaults(),
            delta_warning_yellow: false,
            blink_frequency_hz: default_blink_frequency_hz(),
        }
    }
}

/// read_dashboard_pars reads the JSON file and decodes it into the dashboard parameters struct.
/// If no file is given, the built-in defaults are returned.
pub fn read_dashboard_pars(filepath: Option<&Path>) -> anyhow::Result<DashboardPars> {
    let filepath = match filepath {
        Some(x) => x,
        None => return Ok(Default::default()),
    };

    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;

    // read and parse parameter file content
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
