use crate::pre::feed_opts::FeedOpts;
use crate::pre::read_dashboard_pars::DashboardPars;
use anyhow::Context;
use helpers::general::InputValueError;

/// check_feed_opts_pars assures that the inserted options and parameters are within reasonable
/// limits and raises an error if not.
pub fn check_feed_opts_pars(feed_opts: &FeedOpts, dashboard_pars: &DashboardPars) -> anyhow::Result<()> {
    // PART 1: OPTIONS
    if !(0.5 <= feed_opts.poll_interval && feed_opts.poll_interval <= 60.0) {
        return Err(InputValueError).context(format!(
            "poll_interval is {:.3}s, which is not within the reasonable range of [0.5, 60.0]s!",
            feed_opts.poll_interval
        ));
    }

    let origin = feed_opts.backend_url.trim();
    if origin.starts_with("https://") {
        return Err(InputValueError).context(format!(
            "backend_url {} uses https://, but TLS is not supported, use an http:// origin!",
            feed_opts.backend_url
        ));
    }
    if !origin.starts_with("http://") || origin.len() <= "http://".len() {
        return Err(InputValueError).context(format!(
            "backend_url {} must be a plain http:// origin, e.g. http://127.0.0.1:5000!",
            feed_opts.backend_url
        ));
    }

    // PART 2: PARAMETERS
    if dashboard_pars
        .strategy_defaults
        .as_array()
        .iter()
        .any(|&x| !x.is_finite() || x < 0.0)
    {
        return Err(InputValueError)
            .context("All strategy defaults must be finite and non-negative!");
    }

    if !(0.0 < dashboard_pars.blink_frequency_hz && dashboard_pars.blink_frequency_hz <= 10.0) {
        return Err(InputValueError).context(format!(
            "blink_frequency_hz is {:.3}Hz, which is not within the reasonable range of (0.0, 10.0]Hz!",
            dashboard_pars.blink_frequency_hz
        ));
    }

    Ok(())
}
