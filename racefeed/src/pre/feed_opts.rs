use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RaceDash",
    about = "A race telemetry dashboard polling a race simulation backend"
)]
pub struct FeedOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging
    #[clap(short, long)]
    pub debug: bool,

    /// Activate GUI (otherwise the race is followed on the console until it is finished)
    #[clap(short, long)]
    pub gui: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set origin of the backend serving the /api/* endpoints
    #[clap(short, long, default_value = "http://127.0.0.1:5000")]
    pub backend_url: String,

    /// Set path to the dashboard parameter file (built-in defaults are used if not set)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set polling interval in seconds, should be in the range [0.5, 60.0]
    #[clap(short = 'i', long, default_value = "3.0")]
    pub poll_interval: f64,
}
