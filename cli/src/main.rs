use anyhow::Context;
use clap::Parser;
use gui::core::dashboard::RaceDashboard;
use racefeed::core::feed_client::HttpFeed;
use racefeed::core::handle_feed::handle_feed;
use racefeed::pre::check_feed_opts_pars::check_feed_opts_pars;
use racefeed::pre::feed_opts::FeedOpts;
use racefeed::pre::read_dashboard_pars::read_dashboard_pars;
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get options from the command line arguments and set up logging (RUST_LOG takes precedence)
    let feed_opts: FeedOpts = FeedOpts::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if feed_opts.debug { "debug" } else { "info" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // read dashboard parameters and check options and parameters
    let dashboard_pars = read_dashboard_pars(feed_opts.parfile_path.as_deref())?;
    check_feed_opts_pars(&feed_opts, &dashboard_pars)?;

    tracing::info!(
        "Following race backend {} with a polling interval of {:.3}s",
        feed_opts.backend_url,
        feed_opts.poll_interval
    );

    // EXECUTION -----------------------------------------------------------------------------------
    if !feed_opts.gui {
        // CONSOLE CASE ----------------------------------------------------------------------------
        let t_start = Instant::now();
        let feed = HttpFeed::new(&feed_opts.backend_url);
        let race_summary = handle_feed(
            feed,
            &dashboard_pars,
            feed_opts.poll_interval,
            None,
            None,
        )?;

        tracing::info!(
            "Execution time (total): {}s",
            t_start.elapsed().as_secs()
        );

        // POST-PROCESSING -------------------------------------------------------------------------
        // print results
        race_summary.print_lap_times();

        if let Some(err) = &race_summary.last_error {
            return Err(anyhow::anyhow!("{}", err)).context("Polling the race feed failed!");
        }
    } else {
        // GUI CASE --------------------------------------------------------------------------------
        // create channels for the communication between GUI and feed loop
        let (tx, rx) = flume::unbounded();
        let (tx_cmd, rx_cmd) = flume::unbounded();

        // create a separate thread for the feed loop -> options and parameters get moved and must
        // therefore be copied to be still available afterwards
        let feed_opts_thread = feed_opts.clone();
        let dashboard_pars_thread = dashboard_pars.clone();

        let _ = thread::spawn(move || {
            let feed = HttpFeed::new(&feed_opts_thread.backend_url);

            if let Err(e) = handle_feed(
                feed,
                &dashboard_pars_thread,
                feed_opts_thread.poll_interval,
                Some(&tx),
                Some(&rx_cmd),
            ) {
                tracing::error!("Feed loop stopped: {:#}", e);
            }
        });

        // start GUI (must be done in the main thread)
        let gui = RaceDashboard::new(rx, tx_cmd, dashboard_pars);
        let native_options = eframe::NativeOptions::default();
        eframe::run_native(Box::new(gui), native_options);
    }

    Ok(())
}
