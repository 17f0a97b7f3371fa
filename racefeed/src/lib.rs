pub mod core {
    pub mod controller;
    pub mod feed_client;
    pub mod handle_feed;
    pub mod lap_history;
    pub mod snapshot;
    pub mod snapshot_store;
}

pub mod interfaces {
    pub mod gui_interface;
}

pub mod post {
    pub mod race_summary;
}

pub mod pre {
    pub mod check_feed_opts_pars;
    pub mod feed_opts;
    pub mod read_dashboard_pars;
}

pub mod view {
    pub mod display_mapper;
    pub mod panels;
}


#[cfg(test)]
mod lap_history_tests {
    use crate::core::lap_history::{LapTime, LapTimeHistory};
    use crate::core::snapshot_store::SnapshotStore;
    use crate::test_utils::snapshot;
    use approx::assert_ulps_eq;

    #[test]
    fn test_record_skips_incomplete_laps() {
        let mut x = LapTimeHistory::new();
        assert!(x.record(1, 95.2));
        for &time_s in [0.0, -3.0, f64::NAN].iter() {
            assert!(!x.record(2, time_s));
            assert_eq!(x.len(), 1);
        }
    }
    #[test]
    fn test_record_appends_lap_and_time() {
        let mut x = LapTimeHistory::new();
        x.record(1, 95.2);
        assert!(x.record(2, 94.8));
        assert_eq!(x.len(), 2);
        assert_eq!(
            *x.last().unwrap(),
            LapTime {
                lap: 2,
                time_s: 94.8
            }
        );
    }
    #[test]
    fn test_statistics() {
        let mut x = LapTimeHistory::new();
        assert!(x.last_delta().is_none());
        assert!(x.avg_time_s().is_none());
        x.record(1, 96.0);
        x.record(2, 94.0);
        x.record(3, 95.0);
        assert_ulps_eq!(x.last_delta().unwrap(), 1.0);
        assert_eq!(x.best().unwrap().lap, 2);
        assert_ulps_eq!(x.avg_time_s().unwrap(), 95.0);
    }

    #[test]
    fn test_store_replaces_snapshot_unconditionally() {
        let mut store = SnapshotStore::new();
        assert!(store.ingest(snapshot(1, 95.0)));
        assert!(!store.ingest(snapshot(2, 0.0)));
        assert_eq!(store.current().unwrap().current_lap, 2);
        assert_eq!(store.lap_history().len(), 1);
    }
    #[test]
    fn test_store_clear() {
        let mut store = SnapshotStore::new();
        store.ingest(snapshot(1, 95.0));
        store.clear();
        assert!(store.current().is_none());
        assert!(store.lap_history().is_empty());
    }
}



#[cfg(test)]
mod display_mapper_tests {
    use crate::core::lap_history::LapTimeHistory;
    use crate::core::snapshot::{RaceMetadata, RaceSnapshot, StrategyClass, StrategyScores};
    use crate::pre::read_dashboard_pars::DashboardPars;
    use crate::test_utils::snapshot;
    use crate::view::display_mapper::{
        classify_flag, format_lap_time, map_display, map_strategy, FlagKind, TyreHealth,
    };
    use approx::assert_ulps_eq;

    #[test]
    fn test_temperature_fahrenheit() {
        let x = map_display(
            Some(&snapshot(1, 95.0)),
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            true,
            &DashboardPars::default(),
        );
        assert_ulps_eq!(x.track_temp_f.unwrap(), 98.6);
        assert_eq!(x.track_temp, "98.6 °F");
    }

    #[test]
    fn test_flag_classification() {
        assert_eq!(FlagKind::classify("Yellow"), FlagKind::Yellow);
        assert_eq!(FlagKind::classify("Red"), FlagKind::Red);
        assert_eq!(FlagKind::classify("Safety Car"), FlagKind::Yellow);
        assert_eq!(FlagKind::classify("Green"), FlagKind::None);
        assert_eq!(FlagKind::classify(""), FlagKind::None);
    }
    #[test]
    fn test_flag_delta_warning_rule() {
        let msg = Some("WARNING - Degradation detected");
        assert_eq!(classify_flag(None, msg, true, false), FlagKind::None);
        assert_eq!(classify_flag(None, msg, true, true), FlagKind::Yellow);
        assert_eq!(classify_flag(None, msg, false, true), FlagKind::None);
        assert_eq!(classify_flag(Some("Red"), msg, true, true), FlagKind::Red);
    }

    #[test]
    fn test_strategy_percentages_not_renormalized() {
        let bars = map_strategy(&StrategyScores {
            aggressive: 10.0,
            neutral: 80.0,
            defensive: 10.0,
        });
        let labels: Vec<String> = bars.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["10%", "80%", "10%"]);
        let highlighted: Vec<StrategyClass> = bars
            .iter()
            .filter(|b| b.highlighted)
            .map(|b| b.class)
            .collect();
        assert_eq!(highlighted, vec![StrategyClass::Neutral]);
        assert_ulps_eq!(bars[1].fill, 0.8);
    }
    #[test]
    fn test_strategy_ties_all_highlighted() {
        let bars = map_strategy(&StrategyScores {
            aggressive: 45.0,
            neutral: 10.0,
            defensive: 45.0,
        });
        let highlighted: Vec<bool> = bars.iter().map(|b| b.highlighted).collect();
        assert_eq!(highlighted, vec![true, false, true]);
    }
    #[test]
    fn test_strategy_fractions_scaled() {
        let bars = map_strategy(&StrategyScores {
            aggressive: 0.65,
            neutral: 0.25,
            defensive: 0.1,
        });
        let labels: Vec<String> = bars.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["65%", "25%", "10%"]);
        assert!(bars[0].highlighted);
    }

    #[test]
    fn test_backend_recommendation_without_scores() {
        let json = r#"{"status": "In Progress", "current_lap": 4, "raw_lap_time": 91.0,
            "ML_Recommendation": "Aggressive", "ML_Confidence": 75.0, "throttle_percent": 97.0,
            "track_temp": 31.0, "rain_amount": 0.0}"#;
        let s: RaceSnapshot = serde_json::from_str(json).unwrap();
        let x = map_display(
            Some(&s),
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            true,
            &DashboardPars::default(),
        );

        assert_eq!(x.strategy.recommendation, "Aggressive");
        assert_eq!(x.strategy.confidence, "75%");
        let labels: Vec<String> = x.strategy.bars.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["10%", "80%", "10%"]);
        let highlighted: Vec<StrategyClass> = x
            .strategy
            .bars
            .iter()
            .filter(|b| b.highlighted)
            .map(|b| b.class)
            .collect();
        assert_eq!(highlighted, vec![StrategyClass::Aggressive]);
    }
    #[test]
    fn test_backend_recommendation_not_available() {
        let json = r#"{"status": "Ready", "current_lap": 0, "raw_lap_time": 0.0,
            "ML_Recommendation": "N/A", "ML_Confidence": 0.0}"#;
        let s: RaceSnapshot = serde_json::from_str(json).unwrap();
        let x = map_display(
            Some(&s),
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            false,
            &DashboardPars::default(),
        );

        assert_eq!(x.strategy.recommendation, "--");
        assert_eq!(x.strategy.confidence, "--");
        assert!(x.strategy.bars[1].highlighted);
    }
    #[test]
    fn test_feed_scores_decide_highlight() {
        let mut s = snapshot(4, 91.0);
        s.recommendation = Some(String::from("Defensive"));
        s.recommendation_confidence = Some(0.55);
        s.confidence_scores = Some(StrategyScores {
            aggressive: 0.15,
            neutral: 0.3,
            defensive: 0.55,
        });
        let x = map_display(
            Some(&s),
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            true,
            &DashboardPars::default(),
        );

        assert_eq!(x.strategy.confidence, "55%");
        let highlighted: Vec<bool> = x.strategy.bars.iter().map(|b| b.highlighted).collect();
        assert_eq!(highlighted, vec![false, false, true]);
    }
    #[test]
    fn test_placeholders_without_snapshot() {
        let x = map_display(
            None,
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            false,
            &DashboardPars::default(),
        );
        assert_eq!(x.lap_label, "Lap --");
        assert_eq!(x.position, "P--");
        assert_eq!(x.tyre_compound, "Unknown");
        assert_eq!(x.throttle, "--");
        assert_eq!(x.flag, FlagKind::None);
        let labels: Vec<String> = x.strategy.bars.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["10%", "80%", "10%"]);
    }
    #[test]
    fn test_car_fields() {
        let mut s = snapshot(12, 97.4);
        s.position = Some(3);
        s.stint_lap_count = Some(9);
        s.tyre_compound = Some(String::from("Medium"));
        s.tyre_wear_pct = Some(65.0);
        s.throttle_percent = Some(98.6);
        let metadata = RaceMetadata {
            total_laps: 56,
            ..RaceMetadata::placeholder()
        };
        let x = map_display(
            Some(&s),
            &LapTimeHistory::new(),
            &metadata,
            true,
            &DashboardPars::default(),
        );
        assert_eq!(x.lap_label, "Lap 12/56");
        assert_eq!(x.position, "P3");
        assert_eq!(x.tyre_life, "9 laps");
        assert_eq!(x.tyre_health, Some(TyreHealth::Degrading));
        assert_eq!(x.throttle, "99%");
    }
    #[test]
    fn test_incident_only_with_flag() {
        let mut s = snapshot(5, 96.0);
        s.incident_message = Some(String::from("Debris in turn 12"));
        let pars = DashboardPars::default();
        let x = map_display(Some(&s), &LapTimeHistory::new(), &RaceMetadata::placeholder(), true, &pars);
        assert!(x.incident_message.is_none());

        s.flag_status = Some(String::from("Yellow"));
        let x = map_display(Some(&s), &LapTimeHistory::new(), &RaceMetadata::placeholder(), true, &pars);
        assert_eq!(x.incident_message.as_deref(), Some("Debris in turn 12"));
    }
    #[test]
    fn test_pace_message_from_history() {
        let mut history = LapTimeHistory::new();
        history.record(1, 95.0);
        history.record(2, 97.5);
        let x = map_display(
            Some(&snapshot(2, 97.5)),
            &history,
            &RaceMetadata::placeholder(),
            true,
            &DashboardPars::default(),
        );
        assert_eq!(x.pace_message, "WARNING - Degradation detected");
        assert_eq!(x.last_lap_time, "1:37.500");
    }

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(90.1), "1:30.100");
        assert_eq!(format_lap_time(59.9996), "1:00.000");
        assert_eq!(format_lap_time(0.0), "--");
    }
}


#[cfg(test)]
mod pre_tests {
    use crate::pre::check_feed_opts_pars::check_feed_opts_pars;
    use crate::pre::feed_opts::FeedOpts;
    use crate::pre::read_dashboard_pars::{read_dashboard_pars, DashboardPars};
    use approx::assert_ulps_eq;
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_default_opts_are_valid() {
        let opts = FeedOpts::parse_from(vec!["racedash"]);
        assert_eq!(opts.backend_url, "http://127.0.0.1:5000");
        assert_ulps_eq!(opts.poll_interval, 3.0);
        assert!(check_feed_opts_pars(&opts, &DashboardPars::default()).is_ok());
    }
    #[test]
    fn test_invalid_opts() {
        let opts = FeedOpts::parse_from(vec!["racedash", "--poll-interval", "0.1"]);
        assert!(check_feed_opts_pars(&opts, &DashboardPars::default()).is_err());

        let opts = FeedOpts::parse_from(vec!["racedash", "-b", "ftp://example.org"]);
        assert!(check_feed_opts_pars(&opts, &DashboardPars::default()).is_err());
    }
    #[test]
    fn test_https_reports_missing_tls() {
        let opts = FeedOpts::parse_from(vec!["racedash", "-b", "https://example.org"]);
        let err = check_feed_opts_pars(&opts, &DashboardPars::default()).unwrap_err();
        assert!(err.to_string().contains("TLS is not supported"));
    }
    #[test]
    fn test_invalid_pars() {
        let opts = FeedOpts::parse_from(vec!["racedash"]);
        let mut pars = DashboardPars::default();
        pars.strategy_defaults.neutral = -1.0;
        assert!(check_feed_opts_pars(&opts, &pars).is_err());

        let mut pars = DashboardPars::default();
        pars.blink_frequency_hz = 0.0;
        assert!(check_feed_opts_pars(&opts, &pars).is_err());
    }
    #[test]
    fn test_read_dashboard_pars() {
        assert_eq!(read_dashboard_pars(None).unwrap(), DashboardPars::default());

        let filepath = std::env::temp_dir().join(format!(
            "racefeed_dashboard_pars_{}.json",
            std::process::id()
        ));
        fs::write(
            &filepath,
            r#"{"strategy_defaults": {"aggressive": 10, "neutral": 60, "defensive": 30},
                "delta_warning_yellow": true}"#,
        )
        .unwrap();
        let pars = read_dashboard_pars(Some(filepath.as_path())).unwrap();
        fs::remove_file(&filepath).unwrap();

        assert_ulps_eq!(pars.strategy_defaults.defensive, 30.0);
        assert!(pars.delta_warning_yellow);
        assert_ulps_eq!(pars.blink_frequency_hz, 1.0);
    }
    #[test]
    fn test_read_shipped_parfile() {
        let filepath = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../input/parameters/dashboard_pars.json");
        assert_eq!(
            read_dashboard_pars(Some(filepath.as_path())).unwrap(),
            DashboardPars::default()
        );
    }
    #[test]
    fn test_read_missing_parfile() {
        let filepath = std::env::temp_dir().join("racefeed_does_not_exist.json");
        assert!(read_dashboard_pars(Some(filepath.as_path())).is_err());
    }
}

#[cfg(test)]
mod feed_client_tests {
    use crate::core::feed_client::{FeedError, HttpFeed, RaceFeed};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// serve answers a single connection with the inserted status line and body and returns the
    /// backend origin.
    fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];

            // read until the end of the request header
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_fetch_snapshot() {
        let origin = serve(
            "200 OK",
            r#"{"status": "In Progress", "current_lap": 7, "raw_lap_time": 91.3}"#,
        );
        let x = HttpFeed::new(&origin).fetch_snapshot().unwrap();
        assert_eq!(x.current_lap, 7);
    }
    #[test]
    fn test_fetch_race_info() {
        let origin = serve(
            "200 OK",
            r#"{"season": 2023, "driver": "VER", "circuit": "Monza", "total_laps": 51}"#,
        );
        let x = HttpFeed::new(&origin).fetch_race_info().unwrap();
        assert_eq!(x.driver, "VER");
        assert_eq!(x.total_laps, 51);
    }
    #[test]
    fn test_gone_means_race_finished() {
        let origin = serve("410 Gone", "");
        assert_eq!(
            HttpFeed::new(&origin).fetch_snapshot(),
            Err(FeedError::RaceFinished)
        );
    }
    #[test]
    fn test_server_error() {
        let origin = serve("500 Internal Server Error", "");
        assert_eq!(
            HttpFeed::new(&origin).fetch_race_info(),
            Err(FeedError::Status(500))
        );
    }
    #[test]
    fn test_invalid_json() {
        let origin = serve("200 OK", "nope");
        assert!(matches!(
            HttpFeed::new(&origin).fetch_snapshot(),
            Err(FeedError::Decode(_))
        ));
    }
    #[test]
    fn test_reset() {
        let origin = serve("200 OK", "{}");
        assert!(HttpFeed::new(&origin).reset().is_ok());
    }
    #[test]
    fn test_unreachable_backend() {
        // bind and drop a listener to obtain a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let feed = HttpFeed::new(&format!("http://{}/", addr));
        assert_eq!(feed.endpoint("/api/feed"), format!("http://{}/api/feed", addr));
        assert!(matches!(
            feed.fetch_snapshot(),
            Err(FeedError::Transport(_))
        ));
    }
}
