pub mod core {
    pub mod dashboard;
    pub mod panels;
}

pub mod interfaces {
    pub mod feed_interface;
}

#[cfg(test)]
mod feed_interface_tests {
    use crate::interfaces::feed_interface::FeedInterface;
    use racefeed::core::controller::RacePhase;
    use racefeed::interfaces::gui_interface::{Command, DashboardState};

    #[test]
    fn test_update_keeps_latest_state() {
        let (tx, rx) = flume::unbounded();
        let (tx_cmd, _rx_cmd) = flume::unbounded();
        let mut x = FeedInterface::new(rx, tx_cmd);
        assert!(!x.update());

        for &phase in [RacePhase::Active, RacePhase::Paused].iter() {
            tx.send(DashboardState {
                phase,
                ..Default::default()
            })
            .unwrap();
        }
        assert!(x.update());
        assert_eq!(x.dashboard_state.phase, RacePhase::Paused);
        assert!(!x.update());
    }
    #[test]
    fn test_send_command() {
        let (_tx, rx) = flume::unbounded();
        let (tx_cmd, rx_cmd) = flume::unbounded();
        let x = FeedInterface::new(rx, tx_cmd);
        x.send_command(Command::Start);
        assert_eq!(rx_cmd.try_recv().unwrap(), Command::Start);

        // a stopped feed loop must not bring down the GUI
        drop(rx_cmd);
        x.send_command(Command::Pause);
    }
}
