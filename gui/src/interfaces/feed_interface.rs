use flume::{Receiver, Sender};
use racefeed::interfaces::gui_interface::{Command, DashboardState};

/// FeedInterface connects the GUI to the feed loop thread.
#[derive(Debug)]
pub struct FeedInterface {
    pub rx: Receiver<DashboardState>,
    pub tx_cmd: Sender<Command>,
    pub dashboard_state: DashboardState,
}

impl FeedInterface {
    pub fn new(rx: Receiver<DashboardState>, tx_cmd: Sender<Command>) -> FeedInterface {
        FeedInterface {
            rx,
            tx_cmd,
            dashboard_state: Default::default(),
        }
    }

    /// update drains the channel and keeps the latest dashboard state. The return value indicates
    /// whether a new state was received.
    pub fn update(&mut self) -> bool {
        match self.rx.try_iter().last() {
            Some(x) => {
                self.dashboard_state = x;
                true
            }
            None => false,
        }
    }

    pub fn send_command(&self, cmd: Command) {
        if let Err(e) = self.tx_cmd.send(cmd) {
            tracing::error!("Failed to send command {:?} to feed loop: {}", cmd, e);
        }
    }
}
