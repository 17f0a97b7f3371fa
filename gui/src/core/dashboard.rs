use crate::core::panels;
use crate::interfaces::feed_interface::FeedInterface;
use eframe::{egui, epi};
use flume::{Receiver, Sender};
use helpers::buffer::RingBuffer;
use racefeed::core::controller::RacePhase;
use racefeed::core::lap_history::LapTimeHistory;
use racefeed::core::snapshot::RaceMetadata;
use racefeed::interfaces::gui_interface::{Command, DashboardState};
use racefeed::pre::read_dashboard_pars::DashboardPars;
use racefeed::view::display_mapper::{map_display, DisplayModel};
use std::time::Instant;

#[derive(Debug)]
pub struct RaceDashboard {
    pub feed_interface: FeedInterface,
    pub dashboard_pars: DashboardPars,
    pub display: DisplayModel,
    pub blink_enabled: bool,
    pub prev_update: Instant,
    pub prev_update_durations: RingBuffer<u32>,
}

impl RaceDashboard {
    pub fn new(
        rx: Receiver<DashboardState>,
        tx_cmd: Sender<Command>,
        dashboard_pars: DashboardPars,
    ) -> RaceDashboard {
        let display = map_display(
            None,
            &LapTimeHistory::new(),
            &RaceMetadata::placeholder(),
            false,
            &dashboard_pars,
        );

        RaceDashboard {
            feed_interface: FeedInterface::new(rx, tx_cmd),
            dashboard_pars,
            display,
            blink_enabled: true,
            prev_update: Instant::now(),
            prev_update_durations: RingBuffer::new(10),
        }
    }

    /// refresh_display maps the latest dashboard state if the feed loop published a new one.
    fn refresh_display(&mut self) {
        if self.feed_interface.update() {
            let state = &self.feed_interface.dashboard_state;
            self.display = map_display(
                state.snapshot.as_ref(),
                &state.lap_history,
                &state.metadata,
                state.is_race_active(),
                &self.dashboard_pars,
            );
        }
    }

    /// set_controls shows the buttons that are valid in the current race phase.
    fn set_controls(&mut self, ui: &mut egui::Ui) {
        let phase = self.feed_interface.dashboard_state.phase;
        let mut cmd = None;

        ui.horizontal(|ui| {
            ui.heading("Race Dashboard");

            match phase {
                RacePhase::Ready => {
                    if ui.button("Start Race").clicked() {
                        cmd = Some(Command::Start);
                    }
                }
                RacePhase::Active => {
                    if ui.button("Pause").clicked() {
                        cmd = Some(Command::Pause);
                    }
                    if ui.button("Restart").clicked() {
                        cmd = Some(Command::Restart);
                    }
                }
                RacePhase::Paused => {
                    if ui.button("Resume").clicked() {
                        cmd = Some(Command::Resume);
                    }
                    if ui.button("Restart").clicked() {
                        cmd = Some(Command::Restart);
                    }
                }
                RacePhase::Finished => {
                    if ui.button("Restart Race").clicked() {
                        cmd = Some(Command::Restart);
                    }
                }
            }
        });

        if let Some(cmd) = cmd {
            self.feed_interface.send_command(cmd);
        }
    }

    fn set_ui_content(&mut self, ui: &mut egui::Ui, time_s: f64) {
        let RaceDashboard {
            feed_interface,
            dashboard_pars,
            display,
            blink_enabled,
            ..
        } = self;
        let state = &feed_interface.dashboard_state;

        ui.horizontal(|ui| {
            panels::header_panel(ui, state, display);
            panels::weather_panel(ui, display);
            panels::flag_panel(
                ui,
                display,
                blink_enabled,
                time_s,
                dashboard_pars.blink_frequency_hz,
            );
        });
        ui.horizontal(|ui| {
            panels::engine_panel(ui, display);
            panels::position_tyre_panel(ui, display);
            panels::strategy_panel(ui, &display.strategy);
        });
        ui.separator();

        egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
            panels::lap_time_graph(ui, &state.lap_history);
        });
    }
}

impl epi::App for RaceDashboard {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::CtxRef, _frame: &mut epi::Frame) {
        self.refresh_display();

        // calculate current UI update duration, append it to the buffer, and set update time
        self.prev_update_durations
            .push(self.prev_update.elapsed().as_millis() as u32);
        self.prev_update = Instant::now();
        let update_frequency = self
            .prev_update_durations
            .get_avg()
            .filter(|&avg_ms| avg_ms > 0.0)
            .map(|avg_ms| 1000.0 / avg_ms);

        let time_s = ctx.input().time;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.set_controls(ui);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            panels::status_bar(ui, &self.feed_interface.dashboard_state, update_frequency);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.set_ui_content(ui, time_s);
        });

        // request repaint of the UI (blinking flag, new states)
        ctx.request_repaint();
    }

    fn on_exit(&mut self) {
        self.feed_interface.send_command(Command::Quit);
    }

    fn name(&self) -> &str {
        "Race Dashboard"
    }
}
