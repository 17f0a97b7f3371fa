use eframe::egui;
use racefeed::core::lap_history::LapTimeHistory;
use racefeed::interfaces::gui_interface::{DashboardState, RgbColor};
use racefeed::view::display_mapper::{DisplayModel, FlagKind, StrategyView};
use racefeed::view::panels::{
    blink_visible, flag_color, graph_axes, strategy_bar_color, COLOR_HIGHLIGHT, COLOR_RED,
};

/// Share of the lap time span added above and below the graph.
const GRAPH_PADDING: f64 = 0.1;
const STRATEGY_BAR_SIZE: [f32; 2] = [220.0, 18.0];
const FLAG_SIZE: [f32; 2] = [60.0, 36.0];

fn to_color32(color: RgbColor) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

pub fn header_panel(ui: &mut egui::Ui, state: &DashboardState, display: &DisplayModel) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading(format!(
                "{} {}",
                state.metadata.circuit, state.metadata.season
            ));
            ui.label(format!("Driver: {}", state.metadata.driver));
            ui.label(display.lap_label.as_str());
            ui.label(format!("Last lap: {}", display.last_lap_time));
            ui.label(format!("Status: {}", state.phase));
        });
    });
}

pub fn weather_panel(ui: &mut egui::Ui, display: &DisplayModel) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Weather");
            ui.label(format!("Track temperature: {}", display.track_temp));
            ui.label(format!("Rainfall: {}", display.rainfall));
            ui.label(if display.is_raining { "Wet" } else { "Dry" });
        });
    });
}

/// flag_panel draws the race control flag. Flags other than none blink if enabled.
pub fn flag_panel(
    ui: &mut egui::Ui,
    display: &DisplayModel,
    blink_enabled: &mut bool,
    time_s: f64,
    blink_frequency_hz: f64,
) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Flag");

            let (response, painter) =
                ui.allocate_painter(egui::Vec2::from(FLAG_SIZE), egui::Sense::hover());

            if display.flag == FlagKind::None
                || blink_visible(time_s, *blink_enabled, blink_frequency_hz)
            {
                painter.add(egui::Shape::rect_filled(
                    response.rect,
                    2.0,
                    to_color32(flag_color(display.flag)),
                ));
            }

            ui.label(display.flag.label());
            if let Some(msg) = &display.incident_message {
                ui.colored_label(to_color32(flag_color(display.flag)), msg.as_str());
            }
            ui.checkbox(blink_enabled, "Blink");
        });
    });
}

pub fn engine_panel(ui: &mut egui::Ui, display: &DisplayModel) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Engine");
            ui.label(format!("Throttle: {}", display.throttle));
            ui.label(format!("Engine power: {}", display.engine_power));
            ui.label(display.pace_message.as_str());
            if let Some(delta) = display.pace_delta {
                ui.label(format!("Delta to previous lap: {:+.3} s", delta));
            }
        });
    });
}

pub fn position_tyre_panel(ui: &mut egui::Ui, display: &DisplayModel) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading(display.position.as_str());
            ui.label(format!("Tyre: {}", display.tyre_compound));
            ui.label(format!("Stint: {}", display.tyre_life));
            if let Some(health) = display.tyre_health {
                ui.label(format!(
                    "Condition: {}, expected life {}",
                    health.label(),
                    health.expected_life()
                ));
            }
        });
    });
}

/// strategy_panel draws one proportional bar per strategy class. Highlighted bars are coloured.
pub fn strategy_panel(ui: &mut egui::Ui, strategy: &StrategyView) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Strategy");
            ui.label(format!(
                "Recommendation: {} ({})",
                strategy.recommendation, strategy.confidence
            ));

            for bar in strategy.bars.iter() {
                ui.horizontal(|ui| {
                    ui.label(format!("{:<10}", bar.class.label()));

                    let (response, painter) = ui.allocate_painter(
                        egui::Vec2::from(STRATEGY_BAR_SIZE),
                        egui::Sense::hover(),
                    );
                    let fill_rect = egui::Rect::from_min_size(
                        response.rect.min,
                        egui::vec2(
                            response.rect.width() * bar.fill as f32,
                            response.rect.height(),
                        ),
                    );

                    painter.add(egui::Shape::rect_filled(
                        response.rect,
                        2.0,
                        egui::Color32::from_gray(40),
                    ));
                    painter.add(egui::Shape::rect_filled(
                        fill_rect,
                        2.0,
                        to_color32(strategy_bar_color(bar.highlighted)),
                    ));

                    ui.label(bar.label());
                });
            }
        });
    });
}

/// lap_time_graph draws the complete lap time history (x = lap, y = lap time) into the remaining
/// space of the inserted UI.
pub fn lap_time_graph(ui: &mut egui::Ui, lap_history: &LapTimeHistory) -> egui::Response {
    let (response, painter) =
        ui.allocate_painter(ui.available_size_before_wrap_finite(), egui::Sense::hover());

    let axes = match graph_axes(lap_history, GRAPH_PADDING) {
        Some(x) => x,
        None => {
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "No lap times recorded yet",
                egui::TextStyle::Body,
                egui::Color32::GRAY,
            );
            return response;
        }
    };

    // get transformation from lap/lap time to pixels in the window (y axis must be inverted)
    let to_screen = egui::emath::RectTransform::from_to(
        egui::emath::Rect::from_min_max(
            egui::Pos2 {
                x: axes.x_min as f32,
                y: axes.y_max as f32,
            },
            egui::Pos2 {
                x: axes.x_max as f32,
                y: axes.y_min as f32,
            },
        ),
        response.rect,
    );

    let points: Vec<egui::Pos2> = lap_history
        .entries()
        .iter()
        .map(|e| {
            to_screen
                * egui::Pos2 {
                    x: e.lap as f32,
                    y: e.time_s as f32,
                }
        })
        .collect();

    let mut shapes = vec![];
    let color = to_color32(COLOR_HIGHLIGHT);

    shapes.push(egui::Shape::line(
        points.to_owned(),
        egui::Stroke::new(2.0, color),
    ));
    for point in points.iter() {
        shapes.push(egui::Shape::circle_filled(*point, 3.0, color));
    }

    // axis annotations
    shapes.push(egui::Shape::text(
        ui.fonts(),
        response.rect.left_top(),
        egui::Align2::LEFT_TOP,
        format!("{:.3} s", axes.y_max),
        egui::TextStyle::Body,
        egui::Color32::WHITE,
    ));
    shapes.push(egui::Shape::text(
        ui.fonts(),
        response.rect.left_bottom(),
        egui::Align2::LEFT_BOTTOM,
        format!("{:.3} s", axes.y_min),
        egui::TextStyle::Body,
        egui::Color32::WHITE,
    ));
    shapes.push(egui::Shape::text(
        ui.fonts(),
        response.rect.right_bottom(),
        egui::Align2::RIGHT_BOTTOM,
        format!("lap {:.0}", axes.x_max),
        egui::TextStyle::Body,
        egui::Color32::WHITE,
    ));

    painter.extend(shapes);
    response
}

/// status_bar shows errors as a banner together with the fetch and GUI update statistics.
pub fn status_bar(ui: &mut egui::Ui, state: &DashboardState, update_frequency: Option<f64>) {
    if let Some(err) = &state.metadata_error {
        ui.colored_label(to_color32(COLOR_RED), err.as_str());
    }
    if let Some(err) = &state.last_error {
        ui.colored_label(to_color32(COLOR_RED), format!("Polling stopped: {}", err));
    }

    ui.horizontal(|ui| {
        if let Some(avg_fetch_ms) = state.avg_fetch_ms {
            ui.label(format!("Avg. fetch time: {:.0} ms", avg_fetch_ms));
        }
        if let Some(freq) = update_frequency {
            ui.label(format!("GUI update frequency: {:.0} Hz", freq));
        }
    });
}
