// Reusable UI components
// Provides common UI elements for the application

use crate::controller::DispatchState;
use eframe::egui;

/// Render a lifecycle badge with colored text (no background bar)
/// Colors: Idle (gray), Thinking (yellow), Answered (green), Failed (red)
pub fn state_badge(ui: &mut egui::Ui, state: &DispatchState) {
    let (text, text_color) = match state {
        DispatchState::Idle => ("Idle", egui::Color32::GRAY),
        DispatchState::Pending { .. } => ("Thinking", egui::Color32::from_rgb(220, 180, 0)),
        DispatchState::Succeeded(_) => ("Answered", egui::Color32::from_rgb(0, 200, 0)),
        DispatchState::Failed(_) => ("Failed", egui::Color32::from_rgb(220, 0, 0)),
    };

    ui.colored_label(text_color, text);
}

/// Render the destination chip naming which backend answered
///
/// The destination is an opaque identifier chosen by the router, so it is
/// shown verbatim in monospace rather than mapped to anything.
pub fn destination_badge(ui: &mut egui::Ui, destination: &str) {
    ui.label(
        egui::RichText::new(destination)
            .monospace()
            .strong()
            .color(egui::Color32::from_rgb(80, 160, 255)),
    );
}

/// Render the submit button, honoring the readiness gate
/// Shows "Thinking…" and stays disabled while a dispatch is in flight
pub fn ask_button(ui: &mut egui::Ui, ready: bool, pending: bool) -> egui::Response {
    let label = if pending { "Thinking…" } else { "▶ Ask" };
    ui.add_enabled(
        ready,
        egui::Button::new(egui::RichText::new(label).strong()),
    )
}

/// Render an error banner for a failed dispatch
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(
        egui::Color32::from_rgb(220, 0, 0),
        format!("⚠ {}", message),
    );
}

/// Activity log display area
/// Provides a scrollable text area mirroring dispatch lifecycle events
pub struct ActivityLog {
    /// Buffer of log lines
    lines: Vec<String>,
    /// Maximum number of lines to keep (0 = unlimited)
    max_lines: usize,
    /// Whether to auto-scroll to bottom
    auto_scroll: bool,
}

impl ActivityLog {
    /// Create a new activity log display
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_lines,
            auto_scroll: true,
        }
    }

    /// Add a line to the log
    pub fn add_line(&mut self, line: String) {
        self.lines.push(line);
        if self.max_lines > 0 && self.lines.len() > self.max_lines {
            self.lines.remove(0);
        }
    }

    /// Clear all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Render the log in a scrollable area
    pub fn render(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Activity").heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if ui.button("Clear").clicked() {
                    self.clear();
                }
                ui.add_space(8.0);
                ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
            });
        });
        ui.add_space(4.0);
        ui.separator();
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_source("activity_log_scroll")
            .auto_shrink([false; 2])
            .max_height(140.0)
            .show(ui, |ui| {
                ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 2.0);

                for line in &self.lines {
                    ui.add_space(2.0);
                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new(line)
                                .size(12.0)
                                .family(egui::FontFamily::Monospace),
                        );
                    });
                }

                if self.auto_scroll && !self.lines.is_empty() {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(500)
    }
}
