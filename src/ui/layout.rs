// Main application layout
// Handles window layout, panels, and overall UI structure

use crate::controller::{DispatchState, QueryController};
use crate::ui::components::*;
use crate::worker::DispatchWorker;
use eframe::egui;

/// Render the main application layout
/// Includes header bar, query input, answer card, and activity log
pub fn render_app_layout(
    ctx: &egui::Context,
    controller: &mut QueryController,
    worker: &DispatchWorker,
    log: &mut ActivityLog,
) {
    render_header_bar(ctx, controller);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical(|ui| {
            ui.add_space(12.0);
            render_query_input(ui, controller, worker, log);

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            render_answer_view(ui, controller);

            ui.add_space(8.0);
            ui.separator();
            log.render(ui);
            ui.add_space(8.0);
        });
    });
}

/// Render the top header bar with the app title and lifecycle badge
fn render_header_bar(ctx: &egui::Context, controller: &QueryController) {
    egui::TopBottomPanel::top("header_bar").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.heading("🧠 Agentic Data Router");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                state_badge(ui, controller.state());
            });
        });
        ui.add_space(6.0);
    });
}

/// Render the query input area and the submit button
///
/// A click on the button is a submit intent; the controller applies the
/// readiness gate and, when it passes, the query is handed to the
/// background worker for dispatch.
fn render_query_input(
    ui: &mut egui::Ui,
    controller: &mut QueryController,
    worker: &DispatchWorker,
    log: &mut ActivityLog,
) {
    ui.label(egui::RichText::new("Your question").strong());
    ui.add_space(4.0);

    ui.add(
        egui::TextEdit::multiline(controller.input_mut())
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .hint_text("Ask a question..."),
    );

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.spacing_mut().button_padding = egui::vec2(12.0, 8.0);
        let clicked = ask_button(ui, controller.ready(), controller.is_pending()).clicked();
        if clicked {
            if let Some(query) = controller.start_dispatch() {
                log.add_line(format!("Dispatched query ({} chars)", query.len()));
                worker.send(query);
            }
        }

        if controller.is_pending() {
            ui.add_space(8.0);
            ui.spinner();
            ui.label(egui::RichText::new("Routing query…").weak());
        }
    });
}

/// Render the answer card, the failure banner, or the welcome text
fn render_answer_view(ui: &mut egui::Ui, controller: &QueryController) {
    if let DispatchState::Failed(err) = controller.state() {
        // The failure is shown explicitly, distinct from "no answer yet";
        // the previous answer (if any) stays visible below it.
        error_banner(ui, &err.to_string());
        ui.add_space(8.0);
    }

    match controller.last_result() {
        Some(result) => {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("📦 Source:").strong());
                        ui.add_space(4.0);
                        destination_badge(ui, &result.destination);
                    });
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(&result.response).size(15.0));
                        ui.add_space(8.0);
                    });
                    ui.add_space(8.0);
                });
            });
        }
        None => render_welcome_view(ui),
    }
}

/// Render welcome text before the first answer arrives
fn render_welcome_view(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new("Ask a question and the router picks the backend to answer it")
                .size(14.0)
                .weak(),
        );
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("The answering source is shown with each reply")
                .size(12.0)
                .weak()
                .italics(),
        );
    });
}
