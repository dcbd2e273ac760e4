// Agentic Router Client - Main Entry Point
// Native Rust GUI client for the agentic query router

use agentic_router_client::config::Config;
use agentic_router_client::controller::QueryController;
use agentic_router_client::transport::RouterClient;
use agentic_router_client::ui::{render_app_layout, ActivityLog};
use agentic_router_client::worker::DispatchWorker;
use eframe::egui;
use std::time::Duration;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // The transport lives on a background thread; the UI only exchanges
    // queries and outcomes with it over channels.
    let client = RouterClient::new(&config.router)?;
    let worker = DispatchWorker::spawn(client)?;

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agentic Data Router")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    let mut app = RouterClientApp::new(worker);
    app.log
        .add_line(format!("Router endpoint: {}", config.router.base_url));

    // Run the application
    eframe::run_native(
        "Agentic Data Router",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {e}"))?;

    Ok(())
}

/// Main application struct
/// Owns the lifecycle controller, the dispatch worker handle, and the log
struct RouterClientApp {
    /// Query-dispatch lifecycle state
    controller: QueryController,
    /// Handle to the background dispatch thread
    worker: DispatchWorker,
    /// In-app activity log
    log: ActivityLog,
}

impl RouterClientApp {
    /// Create a new application instance around a spawned worker
    fn new(worker: DispatchWorker) -> Self {
        Self {
            controller: QueryController::new(),
            worker,
            log: ActivityLog::new(500),
        }
    }

    /// Drain settled outcomes from the worker into the controller
    fn pump_outcomes(&mut self) {
        while let Some(outcome) = self.worker.try_recv() {
            match &outcome {
                Ok(result) => self
                    .log
                    .add_line(format!("Answered by {}", result.destination)),
                Err(err) => self.log.add_line(format!("Dispatch failed: {}", err)),
            }
            self.controller.finish_dispatch(outcome);
        }
    }
}

impl eframe::App for RouterClientApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_outcomes();

        render_app_layout(ctx, &mut self.controller, &self.worker, &mut self.log);

        // Keep polling for the outcome while a dispatch is in flight.
        if self.controller.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
