mod app;
pub mod i18n;
mod ui;
mod viewport;

use std::time::Duration;

use app::ConfiguratorApp;
use nox_configurator_lib::state::settings::AppSettings;
use nox_configurator_lib::submit::{OrderClient, SubmissionDispatcher};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nox_configurator=info".into()),
        )
        .init();

    let settings = AppSettings::load();

    // Order requests run here; the UI thread only polls for results.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    let client = match OrderClient::new(
        settings.order_endpoint.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {e}");
            return;
        }
    };
    tracing::info!("Orders go to {}", client.endpoint());
    let dispatcher = SubmissionDispatcher::new(client, runtime.handle().clone());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("NOX Metals: Custom Aluminum Block Order")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        depth_buffer: 24,
        multisampling: 4,
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "nox-configurator",
        native_options,
        Box::new(move |cc| Ok(Box::new(ConfiguratorApp::new(cc, settings, dispatcher)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
