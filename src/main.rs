use anyhow::{Context, Result};
use eframe::CreationContext;
use std::sync::Arc;
use tracing::info;
use webhook_uploader::app::WebhookUploader;
use webhook_uploader::config::UploaderConfig;
use webhook_uploader::logging::init_logging;
use webhook_uploader::upload::{HttpTransport, UploadOrchestrator};

fn main() -> Result<()> {
    init_logging();

    let config = UploaderConfig::load().context("Failed to load configuration")?;
    let endpoint = config.endpoint_url()?;
    info!("Uploading to {}", endpoint);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let transport = HttpTransport::new(endpoint.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let orchestrator = UploadOrchestrator::new(Arc::new(transport), endpoint.clone(), config.timing());
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Webhook File Uploader",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(WebhookUploader::new(cc, orchestrator, endpoint, handle))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    info!("Window closed, shutting down");
    Ok(())
}
