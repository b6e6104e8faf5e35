//! # Presence Chat
//!
//! Entry point: tracing, configuration, database, HTTP/WebSocket server.

use anyhow::Result;
use tracing::info;

use presence_chat::config::Settings;
use presence_chat::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    presence_chat::telemetry::init_tracing();

    info!("Starting Presence Chat...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    info!("Server stopped");
    Ok(())
}
