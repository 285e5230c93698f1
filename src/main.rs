use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use housepoints::{app::App, config::ClientConfig, console, gateway::HttpGateway};

// Single-threaded: UI state changes run to completion between gateway calls
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr so they don't interleave with the screen on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housepoints=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Using house points service at {}", config.backend_url);

    let gateway = match HttpGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(Arc::new(gateway));
    if let Err(e) = console::run(&mut app).await {
        tracing::error!("Terminal I/O failed: {}", e);
        std::process::exit(1);
    }
}
