pub use crate::error::Result;
use crate::config::Config;
use crate::error::Error;
use crate::webhook::message_handler::Handler;
use crate::webhook::route::{AppState, get_router};
use crate::webhook::transport::{Telegram, Transport};
use log::{info, warn};
use std::sync::Arc;

mod config;
mod error;
mod webhook;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();
    let config = Config::load_from_env()?;

    let telegram = Telegram::new(&config.api_url, &config.bot_token, config.api_timeout)
        .map_err(Error::Client)?;
    let transport: Arc<dyn Transport> = Arc::new(telegram);
    if let Some(url) = &config.webhook_url {
        match transport
            .set_webhook(url, config.webhook_secret.as_deref())
            .await
        {
            Ok(()) => info!("Webhook registered at {url}"),
            Err(e) => warn!("setWebhook failed: {e}"),
        }
    }

    let handler = Handler::new(config.reply_mode, transport);
    let app = get_router(AppState::new(handler, config.webhook_secret.clone()));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Bind(addr.clone(), e))?;
    info!("Listening on {addr} in {} mode", config.reply_mode);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
