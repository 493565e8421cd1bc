//! Shopfront JSON API Server

use std::{process, sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use shopfront_app::{
    context::AppContext,
    notifications::{GmailNotifier, LogNotifier, Notifier},
};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod reports;
mod router;
mod sales;
mod shutdown;
mod staff;
mod state;
#[cfg(test)]
mod test_helpers;
mod warranties;
mod warranty_fields;

/// Shopfront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let notifier: Arc<dyn Notifier> = match config.mail.gmail() {
        Some(gmail) => {
            info!(sender = %gmail.sender, "sending warranty emails through Gmail");

            Arc::new(GmailNotifier::new(gmail))
        }
        None => {
            info!("Gmail is not configured, warranty emails will only be logged");

            Arc::new(LogNotifier)
        }
    };

    let (app, notification_worker) =
        match AppContext::from_database_url(&config.database.database_url, notifier).await {
            Ok(app) => app,
            Err(init_error) => {
                error!("failed to initialize app context: {init_error}");

                process::exit(1);
            }
        };

    let mut router = Router::new()
        .hoop(observability::request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler));

    if config.observability.metrics_enabled {
        router = router.push(Router::with_path("metrics").get(observability::metrics_handler));
    }

    let router = router.push(router::app_router());

    let doc = OpenApi::new("Shopfront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = shutdown::grace_period(config.server.shutdown_grace_seconds);

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    // Let queued warranty emails drain
    match tokio::time::timeout(NOTIFICATION_DRAIN_TIMEOUT, notification_worker).await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => error!("notification worker failed: {error}"),
        Err(_) => error!("gave up waiting for queued warranty emails"),
    }

    observability.shutdown();
}
