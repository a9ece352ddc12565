//! HTTP API exposing the contact form

use std::time::Duration;

use anyhow::Result;
use axum::{async_trait, extract::Request, Router};
use axum_server::Handle;
use clap::Parser;
use handlers::v1;
use state::AppState;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer,
};
use tracing::{debug, info_span};

use crate::domain::contact::ContactService;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod rate_limit;
pub mod servers;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(long = "http-port", env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, env = "HTTP_SHUTDOWN_GRACE", default_value = "10")]
    pub shutdown_grace: u64,
}

/// A server that runs until shut down
#[async_trait]
pub trait Server {
    /// Serves requests until a shutdown signal arrives
    async fn run(self) -> Result<()>;
}

/// Create the application's router
pub fn router<C: ContactService>(state: AppState<C>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .nest(v1::BASE_PATH, v1::router())
        .layer(CatchPanicLayer::custom(handlers::panic_handler))
        .layer(CompressionLayer::new())
        .layer(trace_layer)
        .with_state(state)
}

#[mutants::skip]
pub(crate) async fn shutdown_signal(handle: Option<Handle>, grace: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(grace));
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use super::{router, state::tests::test_state};

    #[tokio::test]
    async fn test_unknown_route() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .get("/api/v2/contact")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_requires_post() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .get("/api/v1/contact")
            .await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

        Ok(())
    }
}
