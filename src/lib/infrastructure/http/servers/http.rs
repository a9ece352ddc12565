//! The application's HTTP server.

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{async_trait, Router};
use axum_server::Handle;
use tracing::{debug, info};

use crate::{
    domain::contact::ContactService,
    infrastructure::http::{
        rate_limit::{rate_limited, RateLimitConfig},
        router, shutdown_signal,
        state::AppState,
        HttpServerConfig, Server,
    },
};

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
    shutdown_grace: Duration,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new<C: ContactService>(
        config: &HttpServerConfig,
        rate_limit: &RateLimitConfig,
        state: AppState<C>,
    ) -> Result<Self> {
        let router = rate_limited(router(state), rate_limit)?;

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.port))?;
        listener
            .set_nonblocking(true)
            .context("failed to make listener non-blocking")?;

        Ok(Self {
            router,
            listener,
            shutdown_grace: Duration::from_secs(config.shutdown_grace),
        })
    }
}

#[async_trait]
impl Server for HttpServer {
    /// Runs the HTTP server.
    #[mutants::skip]
    async fn run(self) -> Result<()> {
        debug!(
            "HTTP Server listening on {}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
        );

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(
                self.router
                    .into_make_service_with_connect_info::<SocketAddr>(),
            );

        tokio::spawn(shutdown_signal(Some(handle), self.shutdown_grace));

        server.await.context("server error")?;
        info!("HTTP server stopped");

        Ok(())
    }
}
