#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! HTTP API delivering contact form submissions by email

use anyhow::Result;
use clap::Parser;
use contact_form::{
    domain::contact::FormController,
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{
            rate_limit::RateLimitConfig, servers::http::HttpServer, state::AppState,
            HttpServerConfig, Server,
        },
    },
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// Rate limiting for the API
    #[clap(flatten)]
    pub rate_limit: RateLimitConfig,

    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mail_config = args.smtp.mail_config()?;
    let mailer = SMTPMailer::new(mail_config.clone(), args.smtp.verify_tls);

    info!(
        "delivering contact messages via {}:{} to {} recipient(s)",
        mail_config.host(),
        mail_config.port(),
        mail_config.recipients().len()
    );

    let state = AppState::new(FormController::new(mail_config, mailer));

    HttpServer::new(&args.server, &args.rate_limit, state)
        .await?
        .run()
        .await
}
