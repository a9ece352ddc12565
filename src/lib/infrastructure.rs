//! Adapters connecting the domain to SMTP and HTTP.

pub mod email;
pub mod http;
