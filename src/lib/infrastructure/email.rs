//! Outbound email over SMTP

pub mod session;
pub mod smtp;
