//! Servers for the HTTP API

pub mod http;
