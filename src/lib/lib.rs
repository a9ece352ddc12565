#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Contact form library: validates a submitted form and delivers it as a
//! plain-text email over SMTP with STARTTLS.
//!
//! [`domain::contact::FormController`] holds the workflow and is usable from
//! any front end; [`infrastructure::http`] exposes it as a JSON API.

pub mod domain;
pub mod infrastructure;
