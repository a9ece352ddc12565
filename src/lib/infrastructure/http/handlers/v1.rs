//! Version 1 of the API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::contact::ContactService,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod contact;
pub mod stoplight;
pub mod uptime;

/// Mount point of this API version
pub const BASE_PATH: &str = "/api/v1";

/// Route serving the OpenAPI document, relative to [`BASE_PATH`]
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Routes under `/api/v1`
pub fn router<C: ContactService>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route(OPENAPI_PATH, get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/contact", post(contact::handler))
}
