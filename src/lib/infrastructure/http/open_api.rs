//! OpenAPI module

use utoipa::OpenApi;

use crate::{
    domain::contact::{FormFields, RequiredField, StatusIndicator},
    infrastructure::http::{errors::ErrorResponse, handlers::v1::*},
};

/// OpenAPI description of the API
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "ContactForm"),
    paths(contact::handler, uptime::handler),
    components(schemas(
        FormFields,
        RequiredField,
        StatusIndicator,
        contact::ContactResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
