//! Contact form submission handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::contact::{ContactService, FormFields, RequiredField, SendOutcome, StatusIndicator},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Contact form response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Which status indicator to show
    #[schema(example = "success")]
    pub status: StatusIndicator,

    /// A message to show the visitor
    #[schema(example = "Your message has been sent.")]
    pub message: String,

    /// Required fields that were left blank
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<RequiredField>,
}

impl From<&SendOutcome> for ContactResponse {
    fn from(outcome: &SendOutcome) -> Self {
        let missing = match outcome {
            SendOutcome::ValidationFailed(err) => err.missing().to_vec(),
            _ => Vec::new(),
        };

        Self {
            status: outcome.status(),
            message: outcome.message(),
            missing,
        }
    }
}

fn status_code(outcome: &SendOutcome) -> StatusCode {
    match outcome {
        SendOutcome::Success => StatusCode::CREATED,
        SendOutcome::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SendOutcome::DeliveryFailed => StatusCode::BAD_GATEWAY,
    }
}

/// Send a message through the contact form
#[utoipa::path(
    post,
    operation_id = "send_contact_message",
    tag = "Contact",
    path = "/api/v1/contact",
    request_body = FormFields,
    responses(
        (status = StatusCode::CREATED, description = "Message sent", body = ContactResponse, example = json!({"status": "success", "message": "Your message has been sent."})),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "A required field is blank", body = ContactResponse, example = json!({"status": "warning", "message": "Please fill in the required fields: e-mail.", "missing": ["email"]})),
        (status = StatusCode::BAD_GATEWAY, description = "The message could not be delivered", body = ContactResponse),
        (status = StatusCode::TOO_MANY_REQUESTS, description = "Too many requests"),
    )
)]
pub async fn handler<C: ContactService>(
    State(state): State<AppState<C>>,
    request: Result<Json<FormFields>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let Json(fields) = request?;

    let outcome = state.contact.send_message(&fields).await;

    Ok((status_code(&outcome), Json(ContactResponse::from(&outcome))))
}
