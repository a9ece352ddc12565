//! API handler modules

use std::any::Any;

use axum::{body::Body, http::Response, response::IntoResponse};

use super::errors::ApiError;

pub mod v1;

/// Shown to the visitor instead of the panic payload, which may carry form contents
pub const PANIC_MESSAGE: &str = "The contact form hit an unexpected error, please try again later";

/// Log a handler panic and answer with a generic 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(details, "contact API handler panicked");

    ApiError::new_500(PANIC_MESSAGE).into_response()
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use axum::{body::to_bytes, http::StatusCode};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_panic_handler_hides_panic_payload() -> TestResult {
        let panic_info = simulate_panic();
        let response = panic_handler(panic_info);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json = serde_json::from_slice::<serde_json::Value>(&body)?;

        assert_eq!(json, serde_json::json!({ "error": PANIC_MESSAGE }));

        Ok(())
    }

    #[tokio::test]
    async fn test_panic_handler_accepts_any_payload() -> TestResult {
        let response = panic_handler(Box::new(42_u32));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert!(!body.is_empty());

        Ok(())
    }

    fn simulate_panic() -> Box<dyn std::any::Any + Send + 'static> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            panic!("failed to render message from ada@example.com");
        }));

        if let Err(err) = result {
            err
        } else {
            panic!("The panic did not occur as expected");
        }
    }
}
