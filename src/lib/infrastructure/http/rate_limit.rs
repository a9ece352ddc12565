//! Per-client rate limiting

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    response::IntoResponse,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};
use tracing::debug;

use super::errors::ApiError;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct RateLimitConfig {
    /// Sustained requests per second allowed from one client (1 to 1000)
    #[clap(long, env = "RATE_LIMIT_PER_SECOND", default_value = "2")]
    pub requests_per_second: u64,

    /// The number of requests allowed in a burst
    #[clap(long, env = "RATE_LIMIT_BURST_SIZE", default_value = "5")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2,
            burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// Time to earn back one request of quota, `None` for an unusable rate
    pub fn replenish_interval(&self) -> Option<Duration> {
        match 1000_u64.checked_div(self.requests_per_second) {
            Some(millis) if millis > 0 => Some(Duration::from_millis(millis)),
            _ => None,
        }
    }
}

/// Body of a 429 response
#[derive(Debug, Serialize, Deserialize)]
pub struct TooManyRequestsResponse {
    /// Seconds until the next request is allowed
    pub retry_after: u64,
}

/// Limits requests to `router` per peer IP address.
///
/// The router must be served with `into_make_service_with_connect_info`.
pub fn rate_limited(router: Router, config: &RateLimitConfig) -> Result<Router> {
    let interval = config
        .replenish_interval()
        .context("requests per second must be between 1 and 1000")?;

    let governor = GovernorConfigBuilder::default()
        .per_millisecond(interval.as_millis() as u64)
        .burst_size(config.burst_size)
        .error_handler(rate_limit_error_handler)
        .finish()
        .context("invalid rate limit configuration")?;

    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor),
    }))
}

/// Rate limit error handler
pub fn rate_limit_error_handler(err: GovernorError) -> Response<Body> {
    match err {
        GovernorError::TooManyRequests { wait_time, .. } => {
            debug!("rate limited, retry after {wait_time}s");

            let body = json!(TooManyRequestsResponse {
                retry_after: wait_time
            })
            .to_string();

            (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::RETRY_AFTER, wait_time.to_string()),
                ],
                body,
            )
                .into_response()
        }
        _ => ApiError::new_500("Internal Server Error").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_too_many_requests() -> TestResult {
        let response = rate_limit_error_handler(GovernorError::TooManyRequests {
            wait_time: 3,
            headers: None,
        });

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "3");

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: TooManyRequestsResponse = serde_json::from_slice(&body)?;

        assert_eq!(json.retry_after, 3);

        Ok(())
    }

    #[test]
    fn test_unextractable_key_is_server_error() {
        let response = rate_limit_error_handler(GovernorError::UnableToExtractKey);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rate_limited_router() {
        assert!(rate_limited(Router::new(), &RateLimitConfig::default()).is_ok());
    }

    #[test]
    fn test_default_allows_two_requests_per_second() {
        assert_eq!(
            RateLimitConfig::default().replenish_interval(),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let config = RateLimitConfig {
            requests_per_second: 0,
            burst_size: 5,
        };

        assert_eq!(config.replenish_interval(), None);
        assert!(rate_limited(Router::new(), &config).is_err());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            requests_per_second: 2,
            burst_size: 0,
        };

        assert!(rate_limited(Router::new(), &config).is_err());
    }
}
