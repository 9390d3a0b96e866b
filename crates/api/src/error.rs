//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::CorrelationId;
use domain::SubscriptionError;
use orchestration::OrchestrationError;

/// API-level error carrying the request's correlation id.
#[derive(Debug)]
pub struct ApiError {
    correlation_id: CorrelationId,
    kind: ApiErrorKind,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    /// Bad request from the client.
    BadRequest(String),
    /// Error surfaced by the subscription service.
    Orchestration(OrchestrationError),
}

impl ApiError {
    pub fn bad_request(correlation_id: CorrelationId, message: impl Into<String>) -> Self {
        Self {
            correlation_id,
            kind: ApiErrorKind::BadRequest(message.into()),
        }
    }

    pub fn orchestration(correlation_id: CorrelationId, error: OrchestrationError) -> Self {
        Self {
            correlation_id,
            kind: ApiErrorKind::Orchestration(error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self.kind {
            ApiErrorKind::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg, "Invalid request".to_string())
            }
            ApiErrorKind::Orchestration(err) => orchestration_error_to_response(err),
        };

        if status.is_server_error() {
            tracing::error!(
                %error,
                correlation_id = %self.correlation_id,
                "request failed"
            );
        }

        let body = serde_json::json!({
            "error": error,
            "message": message,
            "correlation_id": self.correlation_id,
            "status_code": status.as_u16(),
        });
        (status, axum::Json(body)).into_response()
    }
}

fn orchestration_error_to_response(err: OrchestrationError) -> (StatusCode, String, String) {
    let status = match &err {
        OrchestrationError::Domain(domain_err) => match domain_err {
            SubscriptionError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            SubscriptionError::InvalidPlanId
            | SubscriptionError::EmptyId { .. }
            | SubscriptionError::UnknownStatus { .. } => StatusCode::BAD_REQUEST,
        },
        OrchestrationError::NotFound(_) => StatusCode::NOT_FOUND,
        OrchestrationError::Provisioning { .. } => StatusCode::BAD_GATEWAY,
        OrchestrationError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match status {
        StatusCode::NOT_FOUND => "Subscription not found",
        StatusCode::CONFLICT => "Invalid subscription status transition",
        StatusCode::BAD_REQUEST => "Invalid request",
        StatusCode::BAD_GATEWAY => "Customer service unavailable",
        _ => "Internal server error",
    };

    (status, err.to_string(), message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{SubscriptionId, SubscriptionStatus};

    fn corr() -> CorrelationId {
        CorrelationId::new("corr-test")
    }

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError::orchestration(
            corr(),
            OrchestrationError::NotFound(SubscriptionId::new()),
        );
        assert_eq!(status_of(error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let error = ApiError::orchestration(
            corr(),
            OrchestrationError::Domain(SubscriptionError::InvalidStatusTransition {
                status: SubscriptionStatus::Cancelled,
                action: "activate",
            }),
        );
        assert_eq!(status_of(error), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_error_maps_to_400() {
        let error = ApiError::orchestration(
            corr(),
            OrchestrationError::Domain(SubscriptionError::InvalidPlanId),
        );
        assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
    }
}
