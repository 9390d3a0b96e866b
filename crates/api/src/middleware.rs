//! Correlation id middleware.
//!
//! Every request carries a correlation id: the inbound `X-Correlation-ID`
//! header when present, a generated one otherwise. The id is stored in the
//! request extensions for handlers and echoed on every response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use common::CorrelationId;

pub const CORRELATION_HEADER: &str = "X-Correlation-ID";

pub async fn correlation(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(CorrelationId::new)
        .unwrap_or_else(|| CorrelationId::generate("subscription"));

    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}
