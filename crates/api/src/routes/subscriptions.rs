//! Subscription endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::CorrelationId;
use orchestration::{
    CreateSubscription, CustomerProvisioning, EventSink, InstrumentedService, SubscriptionView,
};
use serde::{Deserialize, Serialize};
use store::SubscriptionStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, C, E>
where
    S: SubscriptionStore,
    C: CustomerProvisioning,
    E: EventSink,
{
    pub subscriptions: InstrumentedService<S, C, E>,
}

/// Standard success envelope carrying the request's correlation id.
#[derive(Serialize)]
pub struct SuccessResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub correlation_id: CorrelationId,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub customer_id: Option<String>,
}

/// POST /subscriptions — provision a customer and create a subscription.
#[tracing::instrument(skip(state, req))]
pub async fn create<S, C, E>(
    State(state): State<Arc<AppState<S, C, E>>>,
    Extension(correlation_id): Extension<CorrelationId>,
    Json(req): Json<CreateSubscription>,
) -> Result<(StatusCode, Json<SuccessResponse<SubscriptionView>>), ApiError>
where
    S: SubscriptionStore + 'static,
    C: CustomerProvisioning + 'static,
    E: EventSink + 'static,
{
    if req.customer_name.trim().is_empty() || req.customer_email.trim().is_empty() {
        return Err(ApiError::bad_request(
            correlation_id,
            "customer name and email are required",
        ));
    }

    let view = state
        .subscriptions
        .create_subscription(req, Some(correlation_id.clone()))
        .await
        .map_err(|err| ApiError::orchestration(correlation_id.clone(), err))?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            data: view,
            message: Some("Subscription created successfully"),
            correlation_id,
        }),
    ))
}

/// GET /subscriptions/:id — load a subscription by id.
#[tracing::instrument(skip(state))]
pub async fn get<S, C, E>(
    State(state): State<Arc<AppState<S, C, E>>>,
    Extension(correlation_id): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse<SubscriptionView>>, ApiError>
where
    S: SubscriptionStore + 'static,
    C: CustomerProvisioning + 'static,
    E: EventSink + 'static,
{
    let view = state
        .subscriptions
        .get_subscription_by_id(&id)
        .await
        .map_err(|err| ApiError::orchestration(correlation_id.clone(), err))?;

    Ok(Json(SuccessResponse {
        data: view,
        message: None,
        correlation_id,
    }))
}

/// GET /subscriptions — list all subscriptions, optionally filtered by
/// `customer_id`, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<S, C, E>(
    State(state): State<Arc<AppState<S, C, E>>>,
    Extension(correlation_id): Extension<CorrelationId>,
    Query(params): Query<ListParams>,
) -> Result<Json<SuccessResponse<Vec<SubscriptionView>>>, ApiError>
where
    S: SubscriptionStore + 'static,
    C: CustomerProvisioning + 'static,
    E: EventSink + 'static,
{
    let views = match params.customer_id.as_deref() {
        Some(customer_id) => {
            state
                .subscriptions
                .get_subscriptions_by_customer(customer_id)
                .await
        }
        None => state.subscriptions.get_all_subscriptions().await,
    }
    .map_err(|err| ApiError::orchestration(correlation_id.clone(), err))?;

    Ok(Json(SuccessResponse {
        data: views,
        message: None,
        correlation_id,
    }))
}

/// POST /subscriptions/:id/activate — activate a subscription.
#[tracing::instrument(skip(state))]
pub async fn activate<S, C, E>(
    State(state): State<Arc<AppState<S, C, E>>>,
    Extension(correlation_id): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse<SubscriptionView>>, ApiError>
where
    S: SubscriptionStore + 'static,
    C: CustomerProvisioning + 'static,
    E: EventSink + 'static,
{
    let view = state
        .subscriptions
        .activate_subscription(&id, Some(correlation_id.clone()))
        .await
        .map_err(|err| ApiError::orchestration(correlation_id.clone(), err))?;

    Ok(Json(SuccessResponse {
        data: view,
        message: Some("Subscription activated successfully"),
        correlation_id,
    }))
}
