//! Payment endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use doubles_types::{DeleteParams, Deleted, OrderId, PaymentFilter, PaymentRepository};

use super::{ApiError, FirstValueQuery, parse_key};
use crate::PaymentService;

/// State shared across payment handlers.
pub struct PaymentsState<R: PaymentRepository> {
    pub service: PaymentService<R>,
}

fn order_id(raw: &str) -> Result<OrderId, ApiError> {
    Ok(parse_key(raw, "Payment not found")?)
}

/// `GET /payments?orderId=&status=&since=`
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    FirstValueQuery(filter): FirstValueQuery<PaymentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.service.list(&filter).await?;
    Ok(Json(payments))
}

/// `GET /payments/{orderId}/status`
#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn payment_status<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.service.status(order_id(&id)?).await?;
    Ok(Json(status))
}

/// `POST /payments`
#[tracing::instrument(skip_all)]
pub async fn create_payment<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// `PUT /payments/{orderId}`
#[tracing::instrument(skip(state, body), fields(order_id = %id))]
pub async fn replace_payment<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.replace(order_id(&id)?, &body).await?;
    Ok(Json(payment))
}

/// `PATCH /payments/{orderId}`
#[tracing::instrument(skip(state, body), fields(order_id = %id))]
pub async fn patch_payment<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.patch(order_id(&id)?, &body).await?;
    Ok(Json(payment))
}

/// `DELETE /payments/{orderId}?conflict=true`
#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn delete_payment<R: PaymentRepository>(
    State(state): State<Arc<PaymentsState<R>>>,
    Path(id): Path<String>,
    FirstValueQuery(params): FirstValueQuery<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(order_id(&id)?, &params).await?;
    Ok(Json(Deleted { deleted: true }))
}
