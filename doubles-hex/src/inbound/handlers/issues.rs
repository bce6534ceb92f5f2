//! Order issue endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use doubles_types::{
    DateRange, DeleteParams, Deleted, IssueFilter, IssueId, IssueRepository, OrderId,
};

use super::{ApiError, FirstValueQuery, parse_key};
use crate::IssueService;

const ISSUE_NOT_FOUND: &str = "Issue not found";

/// State shared across issue handlers.
pub struct IssuesState<R: IssueRepository> {
    pub service: IssueService<R>,
}

fn issue_id(raw: &str) -> Result<IssueId, ApiError> {
    Ok(parse_key(raw, ISSUE_NOT_FOUND)?)
}

/// `GET /issues?orderId=&severity=&since=`
#[tracing::instrument(skip(state))]
pub async fn list_issues<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    FirstValueQuery(filter): FirstValueQuery<IssueFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let issues = state.service.list(&filter).await?;
    Ok(Json(issues))
}

/// `GET /issues/by-date?from=&to=`
#[tracing::instrument(skip(state))]
pub async fn issues_by_date<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    FirstValueQuery(range): FirstValueQuery<DateRange>,
) -> Result<impl IntoResponse, ApiError> {
    let issues = state.service.list_by_date(&range).await?;
    Ok(Json(issues))
}

/// `GET /issues/{id}`
#[tracing::instrument(skip(state), fields(issue_id = %id))]
pub async fn get_issue<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let issue = state.service.get(issue_id(&id)?).await?;
    Ok(Json(issue))
}

/// `GET /orders/{orderId}/issues`
#[tracing::instrument(skip(state), fields(order_id = %order_id))]
pub async fn issues_for_order<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order_id: OrderId = parse_key(&order_id, ISSUE_NOT_FOUND)?;
    let issues = state.service.list_for_order(order_id).await?;
    Ok(Json(issues))
}

/// `POST /issues`
#[tracing::instrument(skip_all)]
pub async fn create_issue<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let issue = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// `PUT /issues/{id}`
#[tracing::instrument(skip(state, body), fields(issue_id = %id))]
pub async fn replace_issue<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let issue = state.service.replace(issue_id(&id)?, &body).await?;
    Ok(Json(issue))
}

/// `PATCH /issues/{id}`
#[tracing::instrument(skip(state, body), fields(issue_id = %id))]
pub async fn patch_issue<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let issue = state.service.patch(issue_id(&id)?, &body).await?;
    Ok(Json(issue))
}

/// `DELETE /issues/{id}?conflict=true`
#[tracing::instrument(skip(state), fields(issue_id = %id))]
pub async fn delete_issue<R: IssueRepository>(
    State(state): State<Arc<IssuesState<R>>>,
    Path(id): Path<String>,
    FirstValueQuery(params): FirstValueQuery<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(issue_id(&id)?, &params).await?;
    Ok(Json(Deleted { deleted: true }))
}
