//! Order Issues API client.

use doubles_types::{
    DateRange, Deleted, Issue, IssueChanges, IssueFilter, IssueId, NewIssue, OrderId,
};
use reqwest::Method;
use serde_json::json;

use crate::{ClientError, Transport};

const NO_QUERY: &[(&str, &str)] = &[];

/// Order Issues API client.
#[derive(Debug, Clone)]
pub struct IssuesClient {
    transport: Transport,
}

impl IssuesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        self.transport.health().await
    }

    pub async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ClientError> {
        self.transport.get("/issues", filter).await
    }

    pub async fn issues_by_date(&self, range: &DateRange) -> Result<Vec<Issue>, ClientError> {
        self.transport.get("/issues/by-date", range).await
    }

    pub async fn get_issue(&self, id: IssueId) -> Result<Issue, ClientError> {
        self.transport.get(&format!("/issues/{}", id), NO_QUERY).await
    }

    pub async fn issues_for_order(&self, order_id: OrderId) -> Result<Vec<Issue>, ClientError> {
        self.transport
            .get(&format!("/orders/{}/issues", order_id), NO_QUERY)
            .await
    }

    pub async fn create_issue(&self, issue: &NewIssue) -> Result<Issue, ClientError> {
        self.transport.send_json(Method::POST, "/issues", issue).await
    }

    /// Full update (`PUT`).
    pub async fn replace_issue(
        &self,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Issue, ClientError> {
        self.transport
            .send_json(Method::PUT, &format!("/issues/{}", id), changes)
            .await
    }

    /// Partial update (`PATCH`).
    pub async fn patch_issue(
        &self,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Issue, ClientError> {
        self.transport
            .send_json(Method::PATCH, &format!("/issues/{}", id), changes)
            .await
    }

    /// Sends a `PATCH` carrying `conflict: true`; an existing issue answers 409.
    pub async fn simulate_update_conflict(&self, id: IssueId) -> Result<Issue, ClientError> {
        self.transport
            .send_json(
                Method::PATCH,
                &format!("/issues/{}", id),
                &json!({ "conflict": true }),
            )
            .await
    }

    /// Deletes an issue. With `simulate_conflict` an existing issue answers 409
    /// and stays in place.
    pub async fn delete_issue(
        &self,
        id: IssueId,
        simulate_conflict: bool,
    ) -> Result<Deleted, ClientError> {
        self.transport
            .delete(&format!("/issues/{}", id), simulate_conflict)
            .await
    }
}
