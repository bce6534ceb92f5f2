//! Order issue service.

use doubles_types::{
    AppError, DateRange, DeleteParams, Issue, IssueChanges, IssueFilter, IssueId,
    IssueRepository, NewIssue, OrderId, conflict_requested, parse_body,
};

/// Application service for order issues.
pub struct IssueService<R: IssueRepository> {
    repo: R,
}

impl<R: IssueRepository> IssueService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, AppError> {
        let issues = self.repo.list_issues().await?;
        Ok(filter.apply(issues))
    }

    pub async fn list_by_date(&self, range: &DateRange) -> Result<Vec<Issue>, AppError> {
        let issues = self.repo.list_issues().await?;
        Ok(range.apply(issues))
    }

    /// Issues attached to one order. An order with no issues yields an empty list.
    pub async fn list_for_order(&self, order_id: OrderId) -> Result<Vec<Issue>, AppError> {
        let issues = self.repo.list_issues().await?;
        Ok(issues.into_iter().filter(|i| i.order_id == order_id).collect())
    }

    pub async fn get(&self, id: IssueId) -> Result<Issue, AppError> {
        self.repo.get_issue(id).await?.ok_or_else(not_found)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates the body, assigns the next id and stores the issue.
    pub async fn create(&self, body: &[u8]) -> Result<Issue, AppError> {
        let new = NewIssue::from_body(parse_body(body)?)?;
        let id = self.repo.next_issue_id().await?;
        let issue = self.repo.save_issue(Issue::new(id, new)).await?;
        tracing::info!(issue_id = %issue.id, order_id = issue.order_id, "issue created");
        Ok(issue)
    }

    /// Full update: every field takes the body value or keeps its prior value.
    pub async fn replace(&self, id: IssueId, body: &[u8]) -> Result<Issue, AppError> {
        self.update(id, body).await
    }

    /// Partial update: fields present in the body overwrite, the rest stay.
    pub async fn patch(&self, id: IssueId, body: &[u8]) -> Result<Issue, AppError> {
        self.update(id, body).await
    }

    // With a typed allow-list both update flavours reduce to the same merge.
    async fn update(&self, id: IssueId, body: &[u8]) -> Result<Issue, AppError> {
        let mut issue = self.get(id).await?;
        let body = parse_body(body)?;
        if conflict_requested(&body) {
            tracing::warn!(issue_id = %id, "simulated update conflict");
            return Err(AppError::Conflict("Simulated conflict".into()));
        }
        issue.apply(IssueChanges::from_body(body)?);
        Ok(self.repo.save_issue(issue).await?)
    }

    pub async fn delete(&self, id: IssueId, params: &DeleteParams) -> Result<(), AppError> {
        self.get(id).await?;
        if params.conflict_requested() {
            tracing::warn!(issue_id = %id, "simulated deletion conflict");
            return Err(AppError::Conflict("Simulated deletion conflict".into()));
        }
        if !self.repo.delete_issue(id).await? {
            return Err(not_found());
        }
        tracing::info!(issue_id = %id, "issue deleted");
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Issue not found".into())
}
