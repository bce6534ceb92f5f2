//! List filters built from query parameters.
//!
//! Every predicate is optional and predicates combine with AND. An absent or
//! empty parameter imposes no constraint. Matching keeps store order.

use serde::{Deserialize, Serialize};

use super::issue::{Issue, OrderId};
use super::payment::Payment;

/// Query for `GET /issues`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFilter {
    /// Compared against the record's order id rendered as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Inclusive lower bound on `timestamp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        order_id_matches(&self.order_id, issue.order_id)
            && constraint(&self.severity).is_none_or(|s| issue.severity == s)
            && constraint(&self.since).is_none_or(|s| issue.timestamp.is_at_or_after(s))
    }

    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        issues.into_iter().filter(|i| self.matches(i)).collect()
    }
}

/// Query for `GET /issues/by-date`: an inclusive `[from, to]` window on
/// `timestamp`, either bound optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl DateRange {
    pub fn matches(&self, issue: &Issue) -> bool {
        constraint(&self.from).is_none_or(|from| issue.timestamp.is_at_or_after(from))
            && constraint(&self.to).is_none_or(|to| issue.timestamp.is_at_or_before(to))
    }

    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        issues.into_iter().filter(|i| self.matches(i)).collect()
    }
}

/// Query for `GET /payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        order_id_matches(&self.order_id, payment.order_id)
            && constraint(&self.status).is_none_or(|s| payment.status == s)
            && constraint(&self.since).is_none_or(|s| payment.timestamp.is_at_or_after(s))
    }

    pub fn apply(&self, payments: Vec<Payment>) -> Vec<Payment> {
        payments.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn constraint(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|p| !p.is_empty())
}

fn order_id_matches(param: &Option<String>, order_id: OrderId) -> bool {
    constraint(param).is_none_or(|wanted| order_id.to_string() == wanted)
}
