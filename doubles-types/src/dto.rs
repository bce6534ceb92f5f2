//! Request body parsing and validation.
//!
//! Bodies are parsed in two steps so that the checks run in a fixed order:
//! first the raw JSON object (presence checks, the `conflict` flag), then
//! the typed view. Unknown keys are ignored and a JSON `null` counts as
//! "not provided".

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::OrderId;
use crate::error::AppError;

/// A request body that parsed as a non-empty JSON object.
pub type JsonObject = Map<String, Value>;

/// Name of the body flag that forces a simulated update conflict.
pub const CONFLICT_FLAG: &str = "conflict";

/// Parses a raw request body.
///
/// Missing, malformed, non-object and empty-object bodies are all rejected
/// with `Invalid JSON`.
pub fn parse_body(bytes: &[u8]) -> Result<JsonObject, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(AppError::Validation("Invalid JSON".into())),
    }
}

/// Checks field presence in list order; the first absent field names the error.
/// A `null` value counts as absent.
pub fn require_fields(body: &JsonObject, fields: &[&str]) -> Result<(), AppError> {
    match fields.iter().find(|f| body.get(**f).is_none_or(Value::is_null)) {
        Some(missing) => Err(AppError::Validation(format!("{missing} is required"))),
        None => Ok(()),
    }
}

/// `true` only for a literal JSON `true` under `conflict`.
pub fn conflict_requested(body: &JsonObject) -> bool {
    matches!(body.get(CONFLICT_FLAG), Some(Value::Bool(true)))
}

/// Builds the typed view of a body. Nulls are dropped first, then every
/// field listed in `text_fields` must hold a JSON string.
fn from_object<T: DeserializeOwned>(
    mut body: JsonObject,
    text_fields: &[&str],
) -> Result<T, AppError> {
    body.retain(|_, v| !v.is_null());
    if let Some(field) = text_fields
        .iter()
        .find(|f| body.get(**f).is_some_and(|v| !v.is_string()))
    {
        return Err(AppError::Validation(format!("{field} must be a string")));
    }
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Issue DTOs
// ─────────────────────────────────────────────────────────────────────────────

const ISSUE_TEXT_FIELDS: &[&str] = &["errorCode", "errorMessage", "severity"];

/// Body of `POST /issues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    #[serde(deserialize_with = "order_id::required")]
    pub order_id: OrderId,
    pub error_code: String,
    pub error_message: String,
    pub severity: String,
}

impl NewIssue {
    pub const REQUIRED: &'static [&'static str] =
        &["orderId", "errorCode", "errorMessage", "severity"];

    pub fn from_body(body: JsonObject) -> Result<Self, AppError> {
        require_fields(&body, Self::REQUIRED)?;
        from_object(body, ISSUE_TEXT_FIELDS)
    }
}

/// Body of `PUT`/`PATCH /issues/{id}`. Every field is optional; `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueChanges {
    #[serde(default, deserialize_with = "order_id::optional")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl IssueChanges {
    pub fn from_body(body: JsonObject) -> Result<Self, AppError> {
        from_object(body, ISSUE_TEXT_FIELDS)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

const PAYMENT_TEXT_FIELDS: &[&str] = &["status", "externalTxId"];

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    #[serde(deserialize_with = "order_id::required")]
    pub order_id: OrderId,
    pub amount: Value,
    pub currency: Value,
    /// Defaults to `PENDING`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_tx_id: Option<String>,
}

impl NewPayment {
    pub const REQUIRED: &'static [&'static str] = &["amount", "currency", "orderId"];

    pub fn from_body(body: JsonObject) -> Result<Self, AppError> {
        require_fields(&body, Self::REQUIRED)?;
        from_object(body, PAYMENT_TEXT_FIELDS)
    }
}

/// Body of `PUT`/`PATCH /payments/{orderId}`. `orderId` is the key and is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_tx_id: Option<String>,
}

impl PaymentChanges {
    pub fn from_body(body: JsonObject) -> Result<Self, AppError> {
        from_object(body, PAYMENT_TEXT_FIELDS)
    }
}

/// Body returned by both delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Query accepted by both delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    pub conflict: Option<String>,
}

impl DeleteParams {
    /// Only the exact text `true` triggers the simulated conflict.
    pub fn conflict_requested(&self) -> bool {
        self.conflict.as_deref() == Some("true")
    }
}

/// Order ids arrive as JSON integers or as numeric strings.
mod order_id {
    use super::*;

    fn coerce<E: de::Error>(raw: Value) -> Result<OrderId, E> {
        let parsed = match &raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| E::custom("orderId must be an integer"))
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<OrderId, D::Error> {
        coerce(Value::deserialize(d)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OrderId>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            raw => coerce(raw).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> JsonObject {
        match v {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_body_rejects_non_objects() {
        for raw in ["", "not json", "[]", "[1]", "42", "{}", "null"] {
            let err = parse_body(raw.as_bytes()).unwrap_err();
            assert_eq!(validation_message(err), "Invalid JSON", "input {raw:?}");
        }
        assert!(parse_body(br#"{"a":1}"#).is_ok());
    }

    #[test]
    fn test_first_missing_field_names_the_error() {
        let body = object(json!({ "orderId": 1, "severity": "LOW" }));
        let err = NewIssue::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "errorCode is required");

        let body = object(json!({ "orderId": 1 }));
        let err = NewPayment::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "amount is required");
    }

    #[test]
    fn test_order_id_accepts_numeric_strings() {
        let body = object(json!({
            "orderId": "17",
            "errorCode": "E",
            "errorMessage": "m",
            "severity": "LOW"
        }));
        assert_eq!(NewIssue::from_body(body).unwrap().order_id, 17);
    }

    #[test]
    fn test_order_id_rejects_garbage() {
        let body = object(json!({ "orderId": "seventeen", "amount": 1, "currency": "USD" }));
        let err = NewPayment::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "orderId must be an integer");
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        let body = object(json!({ "severity": 3 }));
        let err = IssueChanges::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "severity must be a string");

        let body = object(json!({
            "orderId": 5,
            "errorCode": 7,
            "errorMessage": "m",
            "severity": "LOW"
        }));
        let err = NewIssue::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "errorCode must be a string");

        let body = object(json!({ "orderId": 5, "amount": 1, "currency": "USD", "status": [] }));
        let err = NewPayment::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "status must be a string");
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let body = object(json!({
            "orderId": 5,
            "errorCode": null,
            "errorMessage": "m",
            "severity": "LOW"
        }));
        let err = NewIssue::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "errorCode is required");

        let body = object(json!({ "orderId": null, "amount": 1, "currency": "USD" }));
        let err = NewPayment::from_body(body).unwrap_err();
        assert_eq!(validation_message(err), "orderId is required");
    }

    #[test]
    fn test_null_optional_payment_fields_fall_back_to_defaults() {
        let body = object(json!({
            "orderId": 5,
            "amount": 1,
            "currency": "USD",
            "status": null,
            "externalTxId": null
        }));
        let payment = NewPayment::from_body(body).unwrap();
        assert_eq!(payment.status, None);
        assert_eq!(payment.external_tx_id, None);
    }

    #[test]
    fn test_changes_ignore_unknown_keys_and_nulls() {
        let body = object(json!({
            "id": 99,
            "severity": "HIGH",
            "errorCode": null,
            "extra": "ignored",
            "conflict": false
        }));
        let changes = IssueChanges::from_body(body).unwrap();
        assert_eq!(
            changes,
            IssueChanges {
                severity: Some("HIGH".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_payment_changes_ignore_order_id() {
        let body = object(json!({ "orderId": 5, "amount": 12.5 }));
        let changes = PaymentChanges::from_body(body).unwrap();
        assert_eq!(changes.amount, Some(json!(12.5)));
        assert_eq!(changes.status, None);
    }

    #[test]
    fn test_conflict_flag_must_be_literal_true() {
        assert!(conflict_requested(&object(json!({ "conflict": true }))));
        assert!(!conflict_requested(&object(json!({ "conflict": "true" }))));
        assert!(!conflict_requested(&object(json!({ "conflict": 1 }))));
        assert!(!conflict_requested(&object(json!({ "severity": "LOW" }))));
    }

    #[test]
    fn test_delete_conflict_param() {
        let on = DeleteParams {
            conflict: Some("true".into()),
        };
        let off = DeleteParams {
            conflict: Some("TRUE".into()),
        };
        assert!(on.conflict_requested());
        assert!(!off.conflict_requested());
        assert!(!DeleteParams::default().conflict_requested());
    }
}
