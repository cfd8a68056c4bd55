//! Extracts the operation id carried on an ingress message, minting a
//! fresh one when absent or unparseable.

use crate::domain::identifiers::OperationId;
use serde_json::Value;

/// Extracts `operation_id` from the decoded message body; mints a
/// fresh, time-ordered one and logs a warning if it is absent or
/// unparseable.
#[must_use]
pub fn extract_operation_id(body: &Value) -> OperationId {
    body.get("operation_id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .map(OperationId)
        .unwrap_or_else(|| {
            let minted = crate::application::common::operation_id::default_factory();
            tracing::warn!(operation_id = %minted, "message carried no operation_id, minted one");
            minted
        })
}
