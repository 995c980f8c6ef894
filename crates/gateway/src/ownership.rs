//! Ownership checks against the user-to-assistant table.
//!
//! The owned set is always computed from the current rows, per request;
//! nothing here caches across requests.

use std::collections::HashSet;

use database::{Database, UserAssistant};
use serde_json::Value;

use crate::error::{GatewayError, Result};

/// The set of assistant ids owned by a user.
pub async fn owned_assistant_ids(db: &Database, user_id: &str) -> Result<HashSet<String>> {
    let rows = database::user_assistant::list_for_user(db.pool(), user_id).await?;
    Ok(rows.into_iter().map(|ua| ua.assistant_id).collect())
}

/// Require that the user owns `assistant_id`, returning the ownership row.
pub async fn require_owned(
    db: &Database,
    user_id: &str,
    assistant_id: &str,
) -> Result<UserAssistant> {
    database::user_assistant::find(db.pool(), user_id, assistant_id)
        .await?
        .ok_or(GatewayError::NotFoundOrDenied("Assistant"))
}

/// Require that the user owns `assistant_id`, reporting the denial under a
/// different resource name (e.g. the phone number that references it).
pub async fn assert_owned(
    db: &Database,
    user_id: &str,
    assistant_id: &str,
    entity: &'static str,
) -> Result<()> {
    database::user_assistant::find(db.pool(), user_id, assistant_id)
        .await?
        .map(|_| ())
        .ok_or(GatewayError::NotFoundOrDenied(entity))
}

/// Read the `assistantId` a provider resource is associated with.
pub fn assistant_id_of(resource: &Value) -> Option<&str> {
    resource.get("assistantId").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assistant_id_of() {
        assert_eq!(
            assistant_id_of(&json!({"assistantId": "asst-1"})),
            Some("asst-1")
        );
        assert_eq!(assistant_id_of(&json!({"id": "pn-1"})), None);
        assert_eq!(assistant_id_of(&json!({"assistantId": 7})), None);
    }
}
