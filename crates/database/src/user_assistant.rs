//! Assistant ownership queries.
//!
//! An ownership row is inserted when a user creates an assistant through
//! the gateway, removed when they delete it, and pruned when the provider
//! stops recognizing the assistant id.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::UserAssistant;

/// Record ownership of a provider assistant.
///
/// `(user_id, assistant_id)` is unique; a duplicate insert fails with
/// [`DatabaseError::AlreadyExists`].
pub async fn insert(
    pool: &SqlitePool,
    user_id: &str,
    assistant_id: &str,
    assistant_name: &str,
) -> Result<UserAssistant> {
    let record = UserAssistant {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        assistant_id: assistant_id.to_string(),
        assistant_name: assistant_name.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    sqlx::query(
        r#"
        INSERT INTO user_assistants (id, user_id, assistant_id, assistant_name, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.user_id)
    .bind(&record.assistant_id)
    .bind(&record.assistant_name)
    .bind(&record.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "UserAssistant",
                    id: record.assistant_id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    tracing::debug!(
        user_id = %record.user_id,
        assistant_id = %record.assistant_id,
        "Ownership recorded"
    );
    Ok(record)
}

/// List all ownership rows for a user.
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<UserAssistant>> {
    let records = sqlx::query_as::<_, UserAssistant>(
        r#"
        SELECT id, user_id, assistant_id, assistant_name, created_at
        FROM user_assistants
        WHERE user_id = ?
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Look up a single ownership row.
pub async fn find(
    pool: &SqlitePool,
    user_id: &str,
    assistant_id: &str,
) -> Result<Option<UserAssistant>> {
    let record = sqlx::query_as::<_, UserAssistant>(
        r#"
        SELECT id, user_id, assistant_id, assistant_name, created_at
        FROM user_assistants
        WHERE user_id = ? AND assistant_id = ?
        "#,
    )
    .bind(user_id)
    .bind(assistant_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Remove an ownership row.
pub async fn delete(pool: &SqlitePool, user_id: &str, assistant_id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_assistants
        WHERE user_id = ? AND assistant_id = ?
        "#,
    )
    .bind(user_id)
    .bind(assistant_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "UserAssistant",
            id: assistant_id.to_string(),
        });
    }

    Ok(())
}

/// Refresh the cached display name after a rename.
pub async fn update_name(
    pool: &SqlitePool,
    user_id: &str,
    assistant_id: &str,
    assistant_name: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE user_assistants
        SET assistant_name = ?
        WHERE user_id = ? AND assistant_id = ?
        "#,
    )
    .bind(assistant_name)
    .bind(user_id)
    .bind(assistant_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "UserAssistant",
            id: assistant_id.to_string(),
        });
    }

    Ok(())
}
