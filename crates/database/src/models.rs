//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Generated UUID.
    pub id: String,
    /// Login email, unique across users.
    pub email: String,
    /// Display name chosen at registration.
    pub username: String,
    /// Argon2 hash of the password. Never logged, never returned to clients.
    pub password_hash: String,
}

/// An ownership record tying a Vapi assistant to a local user.
///
/// The provider knows nothing about local users; this row is the sole
/// source of truth for who may act on a given assistant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserAssistant {
    /// Generated UUID.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Provider-assigned assistant id (opaque).
    pub assistant_id: String,
    /// Cached display name, refreshed on rename.
    pub assistant_name: String,
    /// Creation timestamp.
    pub created_at: String,
}
