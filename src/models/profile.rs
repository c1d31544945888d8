//! User profile and credential models for storage.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// User ID (also used as document ID)
    pub user_id: String,
    /// Display name, shown on the leaderboard
    pub username: String,
    /// Email address (also the credentials document ID)
    pub email: String,
    /// Cumulative eco-points. Incremented in the same transaction as each
    /// activity write; never recomputed by rescanning history.
    pub total_points: u64,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// Password sign-in record, stored in its own collection keyed by
/// normalized email so login is a single document read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Owning user ID
    pub user_id: String,
    /// Normalized (trimmed, lowercased) email
    pub email: String,
    /// PBKDF2-HMAC-SHA256 hash (base64)
    pub password_hash: String,
    /// Per-credential random salt (base64)
    pub salt: String,
    /// Last password change (RFC3339)
    pub updated_at: String,
}
