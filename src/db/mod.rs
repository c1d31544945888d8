//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    /// Password records, keyed by normalized email
    pub const CREDENTIALS: &str = "credentials";
    pub const ACTIVITIES: &str = "activities";
}
