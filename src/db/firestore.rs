// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (user accounts and cumulative points)
//! - Credentials (password sign-in records)
//! - Activities (logged carbon activities)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, Credentials, Profile};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by user ID.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the top profiles by cumulative points (for the leaderboard).
    pub async fn list_top_profiles(&self, limit: u32) -> Result<Vec<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PROFILES)
            .order_by([(
                "total_points",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Credential Operations ───────────────────────────────────

    /// Get a credentials record by normalized email.
    pub async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CREDENTIALS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a credentials record, failing if the email is already taken.
    ///
    /// Uses Firestore create semantics so two concurrent signups for the
    /// same email cannot both succeed.
    pub async fn insert_credentials(&self, credentials: &Credentials) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::CREDENTIALS)
            .document_id(&credentials.email)
            .object(credentials)
            .execute()
            .await
            .map_err(|e| {
                if already_exists(&e) {
                    AppError::Conflict(format!("Email {} is already registered", credentials.email))
                } else {
                    AppError::Database(e.to_string())
                }
            })?;
        Ok(())
    }

    /// Overwrite a credentials record (password change).
    pub async fn set_credentials(&self, credentials: &Credentials) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CREDENTIALS)
            .document_id(&credentials.email)
            .object(credentials)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a credentials record (after an email change).
    pub async fn delete_credentials(&self, email: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::CREDENTIALS)
            .document_id(email)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Account Creation ────────────────────────────────────────

    /// Create a new account: credentials first (the uniqueness gate), then
    /// the profile. If the profile write fails the credentials record is
    /// rolled back so the email does not end up unusable.
    pub async fn create_account(
        &self,
        profile: &Profile,
        credentials: &Credentials,
    ) -> Result<(), AppError> {
        self.insert_credentials(credentials).await?;

        if let Err(e) = self.upsert_profile(profile).await {
            tracing::error!(
                user_id = %profile.user_id,
                error = %e,
                "Profile write failed after credentials insert, rolling back"
            );
            if let Err(rollback_err) = self.delete_credentials(&credentials.email).await {
                tracing::error!(
                    email = %credentials.email,
                    error = %rollback_err,
                    "Failed to roll back credentials after profile write failure"
                );
            }
            return Err(e);
        }

        Ok(())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Get a user's activities since a date, ordered by date ascending.
    pub async fn get_activities_for_user(
        &self,
        user_id: &str,
        since: chrono::NaiveDate,
    ) -> Result<Vec<Activity>, AppError> {
        let user_id = user_id.to_string();
        let since = since.format("%Y-%m-%d").to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("activity_date").greater_than_or_equal(since.clone()),
                ])
            })
            .order_by([(
                "activity_date",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Atomic Activity Logging ─────────────────────────────────

    /// Atomically store an activity and add its points to the owner's
    /// cumulative total.
    ///
    /// Both writes go through one Firestore transaction: the profile read
    /// registers the document for conflict detection, so two activities
    /// submitted concurrently by the same user retry instead of losing an
    /// increment. A failed transaction leaves neither write applied.
    ///
    /// Returns the owner's new point total.
    pub async fn record_activity_atomic(&self, activity: &Activity) -> Result<u64, AppError> {
        let user_id = activity.user_id.clone();

        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Read the profile within the transaction so the increment is
        // applied to fresh data on retry.
        let profile: Option<Profile> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(&user_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read profile in transaction: {}", e))
            })?;

        let Some(mut profile) = profile else {
            let _ = transaction.rollback().await;
            return Err(AppError::NotFound(format!("Profile {} not found", user_id)));
        };

        profile.total_points += u64::from(activity.points_earned);

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&activity.id)
            .object(activity)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add activity to transaction: {}", e))
            })?;

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.user_id)
            .object(&profile)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add profile to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id = %profile.user_id,
            activity_id = %activity.id,
            points = activity.points_earned,
            total_points = profile.total_points,
            "Activity recorded atomically"
        );

        Ok(profile.total_points)
    }
}

/// Whether a Firestore error means the document already exists.
fn already_exists(error: &firestore::errors::FirestoreError) -> bool {
    matches!(
        error,
        firestore::errors::FirestoreError::DataConflictError(_)
    )
}
