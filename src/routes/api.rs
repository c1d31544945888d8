// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, DashboardSummary, Profile};
use crate::services::{password, weather, ActivityService, ActivitySubmission};
use crate::time_utils;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest trailing window a client may request.
const MAX_WINDOW_DAYS: u32 = 365;

/// Leaderboard page size. Rank is only known within this page.
const LEADERBOARD_SIZE: u32 = 10;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", put(update_profile))
        .route("/api/profile/password", post(change_password))
        .route("/api/activities", post(log_activity).get(get_activities))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/recommendations", get(get_recommendations))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_points: u64,
    pub created_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.username,
            email: profile.email,
            total_points: profile.total_points,
            created_at: profile.created_at,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    Ok(Json(profile.into()))
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Update username and/or email.
///
/// An email change re-keys the credentials record: the new record is
/// inserted first (failing on a taken address), then the profile is
/// rewritten, then the old record is removed.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    payload.validate()?;

    let mut profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    let mut changed = false;

    if let Some(username) = payload.username {
        let username = username.trim().to_string();
        if username != profile.username {
            profile.username = username;
            changed = true;
        }
    }

    let new_email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| *e != profile.email);

    if let Some(new_email) = new_email {
        let old_email = profile.email.clone();
        let credentials = state.db.get_credentials(&old_email).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Profile {} has no credentials record",
                profile.user_id
            ))
        })?;

        let mut new_credentials = credentials;
        new_credentials.email = new_email.clone();
        new_credentials.updated_at = time_utils::now_rfc3339();

        // Fails with 409 if the address is already registered
        state.db.insert_credentials(&new_credentials).await?;

        profile.email = new_email;
        changed = true;
        state.db.upsert_profile(&profile).await?;

        if let Err(e) = state.db.delete_credentials(&old_email).await {
            tracing::error!(
                user_id = %profile.user_id,
                error = %e,
                "Failed to remove old credentials record after email change"
            );
        }
    } else if changed {
        state.db.upsert_profile(&profile).await?;
    }

    if changed {
        tracing::info!(user_id = %profile.user_id, "Profile updated");
    }

    Ok(Json(profile.into()))
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChangePasswordResponse {
    pub success: bool,
}

/// Change password; requires the current password.
async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>> {
    payload.validate()?;

    let profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    let mut credentials = state
        .db
        .get_credentials(&profile.email)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Profile {} has no credentials record",
                profile.user_id
            ))
        })?;

    let valid = password::verify_password(
        &payload.current_password,
        &credentials.salt,
        &credentials.password_hash,
    )?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let hashed = password::hash_password(&payload.new_password)?;
    credentials.password_hash = hashed.hash;
    credentials.salt = hashed.salt;
    credentials.updated_at = time_utils::now_rfc3339();

    state.db.set_credentials(&credentials).await?;

    tracing::info!(user_id = %profile.user_id, "Password changed");

    Ok(Json(ChangePasswordResponse { success: true }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogActivityRequest {
    pub activity_type: crate::models::ActivityType,
    #[serde(default)]
    pub transportation_mode: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub energy_kwh: Option<f64>,
    #[serde(default)]
    pub diet_type: Option<String>,
    /// Defaults to today (UTC)
    #[serde(default)]
    pub activity_date: Option<chrono::NaiveDate>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityResponse {
    pub id: String,
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "'transportation' | 'energy' | 'food'")
    )]
    pub activity_type: crate::models::ActivityType,
    pub transportation_mode: Option<String>,
    pub distance_km: Option<f64>,
    pub energy_kwh: Option<f64>,
    pub diet_type: Option<String>,
    pub carbon_kg: f64,
    pub points_earned: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub activity_date: chrono::NaiveDate,
    pub created_at: String,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            activity_type: activity.activity_type,
            transportation_mode: activity.transportation_mode,
            distance_km: activity.distance_km,
            energy_kwh: activity.energy_kwh,
            diet_type: activity.diet_type,
            carbon_kg: activity.carbon_kg,
            points_earned: activity.points_earned,
            activity_date: activity.activity_date,
            created_at: activity.created_at,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogActivityResponse {
    pub activity: ActivityResponse,
    /// The owner's cumulative points after this activity
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_points: u64,
}

/// Log one activity.
///
/// Emissions and points are computed server-side from the submitted
/// measurement; client-supplied derived values are not accepted.
async fn log_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<Json<LogActivityResponse>> {
    if let Some(date) = payload.activity_date {
        if date > time_utils::today_utc() {
            return Err(AppError::BadRequest(
                "Activity date cannot be in the future".to_string(),
            ));
        }
    }

    let submission = ActivitySubmission {
        activity_type: payload.activity_type,
        transportation_mode: payload.transportation_mode,
        distance_km: payload.distance_km,
        energy_kwh: payload.energy_kwh,
        diet_type: payload.diet_type,
        activity_date: payload.activity_date,
    };

    let (activity, total_points) = ActivityService::new(state.db.clone())
        .log_activity(&user.user_id, submission)
        .await?;

    Ok(Json(LogActivityResponse {
        activity: activity.into(),
        total_points,
    }))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Trailing window length in days
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    30
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityResponse>,
    pub total: u32,
}

/// Get the user's activities for a trailing window, oldest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    let days = validate_window(params.days)?;

    tracing::debug!(user_id = %user.user_id, days, "Fetching activities");

    let activities = state
        .db
        .get_activities_for_user(&user.user_id, time_utils::days_back(days))
        .await?;

    let activities: Vec<ActivityResponse> = activities.into_iter().map(Into::into).collect();
    let total = activities.len() as u32;

    Ok(Json(ActivitiesResponse { activities, total }))
}

fn validate_window(days: u32) -> Result<u32> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_WINDOW_DAYS
        )));
    }
    Ok(days)
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// "week" or "month"
    #[serde(default = "default_range")]
    range: String,
}

fn default_range() -> String {
    "week".to_string()
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub range: String,
    pub window_days: u32,
    pub summary: DashboardSummary,
}

/// Get the dashboard summary for a week or month window.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    let window_days = match params.range.as_str() {
        "week" => 7,
        "month" => 30,
        other => {
            return Err(AppError::BadRequest(format!(
                "range must be 'week' or 'month', got '{}'",
                other
            )))
        }
    };

    let activities = state
        .db
        .get_activities_for_user(&user.user_id, time_utils::days_back(window_days))
        .await?;

    Ok(Json(DashboardResponse {
        range: params.range,
        window_days,
        summary: DashboardSummary::from_activities(&activities, window_days),
    }))
}

// ─── Recommendations ─────────────────────────────────────────

/// Days of history the recommendation engine looks at.
const RECOMMENDATION_WINDOW_DAYS: u32 = 30;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub weather_code: u8,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationsResponse {
    /// Ordered advisory list, at most six entries
    pub recommendations: Vec<String>,
    /// Current conditions, when the lookup succeeded
    pub weather: Option<WeatherReport>,
    /// Weather-based tip, when the lookup succeeded
    pub weather_tip: Option<String>,
}

/// Get recommendations from the trailing 30 days, plus a weather tip.
///
/// The weather lookup is best-effort: a failure degrades to no tip.
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RecommendationsResponse>> {
    // The activity window and the weather lookup are independent
    let (activities, current_weather) = futures_util::join!(
        state.db.get_activities_for_user(
            &user.user_id,
            time_utils::days_back(RECOMMENDATION_WINDOW_DAYS),
        ),
        state.weather.current()
    );
    let activities = activities?;

    let total_carbon: f64 = activities.iter().map(|a| a.carbon_kg).sum();
    let recommendations = crate::carbon::recommendations(&activities, total_carbon);

    let (weather_report, weather_tip) = match current_weather {
        Ok(current) => (
            Some(WeatherReport {
                temperature_c: current.temperature_2m,
                weather_code: current.weather_code,
            }),
            Some(weather::advisory(&current).to_string()),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Weather lookup failed, omitting tip");
            (None, None)
        }
    };

    Ok(Json(RecommendationsResponse {
        recommendations,
        weather: weather_report,
        weather_tip,
    }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_points: u64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    /// The caller's rank, when they appear on this page
    pub user_rank: Option<u32>,
}

/// Get the top profiles by cumulative points.
///
/// Rank outside the returned page is unknown; computing a global rank
/// would need a dedicated aggregation query.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LeaderboardResponse>> {
    let profiles = state.db.list_top_profiles(LEADERBOARD_SIZE).await?;

    let user_rank = profiles
        .iter()
        .position(|p| p.user_id == user.user_id)
        .map(|i| i as u32 + 1);

    let entries = profiles
        .into_iter()
        .enumerate()
        .map(|(i, p)| LeaderboardEntry {
            rank: i as u32 + 1,
            username: p.username,
            total_points: p.total_points,
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries, user_rank }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_window_bounds() {
        assert!(validate_window(0).is_err());
        assert!(validate_window(366).is_err());
        assert_eq!(validate_window(1).unwrap(), 1);
        assert_eq!(validate_window(365).unwrap(), 365);
    }
}
