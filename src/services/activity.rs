// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity logging service.
//!
//! Handles the core workflow:
//! 1. Validate the submitted measurement
//! 2. Run the emission calculator (server-side, never trusting the client)
//! 3. Store the activity and the owner's point increment atomically

use crate::carbon::{self, CarbonResult};
use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityType};
use crate::services::password::generate_id;
use crate::time_utils;

/// One submitted activity, before validation and conversion.
#[derive(Debug, Clone)]
pub struct ActivitySubmission {
    pub activity_type: ActivityType,
    pub transportation_mode: Option<String>,
    pub distance_km: Option<f64>,
    pub energy_kwh: Option<f64>,
    pub diet_type: Option<String>,
    /// Defaults to today (UTC) when not supplied
    pub activity_date: Option<chrono::NaiveDate>,
}

/// Validates submissions and persists them with their point award.
pub struct ActivityService {
    db: FirestoreDb,
}

impl ActivityService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Log one activity for a user.
    ///
    /// Returns the stored record and the user's new cumulative point
    /// total. Validation failures are raised before any database call.
    pub async fn log_activity(
        &self,
        user_id: &str,
        submission: ActivitySubmission,
    ) -> Result<(Activity, u64)> {
        let result = evaluate_submission(&submission)?;

        let activity = Activity {
            id: generate_id()?,
            user_id: user_id.to_string(),
            activity_type: submission.activity_type,
            transportation_mode: submission.transportation_mode,
            distance_km: submission.distance_km,
            energy_kwh: submission.energy_kwh,
            diet_type: submission.diet_type,
            carbon_kg: result.carbon_kg,
            points_earned: result.points_earned,
            activity_date: submission
                .activity_date
                .unwrap_or_else(time_utils::today_utc),
            created_at: time_utils::now_rfc3339(),
        };

        let total_points = self.db.record_activity_atomic(&activity).await?;

        tracing::info!(
            user_id,
            activity_id = %activity.id,
            carbon_kg = activity.carbon_kg,
            points = activity.points_earned,
            "Activity logged"
        );

        Ok((activity, total_points))
    }
}

/// Validate a submission and convert it through the calculator.
///
/// The measurement matching the activity type must be present; distance
/// and usage must be finite and strictly positive. Fields belonging to
/// other activity types are rejected rather than silently dropped.
pub fn evaluate_submission(submission: &ActivitySubmission) -> Result<CarbonResult> {
    match submission.activity_type {
        ActivityType::Transportation => {
            if submission.energy_kwh.is_some() || submission.diet_type.is_some() {
                return Err(AppError::BadRequest(
                    "Transportation activities take only a mode and a distance".to_string(),
                ));
            }
            let mode = submission
                .transportation_mode
                .as_deref()
                .filter(|m| !m.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest("Please select a transportation mode".to_string())
                })?;
            let distance = submission.distance_km.ok_or_else(invalid_distance)?;
            if !distance.is_finite() || distance <= 0.0 {
                return Err(invalid_distance());
            }
            Ok(carbon::transportation(mode, distance))
        }
        ActivityType::Energy => {
            if submission.transportation_mode.is_some()
                || submission.distance_km.is_some()
                || submission.diet_type.is_some()
            {
                return Err(AppError::BadRequest(
                    "Energy activities take only a kWh amount".to_string(),
                ));
            }
            let kwh = submission.energy_kwh.ok_or_else(invalid_energy)?;
            if !kwh.is_finite() || kwh <= 0.0 {
                return Err(invalid_energy());
            }
            Ok(carbon::energy(kwh))
        }
        ActivityType::Food => {
            if submission.transportation_mode.is_some()
                || submission.distance_km.is_some()
                || submission.energy_kwh.is_some()
            {
                return Err(AppError::BadRequest(
                    "Food activities take only a diet type".to_string(),
                ));
            }
            let diet = submission
                .diet_type
                .as_deref()
                .filter(|d| !d.is_empty())
                .ok_or_else(|| AppError::BadRequest("Please select a diet type".to_string()))?;
            Ok(carbon::food(diet))
        }
    }
}

fn invalid_distance() -> AppError {
    AppError::BadRequest("Please enter a valid distance in kilometers".to_string())
}

fn invalid_energy() -> AppError {
    AppError::BadRequest("Please enter a valid energy amount".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transportation(mode: &str, distance_km: f64) -> ActivitySubmission {
        ActivitySubmission {
            activity_type: ActivityType::Transportation,
            transportation_mode: Some(mode.to_string()),
            distance_km: Some(distance_km),
            energy_kwh: None,
            diet_type: None,
            activity_date: None,
        }
    }

    #[test]
    fn test_valid_transportation_submission() {
        let result = evaluate_submission(&transportation("metro_train", 15.0)).unwrap();
        assert_eq!(result.carbon_kg, 15.0 * 0.008);
        assert_eq!(result.points_earned, 90);
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        let err = evaluate_submission(&transportation("car", -5.0)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = evaluate_submission(&transportation("car", 0.0)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_rejects_non_finite_distance() {
        let err = evaluate_submission(&transportation("car", f64::NAN)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = evaluate_submission(&transportation("car", f64::INFINITY)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_rejects_missing_measurement() {
        let submission = ActivitySubmission {
            activity_type: ActivityType::Energy,
            transportation_mode: None,
            distance_km: None,
            energy_kwh: None,
            diet_type: None,
            activity_date: None,
        };
        let err = evaluate_submission(&submission).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_rejects_mismatched_fields() {
        let submission = ActivitySubmission {
            activity_type: ActivityType::Food,
            transportation_mode: None,
            distance_km: Some(5.0),
            energy_kwh: None,
            diet_type: Some("plant-based-local".to_string()),
            activity_date: None,
        };
        let err = evaluate_submission(&submission).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_valid_energy_and_food_submissions() {
        let energy = ActivitySubmission {
            activity_type: ActivityType::Energy,
            transportation_mode: None,
            distance_km: None,
            energy_kwh: Some(100.0),
            diet_type: None,
            activity_date: None,
        };
        let result = evaluate_submission(&energy).unwrap();
        assert_eq!(result.carbon_kg, 82.0);
        assert_eq!(result.points_earned, 50);

        let food = ActivitySubmission {
            activity_type: ActivityType::Food,
            transportation_mode: None,
            distance_km: None,
            energy_kwh: None,
            diet_type: Some("traditional-vegetarian".to_string()),
            activity_date: None,
        };
        let result = evaluate_submission(&food).unwrap();
        assert_eq!(result.carbon_kg, 2.0);
        assert_eq!(result.points_earned, 75);
    }
}
