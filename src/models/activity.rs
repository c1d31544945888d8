// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and API.

use serde::{Deserialize, Serialize};

/// Kind of activity being logged. Fixed at creation and determines which
/// measurement field is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Transportation,
    Energy,
    Food,
}

/// Stored activity record in Firestore.
///
/// `carbon_kg` and `points_earned` are derived by the calculator at write
/// time and never accepted from the client. Records are immutable once
/// created; there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Random document ID
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Activity category
    pub activity_type: ActivityType,
    /// Mode key (car, bus, metro_train, ...); present iff transportation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation_mode: Option<String>,
    /// Distance in km; present iff transportation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Usage in kWh; present iff energy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<f64>,
    /// Diet key (plant-based-local, ...); present iff food
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    /// Derived emissions in kg CO₂-equivalent
    pub carbon_kg: f64,
    /// Derived eco-points
    pub points_earned: u32,
    /// Day the activity happened (no time-of-day component)
    pub activity_date: chrono::NaiveDate,
    /// When the record was created (RFC3339)
    pub created_at: String,
}
