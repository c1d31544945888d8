// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary computed from a window of activities.
//!
//! Computed on demand from the fetched window rather than stored; the
//! windows are small (a week or a month of one user's activities).

use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, ActivityType};

/// Summed emissions per activity category.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryBreakdown {
    pub transportation: f64,
    pub energy: f64,
    pub food: f64,
}

/// One point on the per-day emission trend.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyCarbon {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: chrono::NaiveDate,
    pub carbon_kg: f64,
}

/// Aggregates for the dashboard view.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSummary {
    /// Summed emissions over the window (kg CO₂e)
    pub total_carbon_kg: f64,
    /// Total divided by the window length in days
    pub avg_daily_carbon_kg: f64,
    /// Number of activities in the window
    pub activity_count: u32,
    /// Emissions split by category
    pub carbon_by_category: CategoryBreakdown,
    /// Per-day emission sums, sorted by date ascending
    pub daily_trend: Vec<DailyCarbon>,
}

impl DashboardSummary {
    /// Build the summary for a window of `window_days` days.
    pub fn from_activities(activities: &[Activity], window_days: u32) -> Self {
        let mut by_category = CategoryBreakdown::default();
        let mut by_date: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
        let mut total = 0.0_f64;

        for activity in activities {
            total += activity.carbon_kg;
            match activity.activity_type {
                ActivityType::Transportation => by_category.transportation += activity.carbon_kg,
                ActivityType::Energy => by_category.energy += activity.carbon_kg,
                ActivityType::Food => by_category.food += activity.carbon_kg,
            }
            *by_date.entry(activity.activity_date).or_insert(0.0) += activity.carbon_kg;
        }

        let avg_daily = if activities.is_empty() || window_days == 0 {
            0.0
        } else {
            total / window_days as f64
        };

        Self {
            total_carbon_kg: total,
            avg_daily_carbon_kg: avg_daily,
            activity_count: activities.len() as u32,
            carbon_by_category: by_category,
            daily_trend: by_date
                .into_iter()
                .map(|(date, carbon_kg)| DailyCarbon { date, carbon_kg })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_activity(
        activity_type: ActivityType,
        carbon_kg: f64,
        date: &str,
    ) -> Activity {
        Activity {
            id: "test".to_string(),
            user_id: "user".to_string(),
            activity_type,
            transportation_mode: None,
            distance_km: None,
            energy_kwh: None,
            diet_type: None,
            carbon_kg,
            points_earned: 0,
            activity_date: date.parse().unwrap(),
            created_at: "2026-01-15T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_empty_window() {
        let summary = DashboardSummary::from_activities(&[], 7);
        assert_eq!(summary.total_carbon_kg, 0.0);
        assert_eq!(summary.avg_daily_carbon_kg, 0.0);
        assert_eq!(summary.activity_count, 0);
        assert!(summary.daily_trend.is_empty());
    }

    #[test]
    fn test_totals_and_categories() {
        let activities = [
            make_activity(ActivityType::Transportation, 3.0, "2026-01-10"),
            make_activity(ActivityType::Energy, 8.2, "2026-01-11"),
            make_activity(ActivityType::Food, 2.0, "2026-01-11"),
        ];

        let summary = DashboardSummary::from_activities(&activities, 7);

        assert_eq!(summary.total_carbon_kg, 13.2);
        assert_eq!(summary.avg_daily_carbon_kg, 13.2 / 7.0);
        assert_eq!(summary.activity_count, 3);
        assert_eq!(summary.carbon_by_category.transportation, 3.0);
        assert_eq!(summary.carbon_by_category.energy, 8.2);
        assert_eq!(summary.carbon_by_category.food, 2.0);
    }

    #[test]
    fn test_daily_trend_sums_and_sorts_by_date() {
        // Input out of order; same-day records accumulate
        let activities = [
            make_activity(ActivityType::Food, 2.0, "2026-01-12"),
            make_activity(ActivityType::Transportation, 1.5, "2026-01-10"),
            make_activity(ActivityType::Energy, 4.0, "2026-01-12"),
        ];

        let summary = DashboardSummary::from_activities(&activities, 30);

        assert_eq!(
            summary.daily_trend,
            vec![
                DailyCarbon {
                    date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                    carbon_kg: 1.5,
                },
                DailyCarbon {
                    date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                    carbon_kg: 6.0,
                },
            ]
        );
    }
}
