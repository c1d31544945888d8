// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based sustainability recommendations.
//!
//! Deterministic evaluation over a window of activities (typically the
//! trailing 30 days). Rules fire in a fixed priority order and the result
//! is truncated, so the first entries are always the most significant.

use crate::models::{Activity, ActivityType};

/// Advisory list length cap.
const MAX_RECOMMENDATIONS: usize = 6;

/// Trip count above which the commute suggestion fires.
const COMMUTE_TRIP_THRESHOLD: usize = 3;

/// Monthly kWh above which the energy-saving suggestions fire.
const HIGH_ENERGY_KWH: f64 = 150.0;

/// Generate the ordered advisory list for a set of activities.
///
/// `total_carbon` is the summed `carbon_kg` of `activities`; callers pass
/// it in because they usually have it computed already for the dashboard.
/// At most one tier message and one category message are produced; the
/// category message requires that category to be strictly larger than both
/// others, so ties yield no category message.
pub fn recommendations(activities: &[Activity], total_carbon: f64) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();

    let mut transportation = 0.0_f64;
    let mut energy = 0.0_f64;
    let mut food = 0.0_f64;
    for activity in activities {
        match activity.activity_type {
            ActivityType::Transportation => transportation += activity.carbon_kg,
            ActivityType::Energy => energy += activity.carbon_kg,
            ActivityType::Food => food += activity.carbon_kg,
        }
    }

    let high_energy_usage = activities.iter().any(|a| {
        a.activity_type == ActivityType::Energy
            && a.energy_kwh.is_some_and(|kwh| kwh > HIGH_ENERGY_KWH)
    });
    let dairy_meat_heavy_diet = activities.iter().any(|a| {
        a.activity_type == ActivityType::Food
            && a.diet_type.as_deref() == Some("dairy-meat-heavy")
    });
    let private_vehicle_trips = activities
        .iter()
        .filter(|a| {
            matches!(
                a.transportation_mode.as_deref(),
                Some("car") | Some("two_wheeler")
            )
        })
        .count();

    if total_carbon > 200.0 {
        recs.push(
            "Your carbon footprint is quite high! Focus on reducing your top emission sources to make a significant impact."
                .to_string(),
        );
    } else if total_carbon > 100.0 {
        recs.push(
            "You are making good progress! Consider adopting more eco-friendly habits to reduce your footprint further."
                .to_string(),
        );
    } else if total_carbon > 0.0 {
        recs.push(
            "Great job! Your carbon footprint is relatively low. Keep up the sustainable practices!"
                .to_string(),
        );
    }

    if transportation > energy && transportation > food {
        recs.push(
            "Transportation is your biggest emission source. Consider using public transport, carpooling, or eco-friendly alternatives."
                .to_string(),
        );
    } else if energy > transportation && energy > food {
        recs.push(
            "Energy consumption is your main concern. Try using energy-efficient appliances and reduce AC usage."
                .to_string(),
        );
    } else if food > transportation && food > energy {
        recs.push(
            "Food-related emissions are your primary source. Consider adopting more plant-based meals."
                .to_string(),
        );
    }

    if private_vehicle_trips > COMMUTE_TRIP_THRESHOLD {
        recs.push(
            "For your commute, switch to the Metro, Bus, or shared auto to cut emissions and traffic congestion."
                .to_string(),
        );
    }

    if private_vehicle_trips > 0 {
        recs.push(
            "Try walking or cycling for short errands under 3 km to stay fit and eliminate emissions."
                .to_string(),
        );
    }

    if high_energy_usage {
        recs.push(
            "Adjust your AC setting to 25°C or higher and use electronic fan regulators to save significant power."
                .to_string(),
        );
        recs.push(
            "Unplug electronics like phone chargers, TVs, and set-top boxes when not in use to combat phantom load."
                .to_string(),
        );
    }

    if dairy_meat_heavy_diet {
        recs.push(
            "Focus on reducing dairy (paneer, excess milk) and switch to traditional protein sources like Dal and Pulses."
                .to_string(),
        );
    }

    recs.push(
        "Practice segregation of waste (wet and dry) at home for efficient composting and recycling."
            .to_string(),
    );
    recs.push(
        "Support local street vendors and farmers by buying seasonal Indian produce to minimize transport footprint."
            .to_string(),
    );

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}
