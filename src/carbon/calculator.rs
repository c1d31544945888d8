// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity-to-emissions conversion.
//!
//! All factors reflect typical Indian emissions and common modes/units:
//! transportation factors are kg CO₂e per km, the energy factor is the
//! Indian grid average, and food factors are per-day diet estimates.
//! Unrecognized mode/diet keys fall back to a documented default rather
//! than erroring, so stored records with retired keys keep rendering.

/// Result of converting one activity measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonResult {
    /// Estimated emissions in kg CO₂-equivalent.
    pub carbon_kg: f64,
    /// Eco-points awarded for the activity (0-100).
    pub points_earned: u32,
}

/// Distance at which a transportation mode earns its maximum points.
const MAX_POINTS_DISTANCE_KM: f64 = 20.0;

/// Usage (kWh) at or above which an energy activity earns no points.
const MAX_POINTS_ENERGY_KWH: f64 = 200.0;

/// Grid emission factor: ~0.82 kg CO₂ per kWh (India).
const GRID_FACTOR_KG_PER_KWH: f64 = 0.82;

/// Fallback factor (kg CO₂e/km) for transportation modes not in the table.
const UNKNOWN_MODE_FACTOR: f64 = 0.21;

/// Fallback daily emissions (kg CO₂e) for diet types not in the table.
const UNKNOWN_DIET_CARBON: f64 = 3.2;

/// Fallback points for diet types not in the table.
const UNKNOWN_DIET_POINTS: u32 = 30;

/// Emission factor in kg CO₂e per km, keyed by transportation mode.
pub fn transportation_factor(mode: &str) -> f64 {
    match mode {
        "car" => 0.192,            // petrol car
        "bus" => 0.567,            // public bus
        "metro_train" => 0.008,    // rail/metro per passenger-km
        "two_wheeler" => 0.035,    // motorcycle/scooter
        "auto_rickshaw" => 0.1135, // three-wheeler petrol
        "bike" => 0.0,
        "walk" => 0.0,
        "electric_car" => 0.096, // via grid emission factor
        _ => UNKNOWN_MODE_FACTOR,
    }
}

/// Points multiplier for a transportation mode.
fn mode_bonus(mode: &str) -> f64 {
    match mode {
        // 50% bonus for zero-emission modes
        "walk" | "bike" => 1.5,
        // 20% bonus for shared/public transport
        "bus" | "metro_train" | "auto_rickshaw" => 1.2,
        "electric_car" => 1.0,
        // petrol car, two-wheeler, anything unrecognized
        _ => 0.5,
    }
}

/// Convert a transportation activity into emissions and points.
///
/// Points are normalized so that 20 km yields the mode's maximum, capped
/// at 100. Callers validate that `distance_km` is finite and positive
/// before invoking; the conversion itself is a pure table lookup.
pub fn transportation(mode: &str, distance_km: f64) -> CarbonResult {
    let carbon_kg = distance_km * transportation_factor(mode);

    let points = (distance_km / MAX_POINTS_DISTANCE_KM * 100.0 * mode_bonus(mode)).min(100.0);

    CarbonResult {
        carbon_kg,
        points_earned: points.round() as u32,
    }
}

/// Convert an energy activity into emissions and points.
///
/// Lower usage earns more points; usage at or above 200 kWh earns zero.
pub fn energy(kwh: f64) -> CarbonResult {
    let carbon_kg = kwh * GRID_FACTOR_KG_PER_KWH;

    let points = ((MAX_POINTS_ENERGY_KWH - kwh) / MAX_POINTS_ENERGY_KWH * 100.0).max(0.0);

    CarbonResult {
        carbon_kg,
        points_earned: points.round() as u32,
    }
}

/// Convert a food activity (one day's diet) into emissions and points.
///
/// Unlike the other conversions, points come from a fixed table rather
/// than a formula.
pub fn food(diet_type: &str) -> CarbonResult {
    let carbon_kg = match diet_type {
        "dairy-meat-heavy" => 3.3,
        "poultry-moderate" => 2.7,
        "traditional-vegetarian" => 2.0,
        "plant-based-local" => 1.5,
        _ => UNKNOWN_DIET_CARBON,
    };

    let points_earned = match diet_type {
        "plant-based-local" => 100,
        "traditional-vegetarian" => 75,
        "poultry-moderate" => 40,
        "dairy-meat-heavy" => 0,
        _ => UNKNOWN_DIET_POINTS,
    };

    CarbonResult {
        carbon_kg,
        points_earned,
    }
}
