// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission and eco-point conversion engine.
//!
//! Pure functions over static emission-factor tables. Everything else in
//! the crate depends on this module; it depends on nothing but the models.

pub mod calculator;
pub mod recommendations;

pub use calculator::{energy, food, transportation, CarbonResult};
pub use recommendations::recommendations;
