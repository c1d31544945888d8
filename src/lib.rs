// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrack: personal carbon-footprint tracking API
//!
//! This crate provides the backend for logging transportation, energy,
//! and food activities, converting them into CO₂-equivalent emissions and
//! eco-points, and serving dashboards, recommendations, and a leaderboard.

pub mod carbon;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::WeatherService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub weather: WeatherService,
}
