// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod profile;
pub mod summary;

pub use activity::{Activity, ActivityType};
pub use profile::{Credentials, Profile};
pub use summary::DashboardSummary;
