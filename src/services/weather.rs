// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Open-Meteo client for the weather-based advisory.
//!
//! The lookup is advisory-only: it selects a canned tip on the
//! recommendations view and never participates in the carbon math, so
//! callers degrade to "no tip" on failure.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Open-Meteo weather client for a fixed coordinate.
#[derive(Clone)]
pub struct WeatherService {
    http: reqwest::Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

/// Current conditions as reported by Open-Meteo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature at 2 m, in °C
    pub temperature_2m: f64,
    /// WMO weather interpretation code
    pub weather_code: u8,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

impl WeatherService {
    /// Create a new client for the given coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.open-meteo.com".to_string(),
            latitude,
            longitude,
        }
    }

    /// Override the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current temperature and weather code.
    pub async fn current(&self) -> Result<CurrentWeather, AppError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::WeatherApi(format!(
                "Open-Meteo returned {}",
                response.status()
            )));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Invalid forecast body: {}", e)))?;

        Ok(forecast.current)
    }
}

/// Canned advisory for the current conditions.
pub fn advisory(weather: &CurrentWeather) -> &'static str {
    // WMO codes 0 and 1: clear or mostly clear sky
    if weather.weather_code <= 1 {
        "Perfect weather today! Consider walking or biking instead of driving."
    } else if weather.temperature_2m > 35.0 {
        "Hot day ahead. Use fans instead of AC when possible to save energy."
    } else if weather.temperature_2m < 15.0 {
        "Cool weather. Layer clothing before turning up the heat to reduce energy use."
    } else {
        "Weather looks good for eco-friendly transportation!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_sky_wins_over_temperature() {
        let weather = CurrentWeather {
            temperature_2m: 41.0,
            weather_code: 0,
        };
        assert!(advisory(&weather).starts_with("Perfect weather today!"));
    }

    #[test]
    fn test_hot_day_advisory() {
        let weather = CurrentWeather {
            temperature_2m: 38.5,
            weather_code: 3,
        };
        assert!(advisory(&weather).starts_with("Hot day ahead."));
    }

    #[test]
    fn test_cool_day_advisory() {
        let weather = CurrentWeather {
            temperature_2m: 9.0,
            weather_code: 61,
        };
        assert!(advisory(&weather).starts_with("Cool weather."));
    }

    #[test]
    fn test_mild_day_advisory() {
        let weather = CurrentWeather {
            temperature_2m: 24.0,
            weather_code: 2,
        };
        assert_eq!(
            advisory(&weather),
            "Weather looks good for eco-friendly transportation!"
        );
    }
}
