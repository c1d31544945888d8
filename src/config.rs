//! Application configuration loaded from environment variables.

use std::env;

/// Coordinate the weather advisory defaults to (Hyderabad).
const DEFAULT_LATITUDE: f64 = 17.384;
const DEFAULT_LONGITUDE: f64 = 78.4564;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Latitude for the weather advisory lookup
    pub weather_latitude: f64,
    /// Longitude for the weather advisory lookup
    pub weather_longitude: f64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            weather_latitude: DEFAULT_LATITUDE,
            weather_longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a .env file. In
    /// production the deployment injects them as environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            weather_latitude: env::var("WEATHER_LATITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LATITUDE),
            weather_longitude: env::var("WEATHER_LONGITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LONGITUDE),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.gcp_project_id, "local-dev");
        assert_eq!(config.weather_latitude, DEFAULT_LATITUDE);
        assert_eq!(config.weather_longitude, DEFAULT_LONGITUDE);
    }
}
