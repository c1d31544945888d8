// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential authentication routes.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{Credentials, Profile};
use crate::routes::api::ProfileResponse;
use crate::services::password;
use crate::time_utils;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session response returned by signup and login.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    /// Session JWT (also set as an HttpOnly cookie)
    pub token: String,
    pub profile: ProfileResponse,
}

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Create a new account and start a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    payload.validate()?;

    let email = normalize_email(&payload.email);
    let hashed = password::hash_password(&payload.password)?;
    let user_id = password::generate_id()?;
    let now = time_utils::now_rfc3339();

    let profile = Profile {
        user_id: user_id.clone(),
        username: payload.username.trim().to_string(),
        email: email.clone(),
        total_points: 0,
        created_at: now.clone(),
    };
    let credentials = Credentials {
        user_id,
        email,
        password_hash: hashed.hash,
        salt: hashed.salt,
        updated_at: now,
    };

    state.db.create_account(&profile, &credentials).await?;

    tracing::info!(user_id = %profile.user_id, "Account created");

    let jwt = create_jwt(&profile.user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(jwt.clone())),
        Json(AuthResponse {
            token: jwt,
            profile: profile.into(),
        }),
    ))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Verify credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    payload.validate()?;

    let email = normalize_email(&payload.email);

    // Unknown email and wrong password produce the same response, so the
    // endpoint cannot be used to enumerate accounts.
    let credentials = state
        .db
        .get_credentials(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password::verify_password(
        &payload.password,
        &credentials.salt,
        &credentials.password_hash,
    )?;
    if !valid {
        tracing::info!(email = %email, "Rejected login with wrong password");
        return Err(AppError::Unauthorized);
    }

    let profile = state
        .db
        .get_profile(&credentials.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Credentials exist without a profile for {}",
                credentials.user_id
            ))
        })?;

    let jwt = create_jwt(&profile.user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(jwt.clone())),
        Json(AuthResponse {
            token: jwt,
            profile: profile.into(),
        }),
    ))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogoutResponse {
    pub success: bool,
}

/// End the session by clearing the cookie. Bearer-token clients just
/// discard the token client-side.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/");
    (
        jar.remove(removal),
        Json(LogoutResponse { success: true }),
    )
}

/// Build the HttpOnly session cookie.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Emails are compared and keyed case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
