use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use cookie::time::Duration as CookieDuration;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::web::{ApiError, AppState, data, validate};

pub const SESSION_COOKIE: &str = "auth_token";
pub const SESSION_TTL_DAYS: i64 = 7;

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Serialize)]
struct AccountSummary {
    id: Uuid,
    email: String,
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    success: bool,
    message: String,
    user: AccountSummary,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let email_raw = validate::required_text(request.email.as_deref(), "Email")?;
    let email = validate::email_address(&email_raw)?;
    let password = validate::required_text(request.password.as_deref(), "Password")?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::validation(
            "Password must be at least 6 characters long",
        ));
    }
    let name = validate::optional_text(request.name.as_deref());

    let password_hash = hash_password(&password)
        .map_err(|err| ApiError::Dependency(anyhow!("failed to hash password: {err}")))?;

    let account =
        match data::insert_account(state.pool_ref(), &email, name.as_deref(), &password_hash).await
        {
            Ok(account) => account,
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                return Err(ApiError::conflict(
                    "An account with this email already exists",
                ));
            }
            Err(err) => return Err(err.into()),
        };

    Ok(Json(RegisterResponse {
        success: true,
        message: "Account created successfully".to_string(),
        user: AccountSummary {
            id: account.id,
            email: account.email,
            name: account.name,
        },
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    success: bool,
    message: String,
    user: AccountSummary,
    session: SessionSummary,
}

#[derive(Serialize)]
struct SessionSummary {
    access_token: Uuid,
    expires_at: DateTime<Utc>,
}

/// POST /api/auth/login — verifies credentials and sets the HTTP-only session
/// cookie. The session id doubles as the opaque bearer token.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let email_raw = validate::required_text(request.email.as_deref(), "Email")?;
    let email = validate::email_address(&email_raw)?;
    let password = validate::required_text(request.password.as_deref(), "Password")?;

    let auth_row = data::fetch_account_auth_by_email(state.pool_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&password, &auth_row.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = Uuid::new_v4();
    let expires_at = Utc::now() + ChronoDuration::days(SESSION_TTL_DAYS);
    data::create_session(state.pool_ref(), token, auth_row.id, expires_at).await?;

    let account = data::fetch_account_by_session(state.pool_ref(), token)
        .await?
        .ok_or_else(|| ApiError::Dependency(anyhow!("session vanished after creation")))?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(CookieDuration::days(SESSION_TTL_DAYS));
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            user: AccountSummary {
                id: account.id,
                email: account.email,
                name: account.name,
            },
            session: SessionSummary {
                access_token: token,
                expires_at,
            },
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    success: bool,
    message: String,
}

/// POST /api/auth/logout — drops the server-side session and clears the
/// cookie. Succeeds even without a live session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let mut jar = jar;

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(token) = Uuid::parse_str(cookie.value()) {
            if let Err(err) = data::delete_session(state.pool_ref(), token).await {
                error!(?err, "failed to remove session during logout");
            }
        }
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.set_http_only(true);
    removal.set_same_site(SameSite::Lax);
    removal.set_max_age(CookieDuration::seconds(0));
    jar = jar.remove(removal);

    (
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

#[derive(Serialize)]
pub struct MeResponse {
    user: MeSummary,
}

#[derive(Serialize)]
struct MeSummary {
    id: Uuid,
    email: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

/// GET /api/auth/me — resolves the caller from a bearer token or the session
/// cookie.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<MeResponse>, ApiError> {
    let token = bearer_token(&headers)
        .or_else(|| jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string()))
        .ok_or_else(|| ApiError::unauthorized("No authentication token provided"))?;

    let token = Uuid::parse_str(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let account = data::fetch_account_by_session(state.pool_ref(), token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    Ok(Json(MeResponse {
        user: MeSummary {
            id: account.id,
            email: account.email,
            name: account.name,
            created_at: account.created_at,
        },
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc-123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc-123".to_string()));

        let mut basic = HeaderMap::new();
        basic.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcg=="),
        );
        assert_eq!(bearer_token(&basic), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
