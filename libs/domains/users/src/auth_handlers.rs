//! Authentication flows: register, login, logout.
//!
//! The access token is an HS256 JWT delivered in an HttpOnly cookie; the
//! same token is accepted via `Authorization: Bearer` for non-browser
//! clients.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use axum_helpers::{JwtAuth, ValidatedJson, ACCESS_TOKEN_TTL};

use crate::error::UserError;
use crate::models::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Shared state for the users router
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

/// Check if running in development mode
fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or_else(|_| cfg!(debug_assertions))
}

/// Build the Set-Cookie value carrying the access token
fn build_auth_cookie(token: &str) -> String {
    let secure_flag = if is_development() { "" } else { " Secure;" };
    format!(
        "access_token={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        token, secure_flag, ACCESS_TOKEN_TTL
    )
}

/// Build the Set-Cookie value that clears the access token
fn clear_auth_cookie() -> &'static str {
    "access_token=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"
}

fn issue_token<R: UserRepository>(
    state: &AuthState<R>,
    user: &UserResponse,
    roles: &[String],
) -> Result<HeaderValue, UserError> {
    let token = state
        .jwt_auth
        .create_access_token(&user.id.to_string(), &user.email, &user.username, roles)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    HeaderValue::from_str(&build_auth_cookie(&token))
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; auth cookie set", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<Response, UserError> {
    let (user, roles) = state.service.register(input).await?;
    let cookie = issue_token(&state, &user, &roles)?;

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(user),
    )
        .into_response())
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; auth cookie set", body = UserResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Response, UserError> {
    let (user, roles) = state.service.authenticate(input).await?;
    let cookie = issue_token(&state, &user, &roles)?;

    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(user)).into_response())
}

/// Logout by clearing the auth cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(
            header::SET_COOKIE,
            HeaderValue::from_static(clear_auth_cookie()),
        )]),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_shape() {
        temp_env::with_var("APP_ENV", Some("development"), || {
            let cookie = build_auth_cookie("abc.def.ghi");
            assert!(cookie.starts_with("access_token=abc.def.ghi; HttpOnly;"));
            assert!(cookie.contains("SameSite=Strict"));
            assert!(cookie.contains("Path=/"));
            assert!(cookie.ends_with(&format!("Max-Age={}", ACCESS_TOKEN_TTL)));
            assert!(!cookie.contains("Secure"));
        });
    }

    #[test]
    fn test_auth_cookie_secure_in_production() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            let cookie = build_auth_cookie("abc.def.ghi");
            assert!(cookie.contains("Secure;"));
        });
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(clear_auth_cookie().contains("Max-Age=0"));
    }
}
