//! Extractor exposing the authenticated identity to handlers.

use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts, response::{IntoResponse, Response}};
use uuid::Uuid;

/// The verified identity of the calling user.
///
/// Populated from the [`JwtClaims`] that `jwt_auth_middleware` (or
/// `admin_auth_middleware`) inserted into request extensions. Using this
/// extractor on a route that is not behind one of those middlewares
/// yields 401.
///
/// # Example
/// ```ignore
/// async fn profile(user: AuthUser) -> String {
///     format!("Hello, {}", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == super::jwt::ROLE_ADMIN)
    }
}

impl TryFrom<&JwtClaims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(Self {
            id,
            email: claims.email.clone(),
            name: claims.name.clone(),
            roles: claims.roles.clone(),
        })
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| {
                AppError::Unauthorized("Authentication required".to_string()).into_response()
            })?;

        AuthUser::try_from(claims).map_err(|e| e.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "jane@example.com".to_string(),
            name: "jane".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_try_from_valid_claims() {
        let id = Uuid::now_v7();
        let user = AuthUser::try_from(&claims(&id.to_string(), &["user"])).unwrap();
        assert_eq!(user.id, id);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_try_from_admin_claims() {
        let id = Uuid::now_v7();
        let user = AuthUser::try_from(&claims(&id.to_string(), &["user", "admin"])).unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_try_from_bad_subject() {
        assert!(AuthUser::try_from(&claims("not-a-uuid", &["user"])).is_err());
    }
}
