use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity - represents an account stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Argon2 password hash. The entity serializes it (it must reach the
    /// store); handlers only ever return [`UserResponse`], which omits it.
    pub password_hash: String,
    /// Whether the account has the admin role
    pub is_admin: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for updating one's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
}

/// DTO for admin updates to any account
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl User {
    /// Create a new non-admin user (password already hashed by the service)
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role claim values for this account
    pub fn roles(&self) -> Vec<String> {
        if self.is_admin {
            vec!["user".to_string(), "admin".to_string()]
        } else {
            vec!["user".to_string()]
        }
    }

    /// Apply a profile update (password should already be hashed if provided)
    pub fn apply_profile_update(&mut self, update: UpdateProfile, new_password_hash: Option<String>) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        self.updated_at = Utc::now();
    }

    /// Apply an admin update
    pub fn apply_admin_update(&mut self, update: AdminUpdateUser) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_admin() {
        let user = User::new(
            "jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        assert!(!user.is_admin);
        assert_eq!(user.roles(), vec!["user"]);
    }

    #[test]
    fn test_admin_roles_include_admin() {
        let mut user = User::new(
            "root".to_string(),
            "root@example.com".to_string(),
            "hash".to_string(),
        );
        user.is_admin = true;
        assert_eq!(user.roles(), vec!["user", "admin"]);
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let user = User::new(
            "jane".to_string(),
            "jane@example.com".to_string(),
            "super-secret-hash".to_string(),
        );
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("super-secret-hash"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_admin_update_can_toggle_is_admin() {
        let mut user = User::new(
            "jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        user.apply_admin_update(AdminUpdateUser {
            is_admin: Some(true),
            ..Default::default()
        });
        assert!(user.is_admin);
    }
}
