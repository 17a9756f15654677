//! User Service - Business logic layer

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    AdminUpdateUser, LoginRequest, RegisterRequest, UpdateProfile, User, UserResponse,
};
use crate::repository::UserRepository;

/// User service providing account and credential operations
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<(UserResponse, Vec<String>)> {
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, input.email, password_hash);
        let roles = user.roles();

        let created = self.repository.create(user).await?;
        Ok((created.into(), roles))
    }

    /// Verify credentials for login
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn authenticate(&self, input: LoginRequest) -> UserResult<(UserResponse, Vec<String>)> {
        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let roles = user.roles();
        Ok((user.into(), roles))
    }

    /// Get one's own profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(user.into())
    }

    /// Update one's own profile; a password change re-hashes
    #[instrument(skip(self, input))]
    pub async fn update_profile(&self, id: Uuid, input: UpdateProfile) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::DuplicateEmail);
            }
        }

        let new_password_hash = match input.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        user.apply_profile_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// List all accounts (admin)
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Get any account by id (admin)
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.get_profile(id).await
    }

    /// Update any account (admin)
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: AdminUpdateUser) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::DuplicateEmail);
            }
        }

        user.apply_admin_update(input);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Delete an account (admin); admin accounts are protected
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        if user.is_admin {
            return Err(UserError::CannotDeleteAdmin);
        }

        self.repository.delete(id).await?;
        Ok(())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn register_input() -> RegisterRequest {
        RegisterRequest {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(true));

        let service = UserService::new(repo);
        let result = service.register(register_input()).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|user| user.password_hash != "hunter2hunter2" && !user.is_admin)
            .returning(Ok);

        let service = UserService::new(repo);
        let (user, roles) = service.register(register_input()).await.unwrap();

        assert_eq!(user.username, "jane");
        assert_eq!(roles, vec!["user"]);
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let mut seeded: Option<User> = None;
        {
            // Hash once through the service so verify sees a real argon2 hash
            let service = UserService::new(MockUserRepository::new());
            let hash = service.hash_password("hunter2hunter2").unwrap();
            seeded = Some(User::new(
                "jane".to_string(),
                "jane@example.com".to_string(),
                hash,
            ));
        }
        let stored = seeded.unwrap();

        let mut repo = MockUserRepository::new();
        let found = stored.clone();
        repo.expect_get_by_email()
            .returning(move |_| Ok(Some(found.clone())));

        let service = UserService::new(repo);

        let ok = service
            .authenticate(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await;
        assert!(ok.is_ok());

        let bad = service
            .authenticate(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        assert!(matches!(bad, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service
            .authenticate(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_delete_user_protects_admin_accounts() {
        let mut admin = User::new(
            "root".to_string(),
            "root@example.com".to_string(),
            "hash".to_string(),
        );
        admin.is_admin = true;

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(admin.clone())));
        // no delete expectation: the protected account must survive

        let service = UserService::new(repo);
        let result = service.delete_user(Uuid::now_v7()).await;

        assert!(matches!(result, Err(UserError::CannotDeleteAdmin)));
    }

    #[tokio::test]
    async fn test_update_profile_rehashes_password() {
        let stored = User::new(
            "jane".to_string(),
            "jane@example.com".to_string(),
            "old-hash".to_string(),
        );

        let mut repo = MockUserRepository::new();
        let found = stored.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update()
            .withf(|user| user.password_hash != "old-hash" && user.password_hash != "new-password1")
            .returning(Ok);

        let service = UserService::new(repo);
        service
            .update_profile(
                stored.id,
                UpdateProfile {
                    password: Some("new-password1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
}
