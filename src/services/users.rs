//! Login and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{User, UserShort},
    },
    repository::Repository,
};

/// Username of the account created on an empty database
pub const BOOTSTRAP_ADMIN: &str = "admin";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check a username/role/password triple
    pub async fn login(&self, username: &str, password: &str, role: UserRole) -> AppResult<UserShort> {
        let user = self
            .repository
            .users
            .get_by_username_and_role(username.trim(), role)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !verify_password(&user, password)? {
            tracing::info!(username = %user.username, "Rejected login: wrong password");
            return Err(AppError::Authentication("Incorrect password".to_string()));
        }

        tracing::info!(user_id = user.user_id, role = %user.user_role, "User logged in");
        Ok(user.into())
    }

    pub async fn list(&self) -> AppResult<Vec<UserShort>> {
        self.repository.users.list().await
    }

    /// Create the `admin` account when no user exists yet. Returns whether one was created.
    pub async fn ensure_bootstrap_admin(&self, password: Option<&str>) -> AppResult<bool> {
        if self.repository.users.count().await? > 0 {
            return Ok(false);
        }
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            tracing::warn!("No users exist and no bootstrap admin password is configured");
            return Ok(false);
        };

        let hash = hash_password(password)?;
        let id = self
            .repository
            .users
            .create(BOOTSTRAP_ADMIN, &hash, UserRole::Admin, None)
            .await?;
        tracing::info!(user_id = id, "Created bootstrap admin account");
        Ok(true)
    }
}

/// Hash a password into an argon2 PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(user: &User, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash for user {}: {}", user.user_id, e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> User {
        User {
            user_id: 1,
            username: "admin".to_string(),
            password_hash: hash_password(password).unwrap(),
            user_role: UserRole::Admin,
            dept_id: None,
        }
    }

    #[test]
    fn test_password_round_trip() {
        let user = user_with_password("s3cret-pass");
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(verify_password(&user, "s3cret-pass").unwrap());
        assert!(!verify_password(&user, "wrong").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        let mut user = user_with_password("x");
        user.password_hash = "not-a-hash".to_string();
        assert!(matches!(verify_password(&user, "x"), Err(AppError::Internal(_))));
    }
}
