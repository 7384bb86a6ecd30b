//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::UserRole,
        user::{User, UserShort},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Look up an account by username and role (the pair is unique)
    pub async fn get_by_username_and_role(&self, username: &str, role: UserRole) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password_hash, user_role, dept_id
            FROM users
            WHERE username = $1 AND user_role = $2
            "#,
        )
        .bind(username)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// All users, without password hashes
    pub async fn list(&self) -> AppResult<Vec<UserShort>> {
        let users = sqlx::query_as::<_, UserShort>(
            "SELECT user_id, username, user_role, dept_id FROM users ORDER BY user_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, username: &str, password_hash: &str, role: UserRole, dept_id: Option<i32>) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, password_hash, user_role, dept_id)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(dept_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
