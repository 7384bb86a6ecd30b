//! User model and request scoping

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::UserRole;

/// Full user record, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
    pub user_role: UserRole,
    pub dept_id: Option<i32>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserShort {
    pub user_id: i32,
    pub username: String,
    pub user_role: UserRole,
    pub dept_id: Option<i32>,
}

impl From<User> for UserShort {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            user_role: user.user_role,
            dept_id: user.dept_id,
        }
    }
}

/// Caller scope sent by clients on list endpoints (`?user_role=Engineer&dept_id=2`)
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScopeQuery {
    /// Role of the caller
    pub user_role: Option<UserRole>,
    /// Department of the caller
    pub dept_id: Option<i32>,
}

impl ScopeQuery {
    pub fn new(user_role: Option<UserRole>, dept_id: Option<i32>) -> Self {
        Self { user_role, dept_id }
    }

    /// Department the results must be restricted to.
    /// Only engineers are scoped; admins (or a missing department) see everything.
    pub fn department_filter(&self) -> Option<i32> {
        match (self.user_role, self.dept_id) {
            (Some(UserRole::Engineer), Some(dept_id)) => Some(dept_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_filter() {
        assert_eq!(ScopeQuery::new(Some(UserRole::Engineer), Some(3)).department_filter(), Some(3));
        assert_eq!(ScopeQuery::new(Some(UserRole::Admin), Some(3)).department_filter(), None);
        assert_eq!(ScopeQuery::new(Some(UserRole::Engineer), None).department_filter(), None);
        assert_eq!(ScopeQuery::default().department_filter(), None);
    }
}
