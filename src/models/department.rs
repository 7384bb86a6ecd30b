//! Department model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub dept_id: i32,
    pub dept_name: String,
}

/// Resolve a department given either its id ("2") or its name ("Finance")
pub fn resolve_department(departments: &[Department], value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(id) = value.parse::<i32>() {
        return departments.iter().find(|d| d.dept_id == id).map(|d| d.dept_id);
    }
    departments
        .iter()
        .find(|d| d.dept_name.eq_ignore_ascii_case(value))
        .map(|d| d.dept_id)
}
