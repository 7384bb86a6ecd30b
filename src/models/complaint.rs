//! Complaint model and lifecycle rules

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::{ComplaintStatus, Priority};
use crate::error::{AppError, AppResult};

/// Minimum length of a complaint description at intake
pub const MIN_ISSUE_LENGTH: usize = 10;

/// Complaint enriched with asset, raiser and assignee names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Complaint {
    pub comp_id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub raised_by: i32,
    /// Username of the raiser
    pub reported_by: String,
    pub issue: String,
    pub comp_status: ComplaintStatus,
    pub priority: Priority,
    pub creation_time: DateTime<Utc>,
    pub eng_assigned: Option<i32>,
    /// Username of the assigned engineer
    pub assigned_to: Option<String>,
    pub expected_res_date: Option<NaiveDate>,
    pub spare_req: Option<String>,
    /// Elapsed time between creation and resolution (HH:MM:SS)
    pub total_time_taken: Option<String>,
    pub actual_res_date: Option<DateTime<Utc>>,
    pub comp_type: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Create complaint request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComplaint {
    pub asset_id: i32,
    pub raised_by: i32,
    #[validate(custom(function = "validate_issue"))]
    pub issue: String,
    pub comp_status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
    pub eng_assigned: Option<i32>,
    pub expected_res_date: Option<NaiveDate>,
    pub spare_req: Option<String>,
    pub comp_type: Option<String>,
}

/// Update complaint request.
///
/// Absent fields are left untouched. `eng_assigned`, `expected_res_date` and
/// `actual_res_date` may be sent as `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaint {
    pub asset_id: Option<i32>,
    pub raised_by: Option<i32>,
    #[validate(custom(function = "validate_issue"))]
    pub issue: Option<String>,
    pub comp_status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub eng_assigned: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub expected_res_date: Option<Option<NaiveDate>>,
    pub spare_req: Option<String>,
    pub comp_type: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub actual_res_date: Option<Option<DateTime<Utc>>>,
}

fn validate_issue(issue: &str) -> Result<(), ValidationError> {
    let trimmed = issue.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("issue_required");
        err.message = Some(Cow::from("Please describe the issue"));
        return Err(err);
    }
    if trimmed.chars().count() < MIN_ISSUE_LENGTH {
        let mut err = ValidationError::new("issue_too_short");
        err.message = Some(Cow::from(format!(
            "Issue description must be at least {} characters",
            MIN_ISSUE_LENGTH
        )));
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl ComplaintStatus {
    /// Allowed moves: forward progress, staying put, and re-opening a resolved complaint
    pub fn can_transition_to(self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        self == next
            || matches!(
                (self, next),
                (Open, InProgress) | (Open, Resolved) | (InProgress, Resolved) | (Resolved, Open)
            )
    }
}

/// How strictly status changes are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRules {
    pub enforce: bool,
}

impl TransitionRules {
    pub fn strict() -> Self {
        Self { enforce: true }
    }

    pub fn permissive() -> Self {
        Self { enforce: false }
    }
}

/// Lifecycle columns of a complaint row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct LifecycleState {
    pub comp_status: ComplaintStatus,
    pub creation_time: DateTime<Utc>,
    pub actual_res_date: Option<DateTime<Utc>>,
    pub total_time_taken: Option<String>,
}

impl LifecycleState {
    /// Compute the lifecycle columns after applying `changes`.
    ///
    /// `total_time_taken` is only ever derived here: it is set iff
    /// `actual_res_date` is set and not earlier than `creation_time`.
    pub fn apply(&self, changes: &UpdateComplaint, rules: TransitionRules) -> AppResult<LifecycleState> {
        let next_status = changes.comp_status.unwrap_or(self.comp_status);
        if rules.enforce && !self.comp_status.can_transition_to(next_status) {
            return Err(AppError::Validation(format!(
                "Cannot move complaint from '{}' to '{}'",
                self.comp_status, next_status
            )));
        }

        let reopened = self.comp_status == ComplaintStatus::Resolved && next_status != ComplaintStatus::Resolved;

        let (actual_res_date, total_time_taken) = match changes.actual_res_date {
            Some(Some(resolved_at)) => (Some(resolved_at), resolution_time(self.creation_time, resolved_at)),
            Some(None) => (None, None),
            None if reopened => (None, None),
            None => (self.actual_res_date, self.total_time_taken.clone()),
        };

        Ok(LifecycleState {
            comp_status: next_status,
            creation_time: self.creation_time,
            actual_res_date,
            total_time_taken,
        })
    }
}

/// Elapsed time between creation and resolution, `None` when resolution precedes creation
pub fn resolution_time(created: DateTime<Utc>, resolved: DateTime<Utc>) -> Option<String> {
    let diff_ms = (resolved - created).num_milliseconds();
    if diff_ms < 0 {
        return None;
    }
    Some(format_elapsed(diff_ms))
}

/// Format milliseconds as zero-padded `HH:MM:SS`; hours do not roll over into days
pub fn format_elapsed(millis: i64) -> String {
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = (millis % 60_000) / 1000;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
