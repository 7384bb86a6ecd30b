//! Call log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{CallStatus, CallType};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CallLog {
    pub call_id: i32,
    pub call_type: CallType,
    pub contact_person: String,
    pub contact_number: Option<String>,
    pub description: Option<String>,
    /// Name of the person who took the call
    pub handled_by: Option<String>,
    pub status: CallStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create call log request. New logs always start `Open`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCallLog {
    #[serde(alias = "type")]
    pub call_type: CallType,
    #[serde(alias = "contactPerson")]
    #[validate(length(min = 1, message = "Contact person is required"))]
    pub contact_person: String,
    #[serde(alias = "contactNumber")]
    pub contact_number: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "handledBy")]
    pub handled_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCallLog {
    #[serde(alias = "type")]
    pub call_type: Option<CallType>,
    #[serde(alias = "contactPerson")]
    #[validate(length(min = 1, message = "Contact person cannot be empty"))]
    pub contact_person: Option<String>,
    #[serde(alias = "contactNumber")]
    pub contact_number: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "handledBy")]
    pub handled_by: Option<String>,
    pub status: Option<CallStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_aliases() {
        let log: CreateCallLog = serde_json::from_value(json!({
            "type": "Walk In",
            "contactPerson": "Ravi",
            "contactNumber": "9800000000",
            "handledBy": "Helpdesk"
        }))
        .unwrap();
        assert_eq!(log.call_type, CallType::WalkIn);
        assert_eq!(log.contact_person, "Ravi");
        assert_eq!(log.handled_by.as_deref(), Some("Helpdesk"));
        assert!(log.validate().is_ok());
    }

    #[test]
    fn test_empty_contact_rejected() {
        let log: CreateCallLog = serde_json::from_value(json!({
            "call_type": "Phone",
            "contact_person": ""
        }))
        .unwrap();
        assert!(log.validate().is_err());
    }
}
