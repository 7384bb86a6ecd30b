//! Asset model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::{AssetCategory, AssetStatus, Coverage};

/// Asset record, joined with its department name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub asset_id: i32,
    pub asset_name: String,
    #[schema(value_type = Option<String>, example = "Printer")]
    pub category: Option<AssetCategory>,
    pub serial_number: String,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub amc_or_warranty: Option<Coverage>,
    pub inventory_count: i32,
    pub vendor_name: Option<String>,
    pub dept_id: Option<i32>,
    pub dept_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create asset request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_warranty_dates"))]
pub struct CreateAsset {
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub asset_name: String,
    #[schema(value_type = String, example = "PC/CPU")]
    pub category: AssetCategory,
    #[serde(alias = "s_no")]
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    pub status: AssetStatus,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(alias = "amc_or_war")]
    pub amc_or_warranty: Option<Coverage>,
    #[serde(default, alias = "inventory")]
    #[validate(range(min = 0, message = "Inventory must be a positive number"))]
    pub inventory_count: i32,
    pub vendor_name: Option<String>,
    pub dept_id: i32,
}

/// Update asset request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, message = "Asset name cannot be empty"))]
    pub asset_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub category: Option<AssetCategory>,
    #[serde(alias = "s_no")]
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(alias = "amc_or_war")]
    pub amc_or_warranty: Option<Coverage>,
    #[serde(alias = "inventory")]
    #[validate(range(min = 0, message = "Inventory must be a positive number"))]
    pub inventory_count: Option<i32>,
    pub vendor_name: Option<String>,
    pub dept_id: Option<i32>,
}

fn validate_warranty_dates(asset: &CreateAsset) -> Result<(), ValidationError> {
    check_warranty_dates(asset.purchase_date, asset.warranty_expiry)
}

/// Warranty expiry cannot precede the purchase date
pub fn check_warranty_dates(
    purchase_date: Option<NaiveDate>,
    warranty_expiry: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (purchase_date, warranty_expiry) {
        (Some(purchase), Some(expiry)) if expiry < purchase => {
            let mut err = ValidationError::new("warranty_before_purchase");
            err.message = Some(Cow::from("Warranty expiry date cannot be before purchase date"));
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(value: serde_json::Value) -> CreateAsset {
        serde_json::from_value(value).expect("valid asset payload")
    }

    #[test]
    fn test_create_asset_accepts_legacy_field_names() {
        let asset = create_request(json!({
            "asset_name": "HP LaserJet Pro",
            "category": "Printer",
            "s_no": "HP4500002",
            "status": "Under Repair",
            "location": "Floor 2, Print Room",
            "amc_or_war": "AMC",
            "inventory": 1,
            "dept_id": 2
        }));
        assert_eq!(asset.serial_number, "HP4500002");
        assert_eq!(asset.status, AssetStatus::InRepair);
        assert_eq!(asset.amc_or_warranty, Some(Coverage::Amc));
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn test_create_asset_rejects_inverted_warranty() {
        let asset = create_request(json!({
            "asset_name": "Dell Latitude 5520",
            "category": "PC/CPU",
            "serial_number": "DL5520001",
            "status": "Active",
            "location": "Floor 3",
            "purchase_date": "2024-05-01",
            "warranty_expiry": "2023-05-01",
            "dept_id": 1
        }));
        assert!(asset.validate().is_err());
    }

    #[test]
    fn test_create_asset_rejects_negative_inventory() {
        let asset = create_request(json!({
            "asset_name": "Cisco Catalyst 2960",
            "category": "Router",
            "serial_number": "CC2960003",
            "status": "Active",
            "location": "Server Room A",
            "inventory_count": -2,
            "dept_id": 1
        }));
        assert!(asset.validate().is_err());
    }
}
