//! Spreadsheet rows for bulk asset import.
//!
//! Rows arrive as the JSON produced by a sheet-to-JSON conversion: one object
//! per data row, keyed by the header cell. Cells may be text, numbers or booleans.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    asset::{check_warranty_dates, CreateAsset},
    department::{resolve_department, Department},
    enums::{AssetCategory, AssetStatus, Coverage},
};

/// Spreadsheet serial day numbers count from 1899-12-30
const SHEET_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Serial number of 9999-12-31
const MAX_SHEET_SERIAL: f64 = 2_958_465.0;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SheetCell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl SheetCell {
    /// Cell rendered as trimmed text; integral numbers lose their ".0"
    pub fn text(&self) -> String {
        match self {
            SheetCell::Text(s) => s.trim().to_string(),
            SheetCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            SheetCell::Number(n) => n.to_string(),
            SheetCell::Bool(b) => b.to_string(),
        }
    }

    /// Parse a date cell: ISO text, day-first text, or a serial day number
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            SheetCell::Number(n) if *n >= 1.0 && *n <= MAX_SHEET_SERIAL => {
                let (y, m, d) = SHEET_EPOCH;
                NaiveDate::from_ymd_opt(y, m, d)
                    .map(|epoch| epoch + Duration::days(n.trunc() as i64))
            }
            SheetCell::Text(s) => {
                let s = s.trim();
                ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            }
            _ => None,
        }
    }

    /// Parse a non-negative whole number
    pub fn count(&self) -> Option<i32> {
        match self {
            SheetCell::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= i32::MAX as f64 => {
                Some(*n as i32)
            }
            SheetCell::Text(s) => s.trim().parse::<i32>().ok().filter(|n| *n >= 0),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, SheetCell::Text(s) if s.trim().is_empty())
    }
}

/// One spreadsheet row, keyed by the template's column headers
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BulkAssetRow {
    #[serde(rename = "Asset", alias = "Asset Name")]
    #[schema(value_type = Option<String>)]
    pub asset: Option<SheetCell>,
    #[serde(rename = "Category")]
    #[schema(value_type = Option<String>)]
    pub category: Option<SheetCell>,
    #[serde(rename = "Serial Number")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<SheetCell>,
    #[serde(rename = "Status")]
    #[schema(value_type = Option<String>)]
    pub status: Option<SheetCell>,
    #[serde(rename = "Department")]
    #[schema(value_type = Option<String>)]
    pub department: Option<SheetCell>,
    #[serde(rename = "Location")]
    #[schema(value_type = Option<String>)]
    pub location: Option<SheetCell>,
    #[serde(rename = "AMC/Warranty", alias = "AMC or Warranty")]
    #[schema(value_type = Option<String>)]
    pub amc_or_warranty: Option<SheetCell>,
    #[serde(rename = "Purchase Date")]
    #[schema(value_type = Option<String>)]
    pub purchase_date: Option<SheetCell>,
    #[serde(rename = "Warranty Expiry")]
    #[schema(value_type = Option<String>)]
    pub warranty_expiry: Option<SheetCell>,
    #[serde(rename = "Inventory")]
    #[schema(value_type = Option<String>)]
    pub inventory: Option<SheetCell>,
    #[serde(rename = "Vendor", alias = "Vendor Name")]
    #[schema(value_type = Option<String>)]
    pub vendor: Option<SheetCell>,
}

/// Validation problems of one spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RowError {
    /// Spreadsheet row number (the header is row 1)
    pub row: usize,
    pub errors: Vec<String>,
}

/// Bulk upload success response
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkUploadResponse {
    pub success: bool,
    pub message: String,
    pub inserted: usize,
}

fn required(cell: &Option<SheetCell>, column: &str, errors: &mut Vec<String>) -> Option<String> {
    match cell {
        Some(c) if !c.is_blank() => Some(c.text()),
        _ => {
            errors.push(format!("Missing required column '{}'", column));
            None
        }
    }
}

fn optional(cell: &Option<SheetCell>) -> Option<&SheetCell> {
    cell.as_ref().filter(|c| !c.is_blank())
}

impl BulkAssetRow {
    /// Convert the row into a create request, collecting every problem found
    pub fn to_create(&self, departments: &[Department]) -> Result<CreateAsset, Vec<String>> {
        let mut errors = Vec::new();

        let asset_name = required(&self.asset, "Asset", &mut errors);
        let serial_number = required(&self.serial_number, "Serial Number", &mut errors);
        let location = required(&self.location, "Location", &mut errors);

        let category = required(&self.category, "Category", &mut errors)
            .and_then(|c| c.parse::<AssetCategory>().map_err(|e| errors.push(e)).ok());
        let status = required(&self.status, "Status", &mut errors)
            .and_then(|s| s.parse::<AssetStatus>().map_err(|e| errors.push(e)).ok());
        let dept_id = required(&self.department, "Department", &mut errors).and_then(|d| {
            let resolved = resolve_department(departments, &d);
            if resolved.is_none() {
                errors.push(format!("Unknown department '{}'", d));
            }
            resolved
        });

        let amc_or_warranty = optional(&self.amc_or_warranty)
            .and_then(|c| c.text().parse::<Coverage>().map_err(|e| errors.push(e)).ok());

        let mut date = |cell: &Option<SheetCell>, column: &str| {
            optional(cell).and_then(|c| {
                let parsed = c.date();
                if parsed.is_none() {
                    errors.push(format!("Invalid date in '{}': {}", column, c.text()));
                }
                parsed
            })
        };
        let purchase_date = date(&self.purchase_date, "Purchase Date");
        let warranty_expiry = date(&self.warranty_expiry, "Warranty Expiry");

        let inventory_count = match optional(&self.inventory) {
            Some(c) => c.count().unwrap_or_else(|| {
                errors.push(format!("Inventory must be a positive number: {}", c.text()));
                0
            }),
            None => 0,
        };

        if let Err(e) = check_warranty_dates(purchase_date, warranty_expiry) {
            errors.push(e.message.map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()));
        }

        match (asset_name, category, serial_number, status, location, dept_id) {
            (Some(asset_name), Some(category), Some(serial_number), Some(status), Some(location), Some(dept_id))
                if errors.is_empty() =>
            {
                Ok(CreateAsset {
                    asset_name,
                    category,
                    serial_number,
                    status,
                    location,
                    purchase_date,
                    warranty_expiry,
                    amc_or_warranty,
                    inventory_count,
                    vendor_name: optional(&self.vendor).map(SheetCell::text),
                    dept_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validate a whole batch. Either every row converts, or the per-row report is returned.
pub fn validate_batch(
    rows: &[BulkAssetRow],
    departments: &[Department],
) -> Result<Vec<CreateAsset>, Vec<RowError>> {
    let mut valid = Vec::with_capacity(rows.len());
    let mut report = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match row.to_create(departments) {
            Ok(asset) => valid.push(asset),
            Err(errors) => report.push(RowError { row: index + 2, errors }),
        }
    }

    if report.is_empty() {
        Ok(valid)
    } else {
        Err(report)
    }
}
