//! Aggregations behind the dashboard and analytics screens.
//!
//! Everything here is a pure function over rows already fetched (and
//! scoped) by the caller, so nothing in this module touches the database.

mod dashboard;
mod distribution;
mod trends;

pub use dashboard::{dashboard_stats, engineer_performance, recent, DashboardStats, EngineerPerformance, PriorityCount};
pub use distribution::{category_distribution, status_breakdown, CategoryShare, StatusCount, CHART_PALETTE};
pub use trends::{monthly_trends, MonthlyTrend, DEFAULT_TREND_MONTHS};

/// Percentage of `part` in `total`
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// One decimal place, halves rounded up ("1.25" reads as "1.3")
fn round1(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::{
        asset::Asset,
        call_log::CallLog,
        complaint::Complaint,
        enums::{AssetCategory, AssetStatus, CallStatus, CallType, ComplaintStatus, Priority},
    };

    pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    pub fn complaint(id: i32, status: ComplaintStatus, priority: Priority, eng: Option<i32>) -> Complaint {
        Complaint {
            comp_id: id,
            asset_id: 1,
            asset_name: "Dell Latitude 5520".to_string(),
            raised_by: 1,
            reported_by: "admin".to_string(),
            issue: "Screen flickering on boot".to_string(),
            comp_status: status,
            priority,
            creation_time: at(2024, 1, 15),
            eng_assigned: eng,
            assigned_to: None,
            expected_res_date: None,
            spare_req: None,
            total_time_taken: None,
            actual_res_date: None,
            comp_type: None,
            updated_at: at(2024, 1, 15),
        }
    }

    pub fn call_log(id: i32, created_at: DateTime<Utc>) -> CallLog {
        CallLog {
            call_id: id,
            call_type: CallType::Phone,
            contact_person: "Reception".to_string(),
            contact_number: None,
            description: None,
            handled_by: None,
            status: CallStatus::Open,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn asset(id: i32, category: Option<AssetCategory>, status: Option<AssetStatus>) -> Asset {
        Asset {
            asset_id: id,
            asset_name: format!("Asset {}", id),
            category,
            serial_number: format!("SN{:04}", id),
            status,
            location: None,
            purchase_date: None,
            warranty_expiry: None,
            amc_or_warranty: None,
            inventory_count: 1,
            vendor_name: None,
            dept_id: Some(1),
            dept_name: Some("IT".to_string()),
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }
}
