use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{call_log::CallLog, complaint::Complaint, enums::ComplaintStatus};

pub const DEFAULT_TREND_MONTHS: u32 = 7;

/// Activity of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyTrend {
    /// Short month name, e.g. "Jan"
    pub month: String,
    /// Calendar month as YYYY-MM
    pub period: String,
    pub complaints: usize,
    /// Complaints created this month that are resolved now
    pub resolved: usize,
    pub calls: usize,
}

/// First day of the month `back` months before the month of `now`
fn month_start(now: DateTime<Utc>, back: u32) -> Option<NaiveDate> {
    let index = now.year() * 12 + now.month0() as i32 - back as i32;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Trailing `months` calendar months ending with the month of `now`, oldest first
pub fn monthly_trends(
    complaints: &[Complaint],
    call_logs: &[CallLog],
    months: u32,
    now: DateTime<Utc>,
) -> Vec<MonthlyTrend> {
    let in_month = |ts: &DateTime<Utc>, start: NaiveDate| ts.year() == start.year() && ts.month() == start.month();

    (0..months)
        .rev()
        .filter_map(|back| month_start(now, back))
        .map(|start| {
            let created: Vec<&Complaint> = complaints
                .iter()
                .filter(|c| in_month(&c.creation_time, start))
                .collect();

            MonthlyTrend {
                month: start.format("%b").to_string(),
                period: start.format("%Y-%m").to_string(),
                complaints: created.len(),
                resolved: created
                    .iter()
                    .filter(|c| c.comp_status == ComplaintStatus::Resolved)
                    .count(),
                calls: call_logs
                    .iter()
                    .filter(|l| in_month(&l.created_at, start))
                    .count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{at, call_log, complaint};
    use crate::models::enums::Priority;

    #[test]
    fn test_window_crosses_year_boundary() {
        let trends = monthly_trends(&[], &[], 7, at(2024, 3, 10));
        let periods: Vec<&str> = trends.iter().map(|t| t.period.as_str()).collect();
        assert_eq!(
            periods,
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03"]
        );
        assert_eq!(trends[0].month, "Sep");
        assert!(trends.iter().all(|t| t.complaints == 0 && t.calls == 0));
    }

    #[test]
    fn test_counts_by_creation_month() {
        let mut jan_open = complaint(1, ComplaintStatus::Open, Priority::Low, None);
        jan_open.creation_time = at(2024, 1, 3);
        let mut jan_done = complaint(2, ComplaintStatus::Resolved, Priority::Low, None);
        jan_done.creation_time = at(2024, 1, 31);
        let mut old = complaint(3, ComplaintStatus::Resolved, Priority::Low, None);
        old.creation_time = at(2022, 1, 1);

        let logs = vec![call_log(1, at(2024, 2, 1)), call_log(2, at(2024, 2, 29))];

        let trends = monthly_trends(&[jan_open, jan_done, old], &logs, 2, at(2024, 2, 15));
        assert_eq!(trends.len(), 2);
        assert_eq!((trends[0].complaints, trends[0].resolved, trends[0].calls), (2, 1, 0));
        assert_eq!((trends[1].complaints, trends[1].resolved, trends[1].calls), (0, 0, 2));
    }

    #[test]
    fn test_zero_months() {
        assert!(monthly_trends(&[], &[], 0, at(2024, 1, 1)).is_empty());
    }
}
