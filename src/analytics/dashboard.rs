use serde::Serialize;
use utoipa::ToSchema;

use super::{percentage, round1};
use crate::models::{
    asset::Asset,
    call_log::CallLog,
    complaint::Complaint,
    enums::{AssetStatus, ComplaintStatus, Priority},
    pm_report::PmReport,
    user::UserShort,
};

/// Headline counters of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_assets: usize,
    pub assets_under_repair: usize,
    pub active_assets: usize,
    /// Complaints not yet resolved
    pub active_complaints: usize,
    pub call_logs: usize,
    pub pm_reports: usize,
    pub critical_complaints: usize,
    /// Whole percentage of resolved complaints
    pub resolution_rate: u32,
    pub complaints_by_priority: Vec<PriorityCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EngineerPerformance {
    pub user_id: i32,
    pub name: String,
    pub resolved: usize,
    pub pending: usize,
    pub total: usize,
    /// Percentage with one decimal, e.g. "66.7"
    pub resolution_rate: String,
}

pub fn dashboard_stats(
    assets: &[Asset],
    complaints: &[Complaint],
    call_logs: &[CallLog],
    pm_reports: &[PmReport],
) -> DashboardStats {
    let with_status = |status: AssetStatus| assets.iter().filter(|a| a.status == Some(status)).count();
    let resolved = complaints
        .iter()
        .filter(|c| c.comp_status == ComplaintStatus::Resolved)
        .count();

    let complaints_by_priority = Priority::ALL
        .iter()
        .rev()
        .map(|&priority| PriorityCount {
            priority,
            count: complaints.iter().filter(|c| c.priority == priority).count(),
        })
        .collect();

    DashboardStats {
        total_assets: assets.len(),
        assets_under_repair: with_status(AssetStatus::InRepair),
        active_assets: with_status(AssetStatus::Active),
        active_complaints: complaints.len() - resolved,
        call_logs: call_logs.len(),
        pm_reports: pm_reports.len(),
        critical_complaints: complaints
            .iter()
            .filter(|c| c.priority == Priority::Critical)
            .count(),
        resolution_rate: percentage(resolved, complaints.len()).round() as u32,
        complaints_by_priority,
    }
}

/// Per-engineer resolution figures. Engineers without assigned complaints are left out.
pub fn engineer_performance(engineers: &[UserShort], complaints: &[Complaint]) -> Vec<EngineerPerformance> {
    engineers
        .iter()
        .filter_map(|engineer| {
            let (resolved, total) = complaints
                .iter()
                .filter(|c| c.eng_assigned == Some(engineer.user_id))
                .fold((0, 0), |(resolved, total), c| {
                    let done = usize::from(c.comp_status == ComplaintStatus::Resolved);
                    (resolved + done, total + 1)
                });

            (total > 0).then(|| EngineerPerformance {
                user_id: engineer.user_id,
                name: engineer.username.clone(),
                resolved,
                pending: total - resolved,
                total,
                resolution_rate: round1(percentage(resolved, total)),
            })
        })
        .collect()
}

/// First `n` items, in the order given
pub fn recent<'a, T: Clone + 'a>(items: impl IntoIterator<Item = &'a T>, n: usize) -> Vec<T> {
    items.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{asset, complaint};
    use crate::models::enums::{AssetCategory, UserRole};

    fn engineer(id: i32, name: &str) -> UserShort {
        UserShort {
            user_id: id,
            username: name.to_string(),
            user_role: UserRole::Engineer,
            dept_id: Some(1),
        }
    }

    #[test]
    fn test_empty_inputs() {
        let stats = dashboard_stats(&[], &[], &[], &[]);
        assert_eq!(stats.total_assets, 0);
        assert_eq!(stats.resolution_rate, 0);
        assert!(stats.complaints_by_priority.iter().all(|p| p.count == 0));
        assert!(engineer_performance(&[], &[]).is_empty());
    }

    #[test]
    fn test_resolution_rate_rounds() {
        use ComplaintStatus::*;
        let complaints = vec![
            complaint(1, Resolved, Priority::Medium, None),
            complaint(2, Resolved, Priority::Critical, None),
            complaint(3, Open, Priority::Critical, None),
        ];
        let stats = dashboard_stats(&[], &complaints, &[], &[]);
        assert_eq!(stats.resolution_rate, 67);
        assert_eq!(stats.active_complaints, 1);
        assert_eq!(stats.critical_complaints, 2);
        assert_eq!(stats.complaints_by_priority[0].priority, Priority::Critical);
        assert_eq!(stats.complaints_by_priority[0].count, 2);
    }

    #[test]
    fn test_asset_counters() {
        let assets = vec![
            asset(1, Some(AssetCategory::Printer), Some(AssetStatus::Active)),
            asset(2, Some(AssetCategory::Printer), Some(AssetStatus::InRepair)),
            asset(3, None, None),
        ];
        let stats = dashboard_stats(&assets, &[], &[], &[]);
        assert_eq!(stats.total_assets, 3);
        assert_eq!(stats.active_assets, 1);
        assert_eq!(stats.assets_under_repair, 1);
    }

    #[test]
    fn test_engineers_without_assignments_excluded() {
        use ComplaintStatus::*;
        let engineers = vec![engineer(7, "priya"), engineer(8, "arjun"), engineer(9, "idle")];
        let complaints = vec![
            complaint(1, Resolved, Priority::High, Some(7)),
            complaint(2, Resolved, Priority::Low, Some(7)),
            complaint(3, InProgress, Priority::Low, Some(7)),
            complaint(4, Open, Priority::Low, Some(8)),
            complaint(5, Open, Priority::Low, None),
        ];

        let report = engineer_performance(&engineers, &complaints);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "priya");
        assert_eq!((report[0].resolved, report[0].pending, report[0].total), (2, 1, 3));
        assert_eq!(report[0].resolution_rate, "66.7");
        assert_eq!(report[1].resolution_rate, "0.0");
        assert!(report.iter().all(|e| e.user_id != 9));
    }

    #[test]
    fn test_engineer_rate_rounds_halves_up() {
        use ComplaintStatus::*;
        let with_one_resolved = |total: i32| {
            (1..=total)
                .map(|id| complaint(id, if id == 1 { Resolved } else { Open }, Priority::Low, Some(7)))
                .collect::<Vec<_>>()
        };
        let engineers = vec![engineer(7, "priya")];

        let report = engineer_performance(&engineers, &with_one_resolved(80));
        assert_eq!(report[0].resolution_rate, "1.3");

        let report = engineer_performance(&engineers, &with_one_resolved(400));
        assert_eq!(report[0].resolution_rate, "0.3");
    }

    #[test]
    fn test_recent_takes_head() {
        assert_eq!(recent(&[1, 2, 3, 4, 5, 6, 7], 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(recent(&[1, 2], 5), vec![1, 2]);
        assert_eq!(recent([1, 2, 3].iter().rev(), 2), vec![3, 2]);
    }
}
