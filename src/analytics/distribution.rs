use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::asset::Asset;

/// Colors assigned to chart slices, in order
pub const CHART_PALETTE: [&str; 7] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#14B8A6",
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

fn count_by(keys: impl Iterator<Item = String>) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Asset count per category in first-seen order. Missing categories count as "Other".
pub fn category_distribution(assets: &[Asset]) -> Vec<CategoryShare> {
    let counts = count_by(assets.iter().map(|a| {
        a.category
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "Other".to_string())
    }));

    counts
        .into_iter()
        .enumerate()
        .map(|(i, (category, count))| CategoryShare {
            category,
            count,
            color: CHART_PALETTE[i % CHART_PALETTE.len()].to_string(),
        })
        .collect()
}

/// Status counts of the assets in `category`. Missing statuses count as "Unknown".
pub fn status_breakdown(assets: &[Asset], category: &str) -> Vec<StatusCount> {
    let category = category.trim();
    let counts = count_by(
        assets
            .iter()
            .filter(|a| {
                a.category
                    .as_ref()
                    .is_some_and(|c| c.as_str().eq_ignore_ascii_case(category))
            })
            .map(|a| a.status.map(|s| s.to_string()).unwrap_or_else(|| "Unknown".to_string())),
    );

    counts
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::asset;
    use crate::models::enums::{AssetCategory, AssetStatus};

    #[test]
    fn test_category_counts_sum_to_total() {
        let categories = [
            Some(AssetCategory::Printer),
            Some(AssetCategory::PcCpu),
            None,
            Some(AssetCategory::Printer),
            Some(AssetCategory::Router),
            Some(AssetCategory::Os),
            Some(AssetCategory::License),
            Some(AssetCategory::Storage),
            Some(AssetCategory::Other("Scanner".to_string())),
        ];
        let assets: Vec<Asset> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| asset(i as i32, c.clone(), Some(AssetStatus::Active)))
            .collect();

        let shares = category_distribution(&assets);
        assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), assets.len());
        assert_eq!(shares[0].category, "Printer");
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[2].category, "Other");
        assert_eq!(shares[0].color, CHART_PALETTE[0]);
        // eighth slice wraps back to the first color
        assert_eq!(shares[7].category, "Scanner");
        assert_eq!(shares[7].color, CHART_PALETTE[0]);
    }

    #[test]
    fn test_empty_distribution() {
        assert!(category_distribution(&[]).is_empty());
        assert!(status_breakdown(&[], "Printer").is_empty());
    }

    #[test]
    fn test_status_breakdown_for_category() {
        let assets = vec![
            asset(1, Some(AssetCategory::Printer), Some(AssetStatus::InRepair)),
            asset(2, Some(AssetCategory::Printer), Some(AssetStatus::Active)),
            asset(3, Some(AssetCategory::Printer), None),
            asset(4, Some(AssetCategory::Printer), Some(AssetStatus::InRepair)),
            asset(5, Some(AssetCategory::Router), Some(AssetStatus::Active)),
        ];

        let breakdown = status_breakdown(&assets, "printer");
        assert_eq!(
            breakdown,
            vec![
                StatusCount { status: "In Repair".to_string(), count: 2 },
                StatusCount { status: "Active".to_string(), count: 1 },
                StatusCount { status: "Unknown".to_string(), count: 1 },
            ]
        );
    }
}
