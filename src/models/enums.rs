//! Shared domain enums, stored as their display label in TEXT columns

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// SQLx conversion through the `Display` / `FromStr` label
macro_rules! text_column {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = sqlx::Decode::<sqlx::Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <String as sqlx::Encode<sqlx::Postgres>>::encode(self.to_string(), buf)
            }
        }
    };
}

/// Closed set of labels. Parsing is case-insensitive and accepts the listed aliases.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($name), s))
            }
        }

        text_column!($name);
    };
}

text_enum! {
    /// Role of an application user
    UserRole {
        Admin => "Admin",
        Engineer => "Engineer",
    }
}

text_enum! {
    /// Operational status of an asset
    AssetStatus {
        Active => "Active",
        InRepair => "In Repair" | "Under Repair",
    }
}

text_enum! {
    /// Support contract covering an asset
    Coverage {
        Amc => "AMC",
        Warranty => "Warranty",
    }
}

text_enum! {
    /// Complaint lifecycle state
    ComplaintStatus {
        Open => "Open",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}

text_enum! {
    /// Complaint priority, lowest first
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

text_enum! {
    CallType {
        Phone => "Phone",
        Email => "Email",
        WalkIn => "Walk-in" | "Walk In" | "WalkIn",
    }
}

text_enum! {
    CallStatus {
        Open => "Open",
        InProgress => "In Progress",
        Closed => "Closed",
    }
}

text_enum! {
    ReportType {
        Maintenance => "Maintenance",
        Inspection => "Inspection",
        Repair => "Repair",
    }
}

text_enum! {
    /// Review workflow of a PM report
    ReportStatus {
        Pending => "Pending",
        Reviewed => "Reviewed",
        Approved => "Approved",
    }
}

impl ReportStatus {
    /// Entering one of these states stamps `reviewed_at`
    pub fn marks_review(&self) -> bool {
        matches!(self, ReportStatus::Reviewed | ReportStatus::Approved)
    }
}

// ---------------------------------------------------------------------------
// AssetCategory
// ---------------------------------------------------------------------------

/// Asset category. Known categories are normalized, anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum AssetCategory {
    PcCpu,
    Printer,
    Router,
    Os,
    License,
    Storage,
    Other(String),
}

impl AssetCategory {
    pub fn as_str(&self) -> &str {
        match self {
            AssetCategory::PcCpu => "PC/CPU",
            AssetCategory::Printer => "Printer",
            AssetCategory::Router => "Router",
            AssetCategory::Os => "OS",
            AssetCategory::License => "License",
            AssetCategory::Storage => "Storage",
            AssetCategory::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Category cannot be empty".to_string());
        }
        Ok(match s.to_lowercase().as_str() {
            "pc/cpu" | "pc" | "cpu" => AssetCategory::PcCpu,
            "printer" => AssetCategory::Printer,
            "router" => AssetCategory::Router,
            "os" => AssetCategory::Os,
            "license" | "licence" => AssetCategory::License,
            "storage" => AssetCategory::Storage,
            _ => AssetCategory::Other(s.to_string()),
        })
    }
}

text_column!(AssetCategory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_status_accepts_legacy_spelling() {
        assert_eq!("Under Repair".parse::<AssetStatus>(), Ok(AssetStatus::InRepair));
        assert_eq!("in repair".parse::<AssetStatus>(), Ok(AssetStatus::InRepair));
        assert_eq!(AssetStatus::InRepair.to_string(), "In Repair");
        assert!("Broken".parse::<AssetStatus>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        let status: ComplaintStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, ComplaintStatus::InProgress);
        assert_eq!(serde_json::to_string(&CallType::WalkIn).unwrap(), "\"Walk-in\"");

        let legacy: AssetStatus = serde_json::from_str("\"Under Repair\"").unwrap();
        assert_eq!(legacy, AssetStatus::InRepair);
    }

    #[test]
    fn test_category_keeps_unknown_labels() {
        assert_eq!("printer".parse::<AssetCategory>(), Ok(AssetCategory::Printer));
        assert_eq!("PC/CPU".parse::<AssetCategory>(), Ok(AssetCategory::PcCpu));
        assert_eq!(
            "Laptop".parse::<AssetCategory>(),
            Ok(AssetCategory::Other("Laptop".to_string()))
        );
        assert!("  ".parse::<AssetCategory>().is_err());
        assert_eq!(serde_json::to_string(&AssetCategory::Os).unwrap(), "\"OS\"");
    }

    #[test]
    fn test_report_status_review_marker() {
        assert!(ReportStatus::Approved.marks_review());
        assert!(ReportStatus::Reviewed.marks_review());
        assert!(!ReportStatus::Pending.marks_review());
    }
}
