//! Data models for AssetDesk

pub mod asset;
pub mod bulk_import;
pub mod call_log;
pub mod complaint;
pub mod department;
pub mod enums;
pub mod pm_report;
pub mod user;

// Re-export commonly used types
pub use asset::Asset;
pub use call_log::CallLog;
pub use complaint::Complaint;
pub use department::Department;
pub use enums::{AssetCategory, AssetStatus, CallStatus, CallType, ComplaintStatus, Priority, ReportStatus, ReportType, UserRole};
pub use pm_report::PmReport;
pub use user::{ScopeQuery, User, UserShort};
