//! PM report storage and review service

use std::path::{Path, PathBuf};

use chrono::Utc;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use validator::Validate;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
    models::{
        enums::ReportType,
        pm_report::{NewPmReport, PmReport, UpdatePmReport},
        user::ScopeQuery,
    },
    repository::Repository,
    services::notifications::{ChangeAction, ChangeNotifier, Entity},
};

/// Accepted uploads: the extension and the declared MIME type must both match an entry
const ALLOWED_TYPES: &[(&str, &[&str])] = &[
    ("pdf", &["application/pdf"]),
    ("jpg", &["image/jpeg", "image/jpg"]),
    ("jpeg", &["image/jpeg", "image/jpg"]),
    ("png", &["image/png"]),
    ("doc", &["application/msword"]),
    ("docx", &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"]),
    ("xls", &["application/vnd.ms-excel"]),
    ("xlsx", &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"]),
];

const REPORTS_SUBDIR: &str = "pm-reports";

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("file name pattern is valid"));

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Reject anything outside the allow-list
pub fn check_file_type(file_name: &str, content_type: &str) -> AppResult<()> {
    let content_type = content_type.trim().to_ascii_lowercase();
    let allowed = extension(file_name).is_some_and(|ext| {
        ALLOWED_TYPES
            .iter()
            .any(|(e, mimes)| *e == ext && mimes.contains(&content_type.as_str()))
    });

    if allowed {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Only PDF, JPG, PNG, DOC, and Excel files are allowed".to_string(),
        ))
    }
}

/// MIME type served back on download
pub fn content_type_for(file_name: &str) -> &'static str {
    extension(file_name)
        .and_then(|ext| ALLOWED_TYPES.iter().find(|(e, _)| *e == ext))
        .map(|(_, mimes)| mimes[0])
        .unwrap_or("application/octet-stream")
}

/// Keep the last path component and replace anything but `[A-Za-z0-9._-]`
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<epoch-millis>-<nonce>-<sanitized name>`
pub fn stored_file_name(original: &str, epoch_millis: i64, nonce: u32) -> String {
    format!("{}-{}-{}", epoch_millis, nonce, sanitize_file_name(original))
}

/// File being received, bounded by the configured size ceiling
#[derive(Debug)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    bytes: Vec<u8>,
    limit: usize,
}

impl PendingUpload {
    /// Append a received chunk, failing as soon as the ceiling is crossed
    pub fn push(&mut self, chunk: &[u8]) -> AppResult<()> {
        if self.bytes.len() + chunk.len() > self.limit {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MB limit",
                self.limit / (1024 * 1024)
            )));
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parsed multipart upload
#[derive(Debug)]
pub struct ReportUpload {
    pub file: PendingUpload,
    pub asset_id: i32,
    pub report_type: ReportType,
    pub uploaded_by: i32,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct PmReportsService {
    repository: Repository,
    notifier: ChangeNotifier,
    reports_dir: PathBuf,
    max_file_size: usize,
}

impl PmReportsService {
    pub fn new(repository: Repository, notifier: ChangeNotifier, uploads: &UploadsConfig) -> Self {
        Self {
            repository,
            notifier,
            reports_dir: Path::new(&uploads.dir).join(REPORTS_SUBDIR),
            max_file_size: uploads.max_file_size,
        }
    }

    /// Check name and type of an incoming file before any of it is read
    pub fn begin_upload(&self, file_name: &str, content_type: &str) -> AppResult<PendingUpload> {
        check_file_type(file_name, content_type)?;
        Ok(PendingUpload {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: Vec::new(),
            limit: self.max_file_size,
        })
    }

    pub async fn list(&self, scope: &ScopeQuery) -> AppResult<Vec<PmReport>> {
        self.repository.pm_reports.list(scope.department_filter()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<PmReport> {
        self.repository.pm_reports.get_by_id(id).await
    }

    /// Store the file, then record it. The file is removed again if the insert fails.
    pub async fn upload(&self, upload: ReportUpload) -> AppResult<i32> {
        if upload.file.is_empty() {
            return Err(AppError::Validation("No file uploaded".to_string()));
        }

        tokio::fs::create_dir_all(&self.reports_dir).await?;
        let nonce = rand::thread_rng().gen_range(0..1_000_000_000);
        let stored = stored_file_name(&upload.file.file_name, Utc::now().timestamp_millis(), nonce);
        let path = self.reports_dir.join(stored);
        tokio::fs::write(&path, &upload.file.bytes).await?;

        let report = NewPmReport {
            asset_id: upload.asset_id,
            report_type: upload.report_type,
            file_name: upload.file.file_name.clone(),
            file_path: path.to_string_lossy().into_owned(),
            file_size: upload.file.len() as i64,
            uploaded_by: upload.uploaded_by,
            notes: upload.notes,
        };

        let id = match self.repository.pm_reports.create(&report).await {
            Ok(id) => id,
            Err(e) => {
                remove_file_quietly(&report.file_path).await;
                return Err(e);
            }
        };

        tracing::info!(report_id = id, size = report.file_size, path = %report.file_path, "PM report uploaded");
        self.notifier.publish(Entity::PmReport, ChangeAction::Created, Some(id));
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: &UpdatePmReport) -> AppResult<()> {
        data.validate()?;
        self.repository.pm_reports.update(id, data).await?;
        self.notifier.publish(Entity::PmReport, ChangeAction::Updated, Some(id));
        Ok(())
    }

    /// Delete the row, then make a best-effort attempt at removing the file
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let file_path = self.repository.pm_reports.delete(id).await?;
        remove_file_quietly(&file_path).await;
        self.notifier.publish(Entity::PmReport, ChangeAction::Deleted, Some(id));
        Ok(())
    }

    /// Report metadata and file content
    pub async fn download(&self, id: i32) -> AppResult<(PmReport, Vec<u8>)> {
        let report = self.repository.pm_reports.get_by_id(id).await?;
        let content = tokio::fs::read(&report.file_path).await.map_err(stored_file_error)?;
        Ok((report, content))
    }
}

/// A stored file that has gone missing is a 404, any other read failure an I/O error
fn stored_file_error(e: std::io::Error) -> AppError {
    match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound("File not found on server".to_string()),
        _ => AppError::Io(e),
    }
}

async fn remove_file_quietly(path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path, error = %e, "Could not remove report file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(limit: usize) -> PendingUpload {
        PendingUpload {
            file_name: "report.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Vec::new(),
            limit,
        }
    }

    #[test]
    fn test_file_type_policy() {
        assert!(check_file_type("PM-Jan.PDF", "application/pdf").is_ok());
        assert!(check_file_type("photo.jpeg", "image/jpg").is_ok());
        assert!(check_file_type(
            "inventory.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        )
        .is_ok());

        // extension and MIME type must agree
        assert!(check_file_type("report.pdf", "image/png").is_err());
        assert!(check_file_type("setup.exe", "application/pdf").is_err());
        assert!(check_file_type("no_extension", "application/pdf").is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("PM Report (March).pdf"), "PM_Report_March_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\scan.png"), "scan.png");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn test_stored_file_name() {
        assert_eq!(
            stored_file_name("floor 2.pdf", 1_717_000_000_000, 42),
            "1717000000000-42-floor_2.pdf"
        );
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_stored_file_is_not_found() {
        let path = std::env::temp_dir().join("assetdesk-missing-report.pdf");
        let err = tokio::fs::read(&path).await.map_err(stored_file_error).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "File not found on server"));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(stored_file_error(denied), AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_remove_file_quietly() {
        let path = std::env::temp_dir().join(format!("assetdesk-{}-scan.pdf", std::process::id()));
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();
        let path = path.to_string_lossy().into_owned();

        remove_file_quietly(&path).await;
        assert!(!std::path::Path::new(&path).exists());

        // already gone: logged, not an error
        remove_file_quietly(&path).await;
    }

    #[test]
    fn test_pending_upload_limit() {
        let mut upload = pending(8);
        upload.push(b"12345").unwrap();
        assert!(matches!(upload.push(b"6789"), Err(AppError::PayloadTooLarge(_))));
        assert_eq!(upload.len(), 5);
        upload.push(b"678").unwrap();
        assert_eq!(upload.len(), 8);
    }
}
