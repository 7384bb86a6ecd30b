//! API integration tests

use reqwest::{
    header,
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("ASSETDESK_TEST_URL").unwrap_or_else(|_| "http://localhost:5000/api".to_string())
}

fn admin_password() -> String {
    std::env::var("ASSETDESK_TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}

/// Log in as the bootstrap admin and return its user id
async fn admin_id(client: &Client) -> i64 {
    let body: Value = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": "admin", "password": admin_password(), "role": "Admin" }))
        .send()
        .await
        .expect("Failed to send login request")
        .json()
        .await
        .expect("Failed to parse login response");
    body["user"]["user_id"].as_i64().expect("No user id in response")
}

async fn create_asset(client: &Client, serial: &str) -> i64 {
    let body: Value = client
        .post(format!("{}/assets", base_url()))
        .json(&json!({
            "asset_name": "Integration test laptop",
            "category": "PC/CPU",
            "serial_number": serial,
            "status": "Active",
            "location": "Test bench",
            "dept_id": 1
        }))
        .send()
        .await
        .expect("Failed to create asset")
        .json()
        .await
        .expect("Failed to parse asset response");
    body["asset_id"].as_i64().expect("No asset id in response")
}

/// Reports directory of the server under test, when it runs on this machine
fn reports_dir() -> Option<std::path::PathBuf> {
    std::env::var("ASSETDESK_TEST_UPLOADS_DIR")
        .ok()
        .map(|dir| std::path::Path::new(&dir).join("pm-reports"))
}

fn stored_report_count() -> Option<usize> {
    let dir = reports_dir()?;
    Some(std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0))
}

fn report_form(asset_id: i64, user_id: i64, file_name: &str, mime: &str, content: Vec<u8>) -> Form {
    let file = Part::bytes(content)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("Invalid MIME type");
    Form::new()
        .text("asset_id", asset_id.to_string())
        .text("report_type", "Maintenance")
        .text("uploaded_by", user_id.to_string())
        .text("notes", "Quarterly check")
        .part("file", file)
}

async fn asset_count(client: &Client) -> usize {
    let assets: Vec<Value> = client
        .get(format!("{}/assets", base_url()))
        .send()
        .await
        .expect("Failed to list assets")
        .json()
        .await
        .expect("Failed to parse assets");
    assets.len()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_failures_are_distinguished() {
    let client = Client::new();

    let unknown = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": "nobody", "password": "x", "role": "Engineer" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let body: Value = unknown.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");

    let wrong = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": "admin", "password": "definitely-wrong", "role": "Admin" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body: Value = wrong.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect password");
}

#[tokio::test]
#[ignore]
async fn test_complaint_resolved_at_creation_takes_zero_time() {
    let client = Client::new();
    let user_id = admin_id(&client).await;
    let asset_id = create_asset(&client, "IT-LIFECYCLE-001").await;

    let created: Value = client
        .post(format!("{}/complaints", base_url()))
        .json(&json!({
            "asset_id": asset_id,
            "raised_by": user_id,
            "issue": "Keyboard keys unresponsive after spill",
            "priority": "High"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let comp_id = created["comp_id"].as_i64().expect("No complaint id");

    let complaint: Value = client
        .get(format!("{}/complaints/{}", base_url(), comp_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(complaint["comp_status"], "Open");
    assert!(complaint["total_time_taken"].is_null());

    let updated: Value = client
        .put(format!("{}/complaints/{}", base_url(), comp_id))
        .json(&json!({
            "comp_status": "Resolved",
            "actual_res_date": complaint["creation_time"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["total_time_taken"], "00:00:00");

    // Cleanup
    client.delete(format!("{}/complaints/{}", base_url(), comp_id)).send().await.unwrap();
    client.delete(format!("{}/assets/{}", base_url(), asset_id)).send().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_short_issue_rejected() {
    let client = Client::new();
    let user_id = admin_id(&client).await;

    let response = client
        .post(format!("{}/complaints", base_url()))
        .json(&json!({ "asset_id": 1, "raised_by": user_id, "issue": "broken" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_missing_complaint_is_not_found() {
    let client = Client::new();

    let update = client
        .put(format!("{}/complaints/{}", base_url(), i32::MAX))
        .json(&json!({ "priority": "Low" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = client
        .delete(format!("{}/complaints/{}", base_url(), i32::MAX))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_engineer_view_is_subset_of_admin_view() {
    let client = Client::new();

    let all: Vec<Value> = client
        .get(format!("{}/complaints?user_role=Admin", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scoped: Vec<Value> = client
        .get(format!("{}/complaints?user_role=Engineer&dept_id=1", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(scoped.len() <= all.len());
    for complaint in &scoped {
        assert!(all.iter().any(|c| c["comp_id"] == complaint["comp_id"]));
    }
}

#[tokio::test]
#[ignore]
async fn test_bulk_upload_is_all_or_nothing() {
    let client = Client::new();
    let before = asset_count(&client).await;

    let response = client
        .post(format!("{}/assets/bulk-upload", base_url()))
        .json(&json!([
            {
                "Asset": "Bulk printer", "Category": "Printer", "Serial Number": "BULK-1",
                "Status": "Active", "Department": "IT", "Location": "Floor 1"
            },
            { "Asset": "Row without serial", "Category": "Printer" }
        ]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["rows"][0]["row"], 3);
    assert_eq!(asset_count(&client).await, before);
}

#[tokio::test]
#[ignore]
async fn test_pm_report_upload_review_download_delete() {
    let client = Client::new();
    let user_id = admin_id(&client).await;
    let asset_id = create_asset(&client, "IT-PM-REPORT-001").await;
    let content = b"%PDF-1.4 quarterly maintenance".to_vec();

    let response = client
        .post(format!("{}/pm-reports", base_url()))
        .multipart(report_form(asset_id, user_id, "PM Check (Q1).pdf", "application/pdf", content.clone()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let report_id = body["report_id"].as_i64().expect("No report id");

    let report: Value = client
        .get(format!("{}/pm-reports/{}", base_url(), report_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["file_name"], "PM Check (Q1).pdf");
    assert_eq!(report["status"], "Pending");
    assert!(report["reviewed_at"].is_null());

    let download = client
        .get(format!("{}/pm-reports/download/{}", base_url(), report_id))
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = download.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment;"));
    assert_eq!(download.bytes().await.unwrap().to_vec(), content);

    let review = client
        .put(format!("{}/pm-reports/{}", base_url(), report_id))
        .json(&json!({ "status": "Reviewed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(review.status(), StatusCode::OK);

    let reviewed: Value = client
        .get(format!("{}/pm-reports/{}", base_url(), report_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reviewed["status"], "Reviewed");
    assert!(reviewed["reviewed_at"].is_string());

    let delete = client
        .delete(format!("{}/pm-reports/{}", base_url(), report_id))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::OK);

    let gone = client
        .get(format!("{}/pm-reports/download/{}", base_url(), report_id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    client.delete(format!("{}/assets/{}", base_url(), asset_id)).send().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pm_report_upload_limits() {
    let client = Client::new();
    let user_id = admin_id(&client).await;
    let asset_id = create_asset(&client, "IT-PM-REPORT-002").await;

    let oversized = vec![b'0'; 10 * 1024 * 1024 + 1];
    let response = client
        .post(format!("{}/pm-reports", base_url()))
        .multipart(report_form(asset_id, user_id, "scan.pdf", "application/pdf", oversized))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let response = client
        .post(format!("{}/pm-reports", base_url()))
        .multipart(report_form(asset_id, user_id, "setup.exe", "application/pdf", b"MZ".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    client.delete(format!("{}/assets/{}", base_url(), asset_id)).send().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pm_report_for_unknown_asset_leaves_no_file() {
    let client = Client::new();
    let user_id = admin_id(&client).await;
    let before = stored_report_count();

    let response = client
        .post(format!("{}/pm-reports", base_url()))
        .multipart(report_form(i32::MAX as i64, user_id, "orphan.pdf", "application/pdf", b"%PDF-1.4".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Only checkable when the server's uploads directory is visible from here
    if before.is_some() {
        assert_eq!(stored_report_count(), before);
    }
}

#[tokio::test]
#[ignore]
async fn test_departments_are_listed() {
    let client = Client::new();

    let departments: Vec<Value> = client
        .get(format!("{}/departments", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(departments.iter().any(|d| d["dept_name"] == "IT"));
}
