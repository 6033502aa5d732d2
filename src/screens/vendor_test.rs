use super::*;
use crate::net::test_support::{MockTransport, signed_in};
use reqwest::Method;
use serde_json::json;

fn info() -> VendorCompanyInfo {
    VendorCompanyInfo {
        name: "Harbor Fuel".into(),
        phone: "+94 11 222".into(),
        email: Some("ops@harborfuel.lk".into()),
        services: vec!["Bunkering".into()],
        ..VendorCompanyInfo::default()
    }
}

fn pic() -> VendorPicDraft {
    VendorPicDraft { first_name: "Ravi".into(), last_name: "Perera".into(), ..VendorPicDraft::default() }
}

fn temp_doc(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4").unwrap();
    path
}

// =============================================================================
// VendorScreen
// =============================================================================

#[tokio::test]
async fn vendor_list_filters_by_search_and_status() {
    let mock = MockTransport::new();
    mock.ok(
        Method::GET,
        "/vendor",
        json!([
            { "vendor_id": 1, "name": "Harbor Fuel", "email": "ops@harborfuel.lk", "status": "active" },
            { "vendor_id": 2, "name": "Launch Co", "phone": "+94 77 900", "status": "inactive" },
            { "vendor_id": 3, "name": "Agency Plus" }
        ]),
    );
    mock.ok(Method::GET, "/service", json!([]));
    let mut screen = VendorScreen::new(signed_in(&mock));
    screen.load().await.unwrap();

    assert_eq!(screen.filtered("", None).len(), 3);
    assert_eq!(screen.filtered("harborfuel", None).len(), 1);
    assert_eq!(screen.filtered("", Some("active")).len(), 2);
    assert_eq!(screen.filtered("900", Some("inactive")).len(), 1);
}

#[tokio::test]
async fn vendor_without_documents_stays_listed() {
    let mock = MockTransport::new();
    mock.ok(
        Method::GET,
        "/vendor",
        json!([
            { "vendor_id": 1, "name": "Harbor Fuel", "documents": null },
            { "vendor_id": 2, "id": 2, "name": "Launch Co" }
        ]),
    );
    mock.ok(Method::GET, "/service", json!([{ "service_id": "s1", "id": "s1", "service_name": "Bunkering" }]));
    let mut screen = VendorScreen::new(signed_in(&mock));
    screen.load().await.unwrap();

    let names: Vec<&str> = screen.vendors.items().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Harbor Fuel", "Launch Co"]);
    assert_eq!(screen.services.items().len(), 1);
}

#[tokio::test]
async fn vendor_delete_removes_row() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/vendor", json!([{ "vendor_id": 1, "name": "Harbor Fuel" }]));
    mock.ok(Method::GET, "/service", json!([]));
    mock.ok(Method::DELETE, "/vendor/1", json!({ "success": true }));
    let mut screen = VendorScreen::new(signed_in(&mock));
    screen.load().await.unwrap();

    assert_eq!(screen.delete("1").await, Ok(true));
    assert!(screen.vendors.items().is_empty());
}

// =============================================================================
// VendorWizard draft persistence
// =============================================================================

#[test]
fn every_change_writes_the_draft_through() {
    let mock = MockTransport::new();
    let api = signed_in(&mock);
    let mut wizard = VendorWizard::new(api.clone());
    wizard.open();
    wizard.set_info(info());
    wizard.add_pic(pic());

    let mut reopened = VendorWizard::new(api);
    assert!(reopened.open());
    assert_eq!(reopened.draft().info.name, "Harbor Fuel");
    assert_eq!(reopened.draft().pics, vec![pic()]);
}

#[test]
fn close_clears_the_draft() {
    let mock = MockTransport::new();
    let api = signed_in(&mock);
    let mut wizard = VendorWizard::new(api.clone());
    wizard.set_info(info());
    wizard.close();

    let mut reopened = VendorWizard::new(api);
    assert!(!reopened.open());
    assert_eq!(reopened.draft().pics.len(), 1);
}

#[test]
fn last_pic_row_cannot_be_removed() {
    let mock = MockTransport::new();
    let mut wizard = VendorWizard::new(signed_in(&mock));
    wizard.open();

    assert!(!wizard.remove_pic(0));
    wizard.add_pic(pic());
    wizard.add_pic(pic());
    assert!(wizard.remove_pic(1));
    assert_eq!(wizard.draft().pics.len(), 1);
}

// =============================================================================
// VendorWizard submit
// =============================================================================

#[tokio::test]
async fn submit_uploads_then_posts_once() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockTransport::new();
    mock.ok(Method::POST, "/upload", json!({ "url": "https://files/reg.pdf" }));
    mock.ok(Method::POST, "/vendor", json!({ "success": true, "data": { "vendor_id": 9 } }));
    let api = signed_in(&mock);
    let mut wizard = VendorWizard::new(api.clone());
    wizard.open();
    wizard.set_info(info());
    wizard.add_pic(pic());
    wizard.add_document(temp_doc(&dir, "reg.pdf"), Some("Registration".into()));

    assert_eq!(wizard.submit().await, Ok(true));

    let requests = mock.requests();
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/upload", "/vendor"]);
    let body = requests[1].json_body().unwrap();
    assert_eq!(body["name"], "Harbor Fuel");
    assert_eq!(body["status"], "active");
    assert_eq!(body["documents"], json!([{ "name": "Registration", "url": "https://files/reg.pdf" }]));
    assert_eq!(body["pics"][0]["first_name"], "Ravi");
    assert!(api.session().load_draft::<VendorDraft>(VENDOR_DRAFT_KEY).unwrap().is_none());
}

#[tokio::test]
async fn upload_failure_keeps_draft_and_skips_vendor_post() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockTransport::new();
    mock.ok(Method::POST, "/upload", json!({ "url": "https://files/a.pdf" }));
    mock.respond(Method::POST, "/upload", 413, json!({ "message": "File too large" }));
    let api = signed_in(&mock);
    let mut wizard = VendorWizard::new(api.clone());
    wizard.open();
    wizard.set_info(info());
    wizard.add_pic(pic());
    wizard.add_document(temp_doc(&dir, "a.pdf"), None);
    wizard.add_document(temp_doc(&dir, "b.pdf"), None);

    assert_eq!(wizard.submit().await, Ok(false));

    assert!(mock.requests().iter().all(|r| r.path != "/vendor"));
    assert_eq!(wizard.toasts.last().map(|t| t.message.as_str()), Some("File too large"));
    let saved = api.session().load_draft::<VendorDraft>(VENDOR_DRAFT_KEY).unwrap().unwrap();
    assert_eq!(saved.documents[0].source, DocumentSource::Uploaded { url: "https://files/a.pdf".into() });
    assert!(matches!(saved.documents[1].source, DocumentSource::Local { .. }));
}

#[tokio::test]
async fn submit_requires_a_pic() {
    let mock = MockTransport::new();
    let mut wizard = VendorWizard::new(signed_in(&mock));
    wizard.open();
    wizard.set_info(info());

    assert_eq!(wizard.submit().await, Ok(false));
    assert!(mock.requests().is_empty());
    assert_eq!(wizard.toasts.last().map(|t| t.message.as_str()), Some("Add at least one PIC"));
}

#[test]
fn mime_from_extension() {
    assert_eq!(mime_for(Path::new("x.PDF")), "application/pdf");
    assert_eq!(mime_for(Path::new("scan.jpeg")), "image/jpeg");
    assert_eq!(mime_for(Path::new("notes")), "application/octet-stream");
}
