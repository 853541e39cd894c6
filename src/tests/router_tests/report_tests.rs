// src/tests/router_tests/report_tests.rs
use super::{body_string, get, location, post_form};
use crate::router::handle;
use crate::tests::utils::init_test_db;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn seed(app: &crate::router::App) {
    for form in [
        "date=2024-03-05&client_last_name=Smith&number_of_tours=2&sale_amount=25000",
        "date=2024-03-07&client_last_name=Brown&number_of_tours=1&sale_amount=5000",
        "date=2024-03-07&entry_type=no-sale&number_of_tours=1",
    ] {
        let resp = handle(post_form("/sales", form), app).unwrap();
        assert_eq!(resp.status(), 303);
    }
}

#[test]
fn dashboard_renders_current_project() {
    let app = init_test_db();
    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("Commission Structure"));
    assert!(body.contains("Current volume"));
}

#[test]
fn monthly_page_shows_totals() {
    let app = init_test_db();
    seed(&app);

    let mut resp = handle(get("/reports/monthly?month=2024-03"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("March 2024"));
    assert!(body.contains("$30,000.00"));
    assert!(body.contains("31 Days"));
    assert!(body.contains("NO SALE"));
}

#[test]
fn bad_month_is_rejected() {
    let app = init_test_db();
    let err = handle(get("/reports/monthly?month=2024-13"), &app).err().unwrap();
    assert_eq!(err.status(), 400);
}

#[test]
fn daily_page_lists_months() {
    let app = init_test_db();
    seed(&app);

    let mut resp = handle(get("/reports/daily"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("Daily Performance Report"));
    assert!(body.contains("March 2024"));
}

#[test]
fn export_returns_a_workbook() {
    let app = init_test_db();
    seed(&app);

    let resp = handle(get("/reports/monthly/export?month=2024-03"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let ct = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.contains("spreadsheetml"));
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.contains("attachment"));
}

#[test]
fn saved_snapshots_are_listed_and_viewable() {
    let app = init_test_db();
    seed(&app);

    let resp = handle(post_form("/reports/monthly/save?month=2024-03", ""), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/");

    let mut list = handle(get("/reports/saved"), &app).unwrap();
    let listed: serde_json::Value = serde_json::from_str(&body_string(&mut list)).unwrap();
    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "March 2024 Report");
    assert_eq!(entries[0]["metadata"]["total_sales"], 2);

    let path = entries[0]["path"].as_str().unwrap().to_string();
    let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    let mut view = handle(get(&format!("/reports/saved/view?path={encoded}")), &app).unwrap();
    assert_eq!(view.status(), 200);
    let doc: serde_json::Value = serde_json::from_str(&body_string(&mut view)).unwrap();
    let volume: Decimal = doc["metadata"]["total_volume"].as_str().unwrap().parse().unwrap();
    assert_eq!(volume, dec!(30000));

    let err = handle(get("/reports/saved/view?path=%2Fmissing"), &app).err().unwrap();
    assert_eq!(err.status(), 404);
}
