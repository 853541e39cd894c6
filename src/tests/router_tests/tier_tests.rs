// src/tests/router_tests/tier_tests.rs
use super::post_form;
use crate::db::tiers::get_tiers;
use crate::domain::tier::default_tiers;
use crate::router::handle;
use crate::tests::utils::init_test_db;
use rust_decimal_macros::dec;

fn current_project_id(app: &crate::router::App) -> i64 {
    app.db
        .with_conn(|conn| Ok(conn.query_row("select max(id) from projects", [], |r| r.get(0))?))
        .unwrap()
}

#[test]
fn tier_edit_replaces_one_level() {
    let app = init_test_db();
    let resp = handle(
        post_form("/tiers/1", "min_amount=150000&max_amount=243749&additional_commission=1.5"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let project = current_project_id(&app);
    let tiers = app.db.with_conn(|conn| get_tiers(conn, project)).unwrap();
    let defaults = default_tiers();
    assert_eq!(tiers.len(), defaults.len());
    assert_eq!(tiers[0].min_amount, dec!(150000));
    assert_eq!(tiers[0].additional_commission, dec!(1.5));
    assert_eq!(tiers[1..], defaults[1..]);
}

#[test]
fn unknown_level_is_not_found() {
    let app = init_test_db();
    let err = handle(
        post_form("/tiers/42", "min_amount=1&max_amount=2&additional_commission=1"),
        &app,
    )
    .err().unwrap();
    assert_eq!(err.status(), 404);
}

#[test]
fn inverted_range_is_rejected() {
    let app = init_test_db();
    let err = handle(
        post_form("/tiers/1", "min_amount=9&max_amount=1&additional_commission=1"),
        &app,
    )
    .err().unwrap();
    assert_eq!(err.status(), 400);
}

#[test]
fn new_project_becomes_current_and_reset_clears() {
    let app = init_test_db();
    let first = {
        crate::router::handle(super::get("/"), &app).unwrap();
        current_project_id(&app)
    };

    let resp = handle(post_form("/projects", "name=Spring+Push"), &app).unwrap();
    assert_eq!(resp.status(), 303);
    let second = current_project_id(&app);
    assert!(second > first);

    let name: String = app
        .db
        .with_conn(|conn| {
            Ok(conn.query_row("select name from projects where id = ?1", [second], |r| r.get(0))?)
        })
        .unwrap();
    assert_eq!(name, "Spring Push");

    let err = handle(post_form("/projects", "name=+"), &app).err().unwrap();
    assert_eq!(err.status(), 400);

    handle(post_form("/sales", "date=2024-03-05&client_last_name=Lee&sale_amount=100&number_of_tours=1"), &app).unwrap();
    handle(post_form("/reset", ""), &app).unwrap();
    let sale_count: i64 = app
        .db
        .with_conn(|conn| Ok(conn.query_row("select count(*) from sales", [], |r| r.get(0))?))
        .unwrap();
    assert_eq!(sale_count, 0);
}
