// src/tests/router_tests/sale_tests.rs
use super::{body_string, get, location, post_form};
use crate::db::sales::list_sales;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::init_test_db;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn posting_a_sale_stores_it_and_redirects() {
    let app = init_test_db();

    let resp = handle(
        post_form(
            "/sales",
            "date=2024-03-05&client_last_name=Smith&lead_number=L-9&manager_name=Lisa&number_of_tours=2&sale_amount=25000&sale_type=DEED",
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/");

    let sales = app
        .db
        .with_conn(|conn| {
            let project: i64 = conn.query_row("select max(id) from projects", [], |r| r.get(0))?;
            list_sales(conn, project)
        })
        .unwrap();
    assert_eq!(sales.len(), 1);
    let s = &sales[0];
    assert_eq!(s.client_last_name, "Smith");
    assert_eq!(s.commission_percentage, dec!(5));
    assert_eq!(s.commission_amount, dec!(1250));
    assert_eq!(s.sale_vpg, dec!(12500));
}

#[test]
fn no_sale_entries_are_normalized() {
    let app = init_test_db();

    handle(
        post_form(
            "/sales",
            "date=2024-03-05&entry_type=no-sale&client_last_name=ignored&number_of_tours=1",
        ),
        &app,
    )
    .unwrap();

    let sales = app
        .db
        .with_conn(|conn| {
            let project: i64 = conn.query_row("select max(id) from projects", [], |r| r.get(0))?;
            list_sales(conn, project)
        })
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert!(sales[0].is_no_sale());
    assert_eq!(sales[0].sale_amount, Decimal::ZERO);
    assert_eq!(sales[0].commission_amount, Decimal::ZERO);
}

#[test]
fn invalid_sale_is_a_validation_error() {
    let app = init_test_db();

    let err = handle(
        post_form("/sales", "date=2024-03-05&client_last_name=Smith&sale_amount=abc"),
        &app,
    )
    .err().unwrap();
    assert!(matches!(err, ServerError::Validation(_)));
    assert_eq!(err.status(), 400);
}

#[test]
fn half_cent_commission_is_stored_rounded_up() {
    let app = init_test_db();
    handle(
        post_form(
            "/sales",
            "date=2024-03-05&client_last_name=Smith&number_of_tours=1&sale_amount=20484.30",
        ),
        &app,
    )
    .unwrap();

    let sales = app
        .db
        .with_conn(|conn| {
            let project: i64 = conn.query_row("select max(id) from projects", [], |r| r.get(0))?;
            list_sales(conn, project)
        })
        .unwrap();
    assert_eq!(sales[0].sale_amount, dec!(20484.30));
    assert_eq!(sales[0].commission_amount, dec!(1024.22));
}

#[test]
fn absurd_tours_and_dates_are_rejected() {
    let app = init_test_db();
    for body in [
        "date=2024-03-05&entry_type=no-sale&number_of_tours=3000000000",
        "date=20244-03-05&client_last_name=Smith&sale_amount=100",
        "date=1899-03-05&client_last_name=Smith&sale_amount=100",
    ] {
        let err = handle(post_form("/sales", body), &app).err().unwrap();
        assert!(matches!(err, ServerError::Validation(_)), "{body}");
    }

    let stored = app
        .db
        .with_conn(|conn| Ok(conn.query_row("select count(*) from sales", [], |r| r.get::<_, i64>(0))?))
        .unwrap();
    assert_eq!(stored, 0);
}

#[test]
fn edit_page_and_update_round_trip() {
    let app = init_test_db();
    handle(
        post_form(
            "/sales",
            "date=2024-03-05&client_last_name=Smith&number_of_tours=1&sale_amount=10000",
        ),
        &app,
    )
    .unwrap();

    let id: i64 = app
        .db
        .with_conn(|conn| Ok(conn.query_row("select max(id) from sales", [], |r| r.get(0))?))
        .unwrap();

    let mut page = handle(get(&format!("/sales/{id}/edit")), &app).unwrap();
    assert_eq!(page.status(), 200);
    assert!(body_string(&mut page).contains("Smith"));

    let resp = handle(
        post_form(
            &format!("/sales/{id}"),
            "date=2024-03-06&client_last_name=Jones&number_of_tours=2&sale_amount=60000",
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let updated = app
        .db
        .with_conn(|conn| crate::db::sales::get_sale(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(updated.client_last_name, "Jones");
    assert_eq!(updated.commission_percentage, dec!(6));
    assert_eq!(updated.commission_amount, dec!(3600));
}

#[test]
fn unknown_sale_is_not_found() {
    let app = init_test_db();
    let err = handle(get("/sales/999/edit"), &app).err().unwrap();
    assert!(matches!(err, ServerError::NotFound(_)));

    let err = handle(
        post_form("/sales/999", "date=2024-03-05&client_last_name=Smith&sale_amount=1"),
        &app,
    )
    .err().unwrap();
    assert!(matches!(err, ServerError::NotFound(_)));
}

#[test]
fn unknown_route_is_not_found() {
    let app = init_test_db();
    let err = handle(get("/nope"), &app).err().unwrap();
    assert_eq!(err.status(), 404);
}
