// src/tests/utils.rs
use crate::db::connection::{init_db, Database};
use crate::router::App;
use crate::service::{SalesConfig, SalesService};
use rusqlite::Connection;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Apply the production schema to an open connection.
pub fn apply_schema(conn: &Connection) {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("enable foreign keys");
    conn.execute_batch(SCHEMA).expect("apply schema");
}

/// Fresh app backed by its own temp-file database.
pub fn init_test_db() -> App {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "sales_test_{}_{}_{}.sqlite",
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    App {
        db,
        service: SalesService::new(SalesConfig::default()),
    }
}
