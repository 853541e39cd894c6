// src/db/reports.rs
//
// Key/value store for saved report snapshots. Content is kept as an opaque
// JSON document; only the metadata block is read back for listings.
use crate::errors::ServerError;
use crate::reports::snapshot::SnapshotMetadata;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedReportInfo {
    pub path: String,
    pub name: String,
    pub created_at: i64,
    pub metadata: Option<SnapshotMetadata>,
}

#[derive(Deserialize)]
struct ContentHeader {
    metadata: Option<SnapshotMetadata>,
}

/// Store (or overwrite) a document at `path`.
pub fn put_report(
    conn: &Connection,
    path: &str,
    name: &str,
    content: &Value,
    now: i64,
) -> Result<(), ServerError> {
    let body = serde_json::to_string(content).map_err(|e| {
        tracing::error!(path, error = %e, "encode report failed");
        ServerError::InternalError
    })?;

    conn.execute(
        r#"
        insert into saved_reports (path, name, created_at, content)
        values (?, ?, ?, ?)
        on conflict(path) do update set
            name = excluded.name,
            created_at = excluded.created_at,
            content = excluded.content
        "#,
        params![path, name, now, body],
    )
    .map_err(|e| ServerError::DbError(format!("store report failed: {e}")))?;

    tracing::info!(path, name, "report saved");
    Ok(())
}

pub fn get_report(conn: &Connection, path: &str) -> Result<Option<Value>, ServerError> {
    let body: Option<String> = conn
        .query_row(
            "select content from saved_reports where path = ?",
            params![path],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load report failed: {e}")))?;

    body.map(|b| {
        serde_json::from_str(&b)
            .map_err(|e| ServerError::DbError(format!("stored report {path} is not JSON: {e}")))
    })
    .transpose()
}

/// Reports under `prefix`, newest first.
pub fn list_reports(
    conn: &Connection,
    prefix: &str,
    limit: Option<usize>,
) -> Result<Vec<SavedReportInfo>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select path, name, created_at, content
            from saved_reports
            where substr(path, 1, length(?1)) = ?1
            order by created_at desc, path desc
            limit ?2
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    // sqlite treats a negative limit as "no limit"
    let limit = limit.map(|n| n as i64).unwrap_or(-1);

    let rows = stmt
        .query_map(params![prefix, limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut reports = Vec::new();
    for r in rows {
        let (path, name, created_at, content) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        let metadata = serde_json::from_str::<ContentHeader>(&content)
            .ok()
            .and_then(|h| h.metadata);
        reports.push(SavedReportInfo {
            path,
            name,
            created_at,
            metadata,
        });
    }
    Ok(reports)
}
