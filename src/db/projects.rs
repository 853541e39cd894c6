// src/db/projects.rs
use crate::db::tiers::{get_tiers, insert_tiers};
use crate::domain::project::{default_project_name, Project};
use crate::domain::tier::CommissionTier;
use crate::errors::ServerError;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

/// Look up a project with its tier list.
pub fn get_project(conn: &Connection, project_id: i64) -> Result<Option<Project>, ServerError> {
    let row = conn
        .query_row(
            "select id, name, created_at, updated_at from projects where id = ?",
            params![project_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load project failed: {e}")))?;

    let Some((id, name, created_at, updated_at)) = row else {
        return Ok(None);
    };

    Ok(Some(Project {
        id,
        name,
        created_at,
        updated_at,
        tiers: get_tiers(conn, id)?,
    }))
}

pub fn require_project(conn: &Connection, project_id: i64) -> Result<Project, ServerError> {
    get_project(conn, project_id)?
        .ok_or_else(|| ServerError::NotFound(format!("project {project_id}")))
}

/// Create a project seeded with its own copy of `tiers`.
pub fn create_project(
    conn: &mut Connection,
    name: &str,
    tiers: &[CommissionTier],
    now: i64,
) -> Result<i64, ServerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::Validation("project name is required".into()));
    }

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let id = insert_project(&tx, name, tiers, now)?;
    tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;

    tracing::info!(project_id = id, name, "project created");
    Ok(id)
}

/// The most recently created project, created on first access.
pub fn get_current_project(
    conn: &mut Connection,
    default_tiers: &[CommissionTier],
    today: NaiveDate,
    now: i64,
) -> Result<Project, ServerError> {
    let latest: Option<i64> = conn
        .query_row("select max(id) from projects", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("find current project failed: {e}")))?;

    let id = match latest {
        Some(id) => id,
        None => create_project(conn, &default_project_name(today), default_tiers, now)?,
    };
    require_project(conn, id)
}

/// Delete every sale, tier and project, then start over with one default project.
pub fn clear_all_data(
    conn: &mut Connection,
    default_tiers: &[CommissionTier],
    today: NaiveDate,
    now: i64,
) -> Result<i64, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    for table in ["sales", "commission_tiers", "projects"] {
        tx.execute(&format!("delete from {table}"), [])
            .map_err(|e| ServerError::DbError(format!("clear {table} failed: {e}")))?;
    }
    let id = insert_project(&tx, &default_project_name(today), default_tiers, now)?;

    tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
    tracing::info!(project_id = id, "all data cleared");
    Ok(id)
}

fn insert_project(
    conn: &Connection,
    name: &str,
    tiers: &[CommissionTier],
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into projects (name, created_at, updated_at) values (?, ?, ?)",
        params![name, now, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert project failed: {e}")))?;
    let id = conn.last_insert_rowid();
    insert_tiers(conn, id, tiers)?;
    Ok(id)
}
