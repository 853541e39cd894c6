// src/db/tiers.rs
use crate::db::decimal::decimal_at;
use crate::db::projects::require_project;
use crate::domain::tier::{overlapping_levels, replace_tier, CommissionTier};
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Tiers of a project in their stored order.
pub fn get_tiers(conn: &Connection, project_id: i64) -> Result<Vec<CommissionTier>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select level, min_amount, max_amount, additional_commission
            from commission_tiers
            where project_id = ?
            order by position
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare tiers failed: {e}")))?;

    let rows = stmt
        .query_map(params![project_id], |row| {
            Ok(CommissionTier {
                level: row.get(0)?,
                min_amount: decimal_at(row, 1)?,
                max_amount: decimal_at(row, 2)?,
                additional_commission: decimal_at(row, 3)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("load tiers failed: {e}")))?;

    let mut tiers = Vec::new();
    for r in rows {
        tiers.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(tiers)
}

/// Replace the whole tier list of a project in one transaction.
///
/// Ranges are not checked for overlap or gaps; the resolver takes the first
/// matching tier. Overlaps are only logged.
pub fn set_tiers(
    conn: &mut Connection,
    project_id: i64,
    tiers: &[CommissionTier],
    now: i64,
) -> Result<(), ServerError> {
    for tier in tiers {
        tier.validate()?;
    }
    for (a, b) in overlapping_levels(tiers) {
        tracing::warn!(project_id, level_a = a, level_b = b, "commission tier ranges overlap");
    }

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let updated = tx
        .execute(
            "update projects set updated_at = ? where id = ?",
            params![now, project_id],
        )
        .map_err(|e| ServerError::DbError(format!("touch project failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound(format!("project {project_id}")));
    }

    tx.execute(
        "delete from commission_tiers where project_id = ?",
        params![project_id],
    )
    .map_err(|e| ServerError::DbError(format!("clear tiers failed: {e}")))?;

    insert_tiers(&tx, project_id, tiers)?;

    tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
    tracing::info!(project_id, count = tiers.len(), "commission tiers replaced");
    Ok(())
}

/// Edit one tier by level and persist the full list back.
pub fn update_tier(
    conn: &mut Connection,
    project_id: i64,
    edited: CommissionTier,
    now: i64,
) -> Result<Vec<CommissionTier>, ServerError> {
    let current = require_project(conn, project_id)?.tiers;
    let updated = replace_tier(&current, edited)?;
    set_tiers(conn, project_id, &updated, now)?;
    Ok(updated)
}

pub(crate) fn insert_tiers(
    conn: &Connection,
    project_id: i64,
    tiers: &[CommissionTier],
) -> Result<(), ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            insert into commission_tiers
                (project_id, position, level, min_amount, max_amount, additional_commission)
            values (?, ?, ?, ?, ?, ?)
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare tier insert failed: {e}")))?;

    for (position, tier) in tiers.iter().enumerate() {
        stmt.execute(params![
            project_id,
            position as i64,
            tier.level,
            tier.min_amount.to_string(),
            tier.max_amount.to_string(),
            tier.additional_commission.to_string(),
        ])
        .map_err(|e| ServerError::DbError(format!("insert tier {} failed: {e}", tier.level)))?;
    }
    Ok(())
}
