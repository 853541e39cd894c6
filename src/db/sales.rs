// src/db/sales.rs
use crate::db::decimal::decimal_at;
use crate::domain::entry::NewSale;
use crate::domain::sale::SaleRecord;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SALE_COLUMNS: &str = r#"
    id, project_id, date, client_last_name, lead_number, manager_name,
    number_of_tours, sale_amount, sale_type, commission_percentage,
    commission_amount, fdi_points, fdi_given_points, fdi_cost, sale_vpg,
    notes, is_cancelled, created_at
"#;

fn sale_from_row(row: &Row<'_>) -> rusqlite::Result<SaleRecord> {
    Ok(SaleRecord {
        id: row.get(0)?,
        project_id: row.get(1)?,
        date: row.get(2)?,
        client_last_name: row.get(3)?,
        lead_number: row.get(4)?,
        manager_name: row.get(5)?,
        number_of_tours: row.get(6)?,
        sale_amount: decimal_at(row, 7)?,
        sale_type: row.get(8)?,
        commission_percentage: decimal_at(row, 9)?,
        commission_amount: decimal_at(row, 10)?,
        fdi_points: decimal_at(row, 11)?,
        fdi_given_points: decimal_at(row, 12)?,
        fdi_cost: decimal_at(row, 13)?,
        sale_vpg: decimal_at(row, 14)?,
        notes: row.get(15)?,
        is_cancelled: row.get(16)?,
        created_at: row.get(17)?,
    })
}

/// All entries of a project, oldest date first, then in entry order.
pub fn list_sales(conn: &Connection, project_id: i64) -> Result<Vec<SaleRecord>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {SALE_COLUMNS} from sales where project_id = ? order by date, id"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![project_id], sale_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut sales = Vec::new();
    for r in rows {
        sales.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(sales)
}

pub fn get_sale(conn: &Connection, sale_id: i64) -> Result<Option<SaleRecord>, ServerError> {
    conn.query_row(
        &format!("select {SALE_COLUMNS} from sales where id = ?"),
        params![sale_id],
        sale_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}

/// Insert a priced entry and return the stored record.
pub fn save_sale(conn: &Connection, sale: NewSale) -> Result<SaleRecord, ServerError> {
    conn.execute(
        r#"
        insert into sales (
            project_id, date, client_last_name, lead_number, manager_name,
            number_of_tours, sale_amount, sale_type, commission_percentage,
            commission_amount, fdi_points, fdi_given_points, fdi_cost, sale_vpg,
            notes, is_cancelled, created_at
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            sale.project_id,
            sale.date,
            sale.client_last_name,
            sale.lead_number,
            sale.manager_name,
            sale.number_of_tours,
            sale.sale_amount.to_string(),
            sale.sale_type,
            sale.commission_percentage.to_string(),
            sale.commission_amount.to_string(),
            sale.fdi_points.to_string(),
            sale.fdi_given_points.to_string(),
            sale.fdi_cost.to_string(),
            sale.sale_vpg.to_string(),
            sale.notes,
            sale.is_cancelled,
            sale.created_at,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert sale failed: {e}")))?;

    let id = conn.last_insert_rowid();
    tracing::info!(
        sale_id = id,
        project_id = sale.project_id,
        amount = %sale.sale_amount,
        commission = %sale.commission_amount,
        "sale recorded"
    );
    Ok(sale.into_record(id))
}

/// Overwrite an existing entry with a re-priced version. `created_at` is kept.
pub fn update_sale(conn: &Connection, sale_id: i64, sale: NewSale) -> Result<SaleRecord, ServerError> {
    let updated = conn
        .execute(
            r#"
            update sales set
                date = ?, client_last_name = ?, lead_number = ?, manager_name = ?,
                number_of_tours = ?, sale_amount = ?, sale_type = ?,
                commission_percentage = ?, commission_amount = ?, fdi_points = ?,
                fdi_given_points = ?, fdi_cost = ?, sale_vpg = ?, notes = ?,
                is_cancelled = ?
            where id = ? and project_id = ?
            "#,
            params![
                sale.date,
                sale.client_last_name,
                sale.lead_number,
                sale.manager_name,
                sale.number_of_tours,
                sale.sale_amount.to_string(),
                sale.sale_type,
                sale.commission_percentage.to_string(),
                sale.commission_amount.to_string(),
                sale.fdi_points.to_string(),
                sale.fdi_given_points.to_string(),
                sale.fdi_cost.to_string(),
                sale.sale_vpg.to_string(),
                sale.notes,
                sale.is_cancelled,
                sale_id,
                sale.project_id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update sale failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound(format!("sale {sale_id}")));
    }

    tracing::info!(sale_id, project_id = sale.project_id, "sale updated");
    get_sale(conn, sale_id)?.ok_or_else(|| ServerError::NotFound(format!("sale {sale_id}")))
}
