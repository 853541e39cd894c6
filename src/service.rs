// src/service.rs
use crate::db::{projects, reports as report_store, sales as sale_store, tiers as tier_store};
use crate::domain::entry::{cumulative_volume, price_entry};
use crate::domain::project::Project;
use crate::domain::sale::{SaleEntry, SaleRecord};
use crate::domain::tier::{default_tiers, find_tier, CommissionTier};
use crate::errors::ServerError;
use crate::reports::snapshot::SAVED_REPORTS_DIR;
use crate::reports::{
    aggregate_by_day, aggregate_by_month, monthly_report, DailyMetric, MonthlyReport,
    MonthlyTotals, ReportSnapshot, YearMonth,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::db::reports::SavedReportInfo;

#[derive(Debug, Clone)]
pub struct SalesConfig {
    /// Schedule copied into every new project.
    pub default_tiers: Vec<CommissionTier>,
    /// How many saved reports the dashboard lists.
    pub recent_reports: usize,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            default_tiers: default_tiers(),
            recent_reports: 4,
        }
    }
}

/// Where the project stands on the commission schedule right now.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionStatus {
    pub current_volume: Decimal,
    pub current_tier: Option<CommissionTier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyReportView {
    pub days: Vec<DailyMetric>,
    pub months: BTreeMap<YearMonth, MonthlyTotals>,
}

pub struct SalesService {
    cfg: SalesConfig,
}

impl SalesService {
    pub fn new(cfg: SalesConfig) -> Self {
        Self { cfg }
    }

    pub fn current_project(
        &self,
        conn: &mut Connection,
        today: NaiveDate,
        now: i64,
    ) -> Result<Project, ServerError> {
        projects::get_current_project(conn, &self.cfg.default_tiers, today, now)
    }

    pub fn create_project(
        &self,
        conn: &mut Connection,
        name: &str,
        now: i64,
    ) -> Result<i64, ServerError> {
        projects::create_project(conn, name, &self.cfg.default_tiers, now)
    }

    pub fn clear_all_data(
        &self,
        conn: &mut Connection,
        today: NaiveDate,
        now: i64,
    ) -> Result<i64, ServerError> {
        projects::clear_all_data(conn, &self.cfg.default_tiers, today, now)
    }

    /// Validate, price against the project's current volume and tiers, and store.
    #[tracing::instrument(skip(self, conn, entry), fields(date = %entry.date))]
    pub fn record_sale(
        &self,
        conn: &mut Connection,
        project_id: i64,
        entry: &SaleEntry,
        now: i64,
    ) -> Result<SaleRecord, ServerError> {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let project = projects::require_project(&tx, project_id)?;
        let existing = sale_store::list_sales(&tx, project_id)?;
        let volume_before = cumulative_volume(&existing, None);

        let priced = price_entry(entry, project_id, volume_before, &project.tiers, now)?;
        let saved = sale_store::save_sale(&tx, priced)?;

        tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(saved)
    }

    /// Re-price one entry. Other entries keep the commission they were given.
    #[tracing::instrument(skip(self, conn, entry))]
    pub fn edit_sale(
        &self,
        conn: &mut Connection,
        sale_id: i64,
        entry: &SaleEntry,
    ) -> Result<SaleRecord, ServerError> {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let original = sale_store::get_sale(&tx, sale_id)?
            .ok_or_else(|| ServerError::NotFound(format!("sale {sale_id}")))?;
        let project = projects::require_project(&tx, original.project_id)?;
        let existing = sale_store::list_sales(&tx, project.id)?;
        let volume_before = cumulative_volume(&existing, Some(sale_id));

        let priced = price_entry(
            entry,
            project.id,
            volume_before,
            &project.tiers,
            original.created_at,
        )?;
        let saved = sale_store::update_sale(&tx, sale_id, priced)?;

        tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(saved)
    }

    pub fn edit_tier(
        &self,
        conn: &mut Connection,
        project_id: i64,
        tier: CommissionTier,
        now: i64,
    ) -> Result<Vec<CommissionTier>, ServerError> {
        tier_store::update_tier(conn, project_id, tier, now)
    }

    pub fn commission_status(
        &self,
        conn: &Connection,
        project: &Project,
    ) -> Result<CommissionStatus, ServerError> {
        let sales = sale_store::list_sales(conn, project.id)?;
        let current_volume = cumulative_volume(&sales, None);
        Ok(CommissionStatus {
            current_volume,
            current_tier: find_tier(&project.tiers, current_volume).copied(),
        })
    }

    pub fn daily_report(
        &self,
        conn: &Connection,
        project_id: i64,
    ) -> Result<DailyReportView, ServerError> {
        let sales = sale_store::list_sales(conn, project_id)?;
        let days = aggregate_by_day(&sales);
        let months = aggregate_by_month(&days);
        Ok(DailyReportView { days, months })
    }

    pub fn monthly_report(
        &self,
        conn: &Connection,
        project_id: i64,
        month: YearMonth,
    ) -> Result<MonthlyReport, ServerError> {
        let sales = sale_store::list_sales(conn, project_id)?;
        Ok(monthly_report(&sales, month))
    }

    /// Freeze the month's report into the report store; returns its path.
    pub fn save_monthly_snapshot(
        &self,
        conn: &Connection,
        project_id: i64,
        month: YearMonth,
        now: i64,
    ) -> Result<String, ServerError> {
        let report = self.monthly_report(conn, project_id, month)?;
        let snapshot = ReportSnapshot::from_report(report, now);
        let path = snapshot.path();
        let content = serde_json::to_value(&snapshot).map_err(|e| {
            tracing::error!(error = %e, "encode snapshot failed");
            ServerError::InternalError
        })?;
        report_store::put_report(conn, &path, &snapshot.name, &content, now)?;
        Ok(path)
    }

    pub fn recent_reports(&self, conn: &Connection) -> Result<Vec<SavedReportInfo>, ServerError> {
        report_store::list_reports(conn, SAVED_REPORTS_DIR, Some(self.cfg.recent_reports))
    }
}
