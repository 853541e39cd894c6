// src/reports/snapshot.rs

use crate::reports::monthly::MonthlyReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directory under which saved monthly reports live in the report store.
pub const SAVED_REPORTS_DIR: &str = "/reports/saved";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub total_sales: u32,
    pub total_volume: Decimal,
}

/// Frozen copy of a monthly report as written to the report store.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub name: String,
    pub created_at: i64,
    pub metadata: SnapshotMetadata,
    pub report: MonthlyReport,
}

impl ReportSnapshot {
    pub fn from_report(report: MonthlyReport, created_at: i64) -> Self {
        Self {
            name: format!("{} Report", report.title()),
            created_at,
            metadata: SnapshotMetadata {
                total_sales: report.totals.total_sales,
                total_volume: report.totals.total_volume,
            },
            report,
        }
    }

    /// Store path, unique per month and save time.
    pub fn path(&self) -> String {
        format!(
            "{SAVED_REPORTS_DIR}/{}-{}.json",
            self.report.month, self.created_at
        )
    }
}
