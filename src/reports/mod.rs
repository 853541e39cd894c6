pub mod daily;
pub mod format;
pub mod monthly;
pub mod snapshot;

pub use daily::{aggregate_by_day, aggregate_for_days, DailyMetric};
pub use format::{format_currency, format_percent, format_whole_dollars};
pub use monthly::{aggregate_by_month, monthly_report, MonthlyReport, MonthlyTotals, YearMonth};
pub use snapshot::{ReportSnapshot, SnapshotMetadata};
