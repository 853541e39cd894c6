pub mod export_xlsx;

pub use export_xlsx::export_monthly_report_xlsx;
