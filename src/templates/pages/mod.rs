pub mod daily_report;
pub mod dashboard;
pub mod monthly_report;
pub mod sale_edit;

pub use daily_report::daily_report_page;
pub use dashboard::{dashboard_page, DashboardVm};
pub use monthly_report::monthly_report_page;
pub use sale_edit::sale_edit_page;
