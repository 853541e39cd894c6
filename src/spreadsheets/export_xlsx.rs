use crate::domain::money::to_f64;
use crate::errors::ServerError;
use crate::reports::MonthlyReport;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 6] = ["Date", "Sales", "Volume", "Commission", "Tours", "VPG"];

pub fn export_monthly_report_xlsx(report: &MonthlyReport) -> ResultResp {
    let buffer = monthly_report_workbook(report)?;
    xlsx_response(buffer, &format!("monthly_report_{}.xlsx", report.month))
}

/// One row per calendar day followed by a totals row.
pub fn monthly_report_workbook(report: &MonthlyReport) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(report.month.to_string())
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {e}")))?;

    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, day) in report.days.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, day.date.format("%m/%d/%Y").to_string())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write date: {}", e)))?;

        worksheet
            .write_number(r, 1, day.total_sales as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write sales: {}", e)))?;

        worksheet
            .write_number_with_format(r, 2, to_f64(day.total_volume), &money)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write volume: {}", e)))?;

        worksheet
            .write_number_with_format(r, 3, to_f64(day.total_commission), &money)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write commission: {}", e)))?;

        worksheet
            .write_number(r, 4, day.total_tours as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write tours: {}", e)))?;

        worksheet
            .write_number_with_format(r, 5, to_f64(day.daily_vpg), &money)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write VPG: {}", e)))?;
    }

    let totals = &report.totals;
    let r = (report.days.len() + 1) as u32;

    worksheet
        .write_string_with_format(r, 0, "Total", &bold)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write totals label: {}", e)))?;
    worksheet
        .write_number(r, 1, totals.total_sales as f64)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write total sales: {}", e)))?;
    worksheet
        .write_number_with_format(r, 2, to_f64(totals.total_volume), &money)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write total volume: {}", e)))?;
    worksheet
        .write_number_with_format(r, 3, to_f64(totals.total_commission), &money)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write total commission: {}", e)))?;
    worksheet
        .write_number(r, 4, totals.total_tours as f64)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write total tours: {}", e)))?;
    worksheet
        .write_number_with_format(r, 5, to_f64(totals.vpg), &money)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write total VPG: {}", e)))?;

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}
