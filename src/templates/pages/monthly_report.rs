use crate::reports::{format_currency, MonthlyReport};
use crate::templates::{desktop_layout, metrics_summary};
use maud::{html, Markup};

pub fn monthly_report_page(report: &MonthlyReport) -> Markup {
    let title = report.title();

    desktop_layout(
        &title,
        html! {
            main class="container" {
                h1 { "Monthly Report: " (title) }
                form method="get" action="/reports/monthly" {
                    input type="month" name="month" value=(report.month.to_string());
                    button type="submit" class="btn" { "Show" }
                }
                p class="summary" {
                    (report.days.len()) " Days • " (report.totals.total_sales) " Sales"
                }
                p {
                    a href={ "/reports/monthly/export?month=" (report.month.to_string()) } { "Download XLSX" }
                }

                (metrics_summary(&report.totals))

                @for day in &report.days {
                    section class=(if day.has_entries() { "day" } else { "day empty" }) {
                        header {
                            strong { (day.date.format("%A, %B %-d, %Y").to_string()) }
                            @if day.has_entries() {
                                " " span class="day-metrics" {
                                    (day.total_sales) " Sales • " (day.total_tours) " Tours • VPG: " (format_currency(day.daily_vpg))
                                }
                            } @else {
                                " " span class="muted" { "No entries" }
                            }
                        }
                        @if day.has_entries() {
                            ul {
                                @for entry in &day.entries {
                                    li {
                                        strong { (entry.client_last_name) }
                                        " Lead: " (entry.lead_number) " • Manager: " (entry.manager_name)
                                        " • " (format_currency(entry.sale_amount))
                                        " • " (entry.number_of_tours) " Tours • " (entry.sale_type.as_str())
                                        @if entry.is_cancelled { " " span class="cancelled" { "Cancelled" } }
                                        " " a href={ "/sales/" (entry.id) "/edit" } { "Edit" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
