use crate::reports::{format_currency, MonthlyTotals};
use crate::service::DailyReportView;
use crate::templates::{desktop_layout, metrics_summary};
use maud::{html, Markup};

pub fn daily_report_page(view: &DailyReportView) -> Markup {
    desktop_layout(
        "Daily Performance Report",
        html! {
            main class="container" {
                h1 { "Daily Performance Report" }

                @if view.days.is_empty() {
                    p { "No entries recorded yet." }
                } @else {
                    table class="daily-report" {
                        thead {
                            tr { th { "Date" } th { "Sales" } th { "Volume" } th { "Commission" } th { "Tours" } th { "Daily VPG" } }
                        }
                        tbody {
                            @for day in &view.days {
                                tr class=[day.is_first_of_month.then_some("month-start")] {
                                    td {
                                        (day.date.format("%m/%d/%Y").to_string())
                                        @if day.is_first_of_month { " " span class="badge" { "Start of Month" } }
                                    }
                                    td { (day.total_sales) }
                                    td { (format_currency(day.total_volume)) }
                                    td { (format_currency(day.total_commission)) }
                                    td { (day.total_tours) }
                                    td { (format_currency(day.daily_vpg)) }
                                }
                            }
                        }
                    }

                    h2 { "Monthly Totals" }
                    @for (month, totals) in &view.months {
                        section class="card" {
                            h3 { (month.title()) }
                            (metrics_summary(totals))
                        }
                    }
                    h2 { "All Time" }
                    (metrics_summary(&all_time(view)))
                }
            }
        },
    )
}

fn all_time(view: &DailyReportView) -> MonthlyTotals {
    MonthlyTotals::from_days(&view.days)
}
