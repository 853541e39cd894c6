use crate::db::reports::SavedReportInfo;
use crate::domain::commission::tier_total_rate;
use crate::domain::project::Project;
use crate::reports::{format_currency, format_percent, format_whole_dollars, YearMonth};
use crate::service::CommissionStatus;
use crate::templates::{button, card, desktop_layout, sale_form};
use chrono::{DateTime, NaiveDate};
use maud::{html, Markup};

pub struct DashboardVm {
    pub project: Project,
    pub status: CommissionStatus,
    pub recent_reports: Vec<SavedReportInfo>,
    pub today: NaiveDate,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let month = YearMonth::of(vm.today);

    desktop_layout(
        "Dashboard",
        html! {
            main class="container" {
                h1 { (vm.project.name) }
                p { "Current volume: " strong { (format_currency(vm.status.current_volume)) } }

                (recent_reports(&vm.recent_reports))
                (commission_structure(vm))

                (card("Add New Entry", sale_form("/sales", vm.today, None)))

                (card("Reports", html! {
                    ul {
                        li { a href={ "/reports/monthly?month=" (month.to_string()) } { "Monthly report for " (month.title()) } }
                        li { a href={ "/reports/monthly/export?month=" (month.to_string()) } { "Download " (month.title()) " (XLSX)" } }
                        li { a href="/reports/daily" { "Daily performance report" } }
                    }
                    form method="post" action={ "/reports/monthly/save?month=" (month.to_string()) } {
                        (button("Save monthly snapshot"))
                    }
                }))

                (card("Projects", html! {
                    form method="post" action="/projects" {
                        input type="text" name="name" placeholder="New project name" required;
                        (button("Start new project"))
                    }
                    form method="post" action="/reset" {
                        (button("Clear all data"))
                    }
                }))
            }
        },
    )
}

fn commission_structure(vm: &DashboardVm) -> Markup {
    let current_level = vm.status.current_tier.map(|t| t.level);

    html! {
        section class="card" id="commission-structure" {
            h3 { "Commission Structure" }
            @if let Some(tier) = &vm.status.current_tier {
                p {
                    "Current Level: " strong { (tier.level) }
                    " • Total: " strong { (format_percent(tier_total_rate(tier))) }
                }
            }
            p class="base-rates" { "Under $20K: 4% • $20K - $50K: 5% • $50K+: 6%" }

            table {
                thead {
                    tr { th { "Level" } th { "Volume Range" } th { "Additional" } th { "Total" } th { "Edit" } }
                }
                tbody {
                    @for tier in &vm.project.tiers {
                        tr class=[(current_level == Some(tier.level)).then_some("current")] {
                            td { (tier.level) }
                            td { (format_whole_dollars(tier.min_amount)) " - " (format_whole_dollars(tier.max_amount)) }
                            td { "+" (format_percent(tier.additional_commission)) }
                            td { (format_percent(tier_total_rate(tier))) }
                            td {
                                form method="post" action={ "/tiers/" (tier.level) } class="tier-form" {
                                    input type="number" name="min_amount" step="1" value=(tier.min_amount.to_string());
                                    input type="number" name="max_amount" step="1" value=(tier.max_amount.to_string());
                                    input type="number" name="additional_commission" step="0.5" value=(tier.additional_commission.to_string());
                                    (button("Save"))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn recent_reports(reports: &[SavedReportInfo]) -> Markup {
    html! {
        @if !reports.is_empty() {
            section class="card" id="recent-reports" {
                h3 { "Recent Reports" }
                ul {
                    @for report in reports {
                        li {
                            a href={ "/reports/saved/view?path=" (encode_query(&report.path)) } { (report.name) }
                            " "
                            small { (saved_on(report.created_at)) }
                            @if let Some(meta) = &report.metadata {
                                " • " (meta.total_sales) " sales • " (format_currency(meta.total_volume))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn saved_on(created_at: i64) -> String {
    DateTime::from_timestamp(created_at, 0)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
