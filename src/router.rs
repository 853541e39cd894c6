use crate::db::reports as report_store;
use crate::db::sales as sale_store;
use crate::db::Database;
use crate::errors::ServerError;
use crate::forms::{month_param, parse_fields, parse_sale_entry, parse_tier, Fields};
use crate::reports::YearMonth;
use crate::responses::{html_response, json_response, redirect_response, ResultResp};
use crate::service::SalesService;
use crate::spreadsheets::export_monthly_report_xlsx;
use crate::templates::pages::{
    daily_report_page, dashboard_page, monthly_report_page, sale_edit_page, DashboardVm,
};
use astra::Request;
use chrono::{Local, NaiveDate, Utc};
use std::io::Read;

/// Everything a request handler needs.
pub struct App {
    pub db: Database,
    pub service: SalesService,
}

fn now_unix() -> i64 {
    Utc::now().timestamp()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => dashboard(app),
        ("GET", "/reports/daily") => daily_report(app),
        ("GET", "/reports/monthly") => monthly_report(app, &query),
        ("GET", "/reports/monthly/export") => export_monthly(app, &query),
        ("POST", "/reports/monthly/save") => save_monthly(app, &query),
        ("GET", "/reports/saved") => list_saved_reports(app),
        ("GET", "/reports/saved/view") => view_saved_report(app, &query),
        ("POST", "/sales") => {
            let form = read_form(&mut req)?;
            record_sale(app, &form)
        }
        ("POST", "/projects") => {
            let form = read_form(&mut req)?;
            let name = form.get("name").map(String::as_str).unwrap_or("");
            app.db
                .with_conn(|conn| app.service.create_project(conn, name, now_unix()))?;
            redirect_response("/")
        }
        ("POST", "/reset") => {
            app.db
                .with_conn(|conn| app.service.clear_all_data(conn, today(), now_unix()))?;
            redirect_response("/")
        }
        ("GET", p) if p.starts_with("/sales/") && p.ends_with("/edit") => {
            let id = path_id(p.trim_start_matches("/sales/").trim_end_matches("/edit"))?;
            edit_sale_page(app, id)
        }
        ("POST", p) if p.starts_with("/sales/") => {
            let id = path_id(p.trim_start_matches("/sales/"))?;
            let form = read_form(&mut req)?;
            let entry = parse_sale_entry(&form)?;
            app.db
                .with_conn(|conn| app.service.edit_sale(conn, id, &entry))?;
            redirect_response("/")
        }
        ("POST", p) if p.starts_with("/tiers/") => {
            let level = p
                .trim_start_matches("/tiers/")
                .parse::<u32>()
                .map_err(|_| ServerError::NotFound(format!("commission level '{p}'")))?;
            let form = read_form(&mut req)?;
            let tier = parse_tier(level, &form)?;
            app.db.with_conn(|conn| {
                let project = app.service.current_project(conn, today(), now_unix())?;
                app.service.edit_tier(conn, project.id, tier, now_unix())
            })?;
            redirect_response("/")
        }
        _ => Err(ServerError::NotFound(path.clone())),
    }
}

fn dashboard(app: &App) -> ResultResp {
    let vm = app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        let status = app.service.commission_status(conn, &project)?;
        let recent_reports = app.service.recent_reports(conn)?;
        Ok(DashboardVm {
            project,
            status,
            recent_reports,
            today: today(),
        })
    })?;
    html_response(dashboard_page(&vm))
}

fn daily_report(app: &App) -> ResultResp {
    let view = app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        app.service.daily_report(conn, project.id)
    })?;
    html_response(daily_report_page(&view))
}

fn monthly_report(app: &App, query: &Fields) -> ResultResp {
    let month = month_param(query, YearMonth::of(today()))?;
    let report = app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        app.service.monthly_report(conn, project.id, month)
    })?;
    html_response(monthly_report_page(&report))
}

fn export_monthly(app: &App, query: &Fields) -> ResultResp {
    let month = month_param(query, YearMonth::of(today()))?;
    let report = app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        app.service.monthly_report(conn, project.id, month)
    })?;
    export_monthly_report_xlsx(&report)
}

fn save_monthly(app: &App, query: &Fields) -> ResultResp {
    let month = month_param(query, YearMonth::of(today()))?;
    app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        app.service
            .save_monthly_snapshot(conn, project.id, month, now_unix())
    })?;
    redirect_response("/")
}

fn list_saved_reports(app: &App) -> ResultResp {
    let reports = app.db.with_conn(|conn| {
        report_store::list_reports(conn, crate::reports::snapshot::SAVED_REPORTS_DIR, None)
    })?;
    json_response(&reports)
}

fn view_saved_report(app: &App, query: &Fields) -> ResultResp {
    let path = query
        .get("path")
        .ok_or_else(|| ServerError::Validation("path is required".into()))?;
    let doc = app
        .db
        .with_conn(|conn| report_store::get_report(conn, path))?
        .ok_or_else(|| ServerError::NotFound(format!("report {path}")))?;
    json_response(&doc)
}

fn record_sale(app: &App, form: &Fields) -> ResultResp {
    let entry = parse_sale_entry(form)?;
    app.db.with_conn(|conn| {
        let project = app.service.current_project(conn, today(), now_unix())?;
        app.service.record_sale(conn, project.id, &entry, now_unix())
    })?;
    redirect_response("/")
}

fn edit_sale_page(app: &App, id: i64) -> ResultResp {
    let sale = app
        .db
        .with_conn(|conn| sale_store::get_sale(conn, id))?
        .ok_or_else(|| ServerError::NotFound(format!("sale {id}")))?;
    html_response(sale_edit_page(&sale, today()))
}

fn path_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .map_err(|_| ServerError::NotFound(format!("sale '{raw}'")))
}

fn parse_query(req: &Request) -> Fields {
    req.uri().query().map(parse_fields).unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<Fields, ServerError> {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::Validation(format!("unreadable form body: {e}")))?;
    Ok(parse_fields(&body))
}
