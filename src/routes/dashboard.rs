use actix_web::{get, web, HttpResponse};

use crate::config::settings::DashboardSettings;
use crate::db::MetricStore;
use crate::handlers::dashboard_handler::{get_series, get_today};
use crate::handlers::not_found;
use crate::metrics::dashboard::SeriesKind;
use crate::models::query::{DayQuery, SeriesQuery};

#[get("/series/{series}")]
async fn series(
    path: web::Path<String>,
    query: web::Query<SeriesQuery>,
    store: web::Data<dyn MetricStore>,
    dashboard: web::Data<DashboardSettings>,
) -> HttpResponse {
    match path.parse::<SeriesKind>() {
        Ok(kind) => get_series(kind, query, store, dashboard).await,
        Err(e) => not_found(e),
    }
}

#[get("/today")]
async fn today(
    query: web::Query<DayQuery>,
    store: web::Data<dyn MetricStore>,
    dashboard: web::Data<DashboardSettings>,
) -> HttpResponse {
    get_today(query, store, dashboard).await
}
