use actix_web::{web, HttpResponse};

use crate::config::settings::DashboardSettings;
use crate::db::MetricStore;
use crate::handlers::error_response;
use crate::metrics::dashboard::{load_series, load_today, SeriesKind};
use crate::metrics::resolve_day;
use crate::models::query::{DayQuery, SeriesQuery};

/// Upper bound for `?days=`, roughly ten years.
const MAX_SERIES_DAYS: u32 = 3660;

#[tracing::instrument(
    name = "Get series",
    skip(query, store, dashboard),
    fields(
        series = %kind,
        end = ?query.end,
        days = ?query.days
    )
)]
pub async fn get_series(
    kind: SeriesKind,
    query: web::Query<SeriesQuery>,
    store: web::Data<dyn MetricStore>,
    dashboard: web::Data<DashboardSettings>,
) -> HttpResponse {
    let end = match resolve_day(query.end.as_deref()) {
        Ok(day) => day,
        Err(e) => return error_response(kind.name(), &e),
    };
    let days = query.days.unwrap_or(dashboard.series_days).min(MAX_SERIES_DAYS);

    match load_series(store.get_ref(), kind, end, days).await {
        Ok(series) => {
            tracing::info!(
                start = %series.start,
                end = %series.end,
                records = series.values.len(),
                "Series loaded"
            );
            HttpResponse::Ok().json(series)
        }
        Err(e) => error_response(kind.name(), &e),
    }
}

#[tracing::instrument(
    name = "Get today",
    skip(query, store, dashboard),
    fields(
        date = ?query.date
    )
)]
pub async fn get_today(
    query: web::Query<DayQuery>,
    store: web::Data<dyn MetricStore>,
    dashboard: web::Data<DashboardSettings>,
) -> HttpResponse {
    let date = match resolve_day(query.date.as_deref()) {
        Ok(day) => day,
        Err(e) => return error_response("today", &e),
    };

    match load_today(store.get_ref(), date, dashboard.age).await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => error_response("today", &e),
    }
}
