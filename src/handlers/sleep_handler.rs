use actix_web::{web, HttpResponse};

use crate::db::MetricStore;
use crate::handlers::error_response;
use crate::metrics::dashboard::{load_sleep_night, load_sleep_stages};
use crate::metrics::{resolve_day, resolve_range};
use crate::models::query::{DayQuery, RangeQuery};

#[tracing::instrument(
    name = "Get sleep stages",
    skip(query, store),
    fields(
        start = ?query.start,
        end = ?query.end
    )
)]
pub async fn get_sleep_stages(query: web::Query<RangeQuery>, store: web::Data<dyn MetricStore>) -> HttpResponse {
    let range = match resolve_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response("sleep stages", &e),
    };

    match load_sleep_stages(store.get_ref(), &range).await {
        Ok(stages) => {
            tracing::info!(segments = stages.stages.len(), "Sleep stages loaded");
            HttpResponse::Ok().json(stages)
        }
        Err(e) => error_response("sleep stages", &e),
    }
}

#[tracing::instrument(
    name = "Get sleep night",
    skip(query, store),
    fields(
        date = ?query.date
    )
)]
pub async fn get_sleep_night(query: web::Query<DayQuery>, store: web::Data<dyn MetricStore>) -> HttpResponse {
    let date = match resolve_day(query.date.as_deref()) {
        Ok(day) => day,
        Err(e) => return error_response("sleep night", &e),
    };

    match load_sleep_night(store.get_ref(), date).await {
        Ok(night) => {
            if night.window.is_none() {
                tracing::info!(date = %night.date, "No sleep session recorded");
            }
            HttpResponse::Ok().json(night)
        }
        Err(e) => error_response("sleep night", &e),
    }
}
