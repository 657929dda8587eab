use actix_web::{get, web, HttpResponse};

use crate::db::MetricStore;
use crate::handlers::sleep_handler::{get_sleep_night, get_sleep_stages};
use crate::models::query::{DayQuery, RangeQuery};

#[get("/sleep_stages")]
async fn sleep_stages(query: web::Query<RangeQuery>, store: web::Data<dyn MetricStore>) -> HttpResponse {
    get_sleep_stages(query, store).await
}

#[get("/sleep_night")]
async fn sleep_night(query: web::Query<DayQuery>, store: web::Data<dyn MetricStore>) -> HttpResponse {
    get_sleep_night(query, store).await
}
