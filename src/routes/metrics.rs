use actix_web::{get, web, HttpResponse};

use crate::db::MetricStore;
use crate::handlers::metrics_handler::get_metric;
use crate::handlers::not_found;
use crate::metrics::MetricKind;
use crate::models::query::RangeQuery;

/// `/api/br`, `/api/hr`, `/api/steps_hourly`, ...
#[get("/{metric}")]
async fn metric(
    path: web::Path<String>,
    query: web::Query<RangeQuery>,
    store: web::Data<dyn MetricStore>,
) -> HttpResponse {
    match path.parse::<MetricKind>() {
        Ok(kind) => get_metric(kind, query, store).await,
        Err(e) => not_found(e),
    }
}
