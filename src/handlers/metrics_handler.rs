use actix_web::{web, HttpResponse};

use crate::db::MetricStore;
use crate::handlers::error_response;
use crate::metrics::pipeline::load_metric;
use crate::metrics::{resolve_range, MetricKind};
use crate::models::query::RangeQuery;

#[tracing::instrument(
    name = "Get metric",
    skip(query, store),
    fields(
        metric = %kind,
        start = ?query.start,
        end = ?query.end
    )
)]
pub async fn get_metric(
    kind: MetricKind,
    query: web::Query<RangeQuery>,
    store: web::Data<dyn MetricStore>,
) -> HttpResponse {
    let label = kind.label();
    let range = match resolve_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(label, &e),
    };

    match load_metric(store.get_ref(), kind, &range).await {
        Ok(payload) => {
            tracing::info!(
                start = %range.start_key(),
                end = %range.end_key(),
                records = payload.len(),
                "{} data loaded",
                label
            );
            HttpResponse::Ok().json(payload)
        }
        Err(e) => error_response(label, &e),
    }
}
