use actix_web::{get, HttpResponse};

use crate::handlers::backend_health_handler::backend_health_check;

/// Liveness probe; does not touch the store.
#[get("/backend_health")]
async fn backend_health() -> HttpResponse {
    backend_health_check().await
}
