use actix_web::HttpResponse;
use serde_json::json;

use crate::metrics::MetricsError;

pub mod backend_health_handler;
pub mod dashboard_handler;
pub mod metrics_handler;
pub mod sleep_handler;

/// Bad dates are the caller's fault, everything else is ours.
pub fn error_response(label: &str, error: &MetricsError) -> HttpResponse {
    match error {
        MetricsError::InvalidDate(_) => {
            tracing::warn!(error = %error, "Rejected {} request", label);
            HttpResponse::BadRequest().json(json!({
                "error": error.to_string()
            }))
        }
        _ => {
            tracing::error!(error = %error, "Error fetching {} data", label);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Error fetching {} data: {}", label, error)
            }))
        }
    }
}

pub fn not_found(error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": error.to_string()
    }))
}
