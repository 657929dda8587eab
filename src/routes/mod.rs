use actix_web::web;

pub mod backend_health;
pub mod dashboard;
pub mod metrics;
pub mod sleep;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Named routes first, `/{metric}` would swallow them otherwise
    cfg.service(
        web::scope("/api")
            .service(dashboard::series)
            .service(dashboard::today)
            .service(sleep::sleep_stages)
            .service(sleep::sleep_night)
            .service(metrics::metric)
    );
}
