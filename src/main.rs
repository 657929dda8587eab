use std::net::TcpListener;
use std::sync::Arc;

use fitdash_backend::config::settings::get_config;
use fitdash_backend::db::MongoStore;
use fitdash_backend::run;
use fitdash_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "fitdash-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let store = match MongoStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to create MongoDB client: {}", e);
            std::process::exit(1);
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!(%address, "Starting dashboard backend");

    run(
        listener,
        Arc::new(store),
        config.application.allowed_origins.clone(),
        config.dashboard.clone(),
    )?
    .await
}
