mod model;
mod server;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::maintenance, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let mailer = startup::setup_mailer(&config, http_client);
    let jwt = startup::setup_jwt(&config);

    // Complete elapsed reservations and purge stale recovery tokens
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = maintenance::start_scheduler(scheduler_db).await {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });

    let app = router::router(config.cors_allowed_origin.as_deref())?.with_state(AppState::new(
        db,
        jwt,
        mailer,
        config.refresh_cookie.clone(),
        config.recovery.clone(),
        config.booking_timeout,
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
