use crate::server::{
    config::Config,
    error::AppError,
    service::{jwt::JwtVerifier, mail::MailDispatcher},
};

/// Connects to the database and runs pending migrations.
///
/// Works with both SQLite and Postgres URLs. Migrations run before the connection is
/// handed out, so the schema is always current once this returns.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false)
        .connect_timeout(config.db_connect_timeout)
        .acquire_timeout(config.db_connect_timeout);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for mail delivery.
///
/// Redirects are disabled so a misconfigured relay cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(10))
        .build()?)
}

pub fn setup_mailer(config: &Config, http_client: reqwest::Client) -> MailDispatcher {
    if config.mail_webhook_url.is_none() {
        tracing::warn!("MAIL_WEBHOOK_URL is not set, outgoing mail will be dropped");
    }

    MailDispatcher::new(
        http_client,
        config.mail_webhook_url.clone(),
        config.mail_from.clone(),
    )
}

pub fn setup_jwt(config: &Config) -> JwtVerifier {
    JwtVerifier::new(config.access_token.clone(), config.refresh_token.clone())
}
