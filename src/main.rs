use actix_web::{web, App, HttpServer};
use chrono::Duration;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use teamforge::config::{EnvConfig, CONFIG};
use teamforge::db::postgres_service::PostgresService;
use teamforge::otp::{AuthStores, OtpStore, ResetStore};
use teamforge::routes::configure_routes;

// OTP: 5 minute life, 3 tries, 1 minute between resends.
// Reset tokens live an hour. The sweep runs every 5 minutes.
const OTP_TTL_MINUTES: i64 = 5;
const OTP_MAX_ATTEMPTS: u32 = 3;
const OTP_COOLDOWN_SECONDS: i64 = 60;
const RESET_TTL_HOURS: i64 = 1;
const SWEEP_INTERVAL_SECONDS: u64 = 300;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    CONFIG.set(config.clone()).ok();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );

    let stores = Arc::new(AuthStores::new(
        OtpStore::new(
            Duration::minutes(OTP_TTL_MINUTES),
            OTP_MAX_ATTEMPTS,
            Duration::seconds(OTP_COOLDOWN_SECONDS),
        ),
        ResetStore::new(Duration::hours(RESET_TTL_HOURS)),
    ));
    stores.spawn_sweeper(StdDuration::from_secs(SWEEP_INTERVAL_SECONDS));

    println!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(web::Data::new(Arc::clone(&stores)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
