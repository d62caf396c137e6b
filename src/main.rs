use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;
use sqlx::postgres::PgPoolOptions;

use projectforge::auth::{AuthMiddleware, TokenIssuer, TokenValidator};
use projectforge::routes::{self, health};
use projectforge::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!("Database migrations applied");

    let pool = web::Data::new(pool);
    let issuer = web::Data::new(TokenIssuer::new(&config.signing_key, config.token_ttl));
    let validator = Arc::new(TokenValidator::new(&config.signing_key));

    info!(
        "Starting projectforge server at {} (token ttl {}s)",
        config.server_url(),
        config.token_ttl.as_secs()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(issuer.clone())
            .app_data(routes::json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/auth").configure(routes::auth_config))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(Arc::clone(&validator)))
                    .configure(routes::api_config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
