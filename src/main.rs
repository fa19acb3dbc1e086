use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use movie_library::{config::AppConfig, db::schema::init_db, routes, utils::ensure_data_dir};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::other(e)
    })?;

    if let Err(e) = ensure_data_dir(&config.database_path) {
        warn!("Failed to create data directory: {}", e);
    }

    // Create the schema up front so a bad DATABASE_PATH shows at startup
    if let Err(e) = init_db(&config.database_path) {
        error!(
            "Failed to initialise database at {}: {}",
            config.database_path, e
        );
    }

    info!("Starting server on http://{}:{}...", config.host, config.port);
    info!("Clients publish movies to {}", config.publish_post_url);

    let bind_addr = (config.host.clone(), config.port);
    let app_config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(app_config.clone())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
