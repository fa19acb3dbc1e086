use actix_web::web;

pub mod movies;

/// Registers every route of the app. Shared by the server binary and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(movies::publish_movie)
        .service(movies::list_movies)
        .service(movies::movie_detail)
        .service(movies::edit_movie)
        .service(movies::rate_movie)
        .service(movies::watch_today);
}
