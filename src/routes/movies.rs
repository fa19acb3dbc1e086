use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use validator::ValidateRange;

use crate::config::AppConfig;
use crate::db::movie_repository::MovieRepository;
use crate::db::schema::init_db;
use crate::errors::AppError;
use crate::models::movie::{current_year, ExtendedMovieForm, MovieForm};
use crate::models::response::{PublishResponse, ValidationResponse};

pub const PUBLISH_SUCCESS_MESSAGE: &str = "Movie added successfully.";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Movie updated successfully.";
pub const MAX_RATING: i32 = 5;

#[derive(Deserialize)]
pub struct RatingQuery {
    pub rating: i32,
}

// Validation failures are a normal reply: the client shows them in its error banner.
#[post("/movies/publish")]
pub async fn publish_movie(
    config: web::Data<AppConfig>,
    form: web::Form<MovieForm>,
) -> Result<HttpResponse, AppError> {
    let movie = match form.validate_movie(current_year()) {
        Ok(movie) => movie,
        Err(errors) => {
            let message = ValidationResponse::join(&errors);
            info!("Rejected movie submission: {}", message);
            return Ok(HttpResponse::Ok().json(PublishResponse::Error(message)));
        }
    };

    let database_path = config.database_path.clone();
    let title = movie.title.clone();
    let movie_id = web::block(move || {
        let conn = init_db(&database_path)?;
        MovieRepository::new(conn).save_movie(&movie)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))?
    .map_err(|e| {
        error!("Failed to store movie '{}': {}", title, e);
        e
    })?;

    info!("Movie '{}' stored with ID {}", title, movie_id);
    Ok(HttpResponse::Ok().json(PublishResponse::Success(
        PUBLISH_SUCCESS_MESSAGE.to_string(),
    )))
}

#[get("/api/movies")]
pub async fn list_movies(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let database_path = config.database_path.clone();
    let movies = web::block(move || {
        let conn = init_db(&database_path)?;
        MovieRepository::new(conn).get_all_movies()
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(movies))
}

#[get("/api/movies/{id}")]
pub async fn movie_detail(
    config: web::Data<AppConfig>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let database_path = config.database_path.clone();
    let movie_id = id.into_inner();
    let movie = web::block(move || {
        let conn = init_db(&database_path)?;
        MovieRepository::new(conn).get_movie_by_id(&movie_id)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(movie))
}

// Same reply shape as publishing, so the edit form can reuse the publish handler
#[post("/api/movies/{id}")]
pub async fn edit_movie(
    config: web::Data<AppConfig>,
    id: web::Path<String>,
    form: web::Form<ExtendedMovieForm>,
) -> Result<HttpResponse, AppError> {
    let database_path = config.database_path.clone();
    let movie_id = id.into_inner();
    let form = form.into_inner();
    let outcome = web::block(move || {
        let repository = MovieRepository::new(init_db(&database_path)?);
        let mut movie = repository.get_movie_by_id(&movie_id)?;
        match form.apply_to(&mut movie, current_year()) {
            Ok(()) => repository.update_movie(&movie).map(|_| Ok(movie.id)),
            Err(errors) => Ok(Err(errors)),
        }
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))??;

    match outcome {
        Ok(movie_id) => {
            info!("Movie {} updated", movie_id);
            Ok(HttpResponse::Ok().json(PublishResponse::Success(
                UPDATE_SUCCESS_MESSAGE.to_string(),
            )))
        }
        Err(errors) => {
            let message = ValidationResponse::join(&errors);
            info!("Rejected movie edit: {}", message);
            Ok(HttpResponse::Ok().json(PublishResponse::Error(message)))
        }
    }
}

#[post("/api/movies/{id}/rate")]
pub async fn rate_movie(
    config: web::Data<AppConfig>,
    id: web::Path<String>,
    query: web::Query<RatingQuery>,
) -> Result<HttpResponse, AppError> {
    let rating = query.rating;
    if !rating.validate_range(Some(0), Some(MAX_RATING), None, None) {
        return Err(AppError::ValidationError(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    let database_path = config.database_path.clone();
    let movie_id = id.into_inner();
    let movie = web::block(move || {
        let repository = MovieRepository::new(init_db(&database_path)?);
        repository.set_rating(&movie_id, rating)?;
        repository.get_movie_by_id(&movie_id)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(movie))
}

#[post("/api/movies/{id}/watch")]
pub async fn watch_today(
    config: web::Data<AppConfig>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let database_path = config.database_path.clone();
    let movie_id = id.into_inner();
    let movie = web::block(move || {
        let repository = MovieRepository::new(init_db(&database_path)?);
        repository.set_last_watched(&movie_id, Utc::now())?;
        repository.get_movie_by_id(&movie_id)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(movie))
}
