pub mod movie_repository;
pub mod schema;
