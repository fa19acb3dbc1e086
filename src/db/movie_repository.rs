use crate::{errors::AppError, models::movie::Movie};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as RusqliteResult};

const MOVIE_COLUMNS: &str = "id, title, director, year, cast_list, series, tags, description, \
     video_link, rating, last_watched, created_at";

pub struct MovieRepository {
    conn: Connection,
}

// Lists are stored as JSON arrays in TEXT columns
fn list_to_sql(values: &[String]) -> Result<String, AppError> {
    serde_json::to_string(values).map_err(|e| AppError::InternalError(e.to_string()))
}

fn list_from_row(row: &rusqlite::Row, idx: usize) -> RusqliteResult<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl MovieRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn map_row_to_movie(row: &rusqlite::Row) -> RusqliteResult<Movie> {
        let last_watched_str: Option<String> = row.get(10)?;
        let created_at_str: Option<String> = row.get(11)?;

        let last_watched = last_watched_str.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });

        // SQLite CURRENT_TIMESTAMP is UTC without an offset
        let created_at = created_at_str.and_then(|s| {
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.and_utc())
        });

        Ok(Movie {
            id: row.get(0)?,
            title: row.get(1)?,
            director: row.get(2)?,
            year: row.get(3)?,
            cast: list_from_row(row, 4)?,
            series: list_from_row(row, 5)?,
            tags: list_from_row(row, 6)?,
            description: row.get(7)?,
            video_link: row.get(8)?,
            rating: row.get(9)?,
            last_watched,
            created_at,
        })
    }

    pub fn save_movie(&self, movie: &Movie) -> Result<String, AppError> {
        self.conn
            .execute(
                "INSERT INTO movies (id, title, director, year, cast_list, series, tags,
                                     description, video_link, rating, last_watched)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    movie.id,
                    movie.title,
                    movie.director,
                    movie.year,
                    list_to_sql(&movie.cast)?,
                    list_to_sql(&movie.series)?,
                    list_to_sql(&movie.tags)?,
                    movie.description,
                    movie.video_link,
                    movie.rating,
                    movie.last_watched.map(|dt| dt.to_rfc3339()),
                ],
            )
            .map(|_| movie.id.clone())
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Writes the editable fields of an existing movie.
    pub fn update_movie(&self, movie: &Movie) -> Result<(), AppError> {
        let changed = self
            .conn
            .execute(
                "UPDATE movies SET title = ?2, director = ?3, year = ?4, cast_list = ?5,
                        series = ?6, tags = ?7, description = ?8, video_link = ?9
                 WHERE id = ?1",
                params![
                    movie.id,
                    movie.title,
                    movie.director,
                    movie.year,
                    list_to_sql(&movie.cast)?,
                    list_to_sql(&movie.series)?,
                    list_to_sql(&movie.tags)?,
                    movie.description,
                    movie.video_link,
                ],
            )
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Self::expect_one(changed, &movie.id)
    }

    pub fn set_rating(&self, id: &str, rating: i32) -> Result<(), AppError> {
        let changed = self
            .conn
            .execute(
                "UPDATE movies SET rating = ?2 WHERE id = ?1",
                params![id, rating],
            )
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Self::expect_one(changed, id)
    }

    pub fn set_last_watched(&self, id: &str, watched_at: DateTime<Utc>) -> Result<(), AppError> {
        let changed = self
            .conn
            .execute(
                "UPDATE movies SET last_watched = ?2 WHERE id = ?1",
                params![id, watched_at.to_rfc3339()],
            )
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Self::expect_one(changed, id)
    }

    fn expect_one(changed: usize, id: &str) -> Result<(), AppError> {
        if changed == 0 {
            Err(AppError::NotFound(format!("Movie with ID {} not found", id)))
        } else {
            Ok(())
        }
    }

    pub fn get_movie_by_id(&self, id: &str) -> Result<Movie, AppError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLUMNS),
                params![id],
                Self::map_row_to_movie,
            )
            .optional()
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Movie with ID {} not found", id)))
    }

    pub fn get_all_movies(&self) -> Result<Vec<Movie>, AppError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM movies ORDER BY created_at DESC, rowid DESC",
                MOVIE_COLUMNS
            ))
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let movie_iter = stmt
            .query_map([], Self::map_row_to_movie)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let movies: Result<Vec<Movie>, _> = movie_iter
            .map(|res| res.map_err(|e| AppError::DatabaseError(e.to_string())))
            .collect();

        movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::init_db;
    use crate::utils::scratch_db_path;

    fn repository() -> (MovieRepository, String) {
        let path = scratch_db_path();
        let conn = init_db(&path).unwrap();
        (MovieRepository::new(conn), path)
    }

    #[test]
    fn saved_movie_can_be_read_back() {
        let (repo, path) = repository();
        let movie = Movie::new("Alien".into(), "Ridley Scott".into(), 1979);

        let id = repo.save_movie(&movie).unwrap();
        let stored = repo.get_movie_by_id(&id).unwrap();

        assert_eq!(stored.id, movie.id);
        assert_eq!(stored.title, "Alien");
        assert_eq!(stored.director, "Ridley Scott");
        assert_eq!(stored.year, 1979);
        assert!(stored.created_at.is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_movie_is_not_found() {
        let (repo, path) = repository();
        let err = repo.get_movie_by_id("does-not-exist").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn duplicate_id_is_a_database_error() {
        let (repo, path) = repository();
        let movie = Movie::new("Alien".into(), "Ridley Scott".into(), 1979);
        repo.save_movie(&movie).unwrap();

        let err = repo.save_movie(&movie).unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn list_returns_newest_first() {
        let (repo, path) = repository();
        let first = Movie::new("Alien".into(), "Ridley Scott".into(), 1979);
        let second = Movie::new("Aliens".into(), "James Cameron".into(), 1986);
        repo.save_movie(&first).unwrap();
        repo.save_movie(&second).unwrap();

        let titles: Vec<String> = repo
            .get_all_movies()
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Aliens", "Alien"]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn update_rewrites_details_and_keeps_rating() {
        let (repo, path) = repository();
        let mut movie = Movie::new("Alien".into(), "Ridley Scott".into(), 1979);
        repo.save_movie(&movie).unwrap();
        repo.set_rating(&movie.id, 5).unwrap();

        movie.cast = vec!["Sigourney Weaver".into(), "Tom Skerritt".into()];
        movie.tags = vec!["sci-fi".into()];
        movie.description = Some("In space no one can hear you scream.".into());
        movie.video_link = Some("https://example.com/alien".into());
        repo.update_movie(&movie).unwrap();

        let stored = repo.get_movie_by_id(&movie.id).unwrap();
        assert_eq!(stored.cast, movie.cast);
        assert_eq!(stored.tags, vec!["sci-fi"]);
        assert!(stored.series.is_empty());
        assert_eq!(stored.description, movie.description);
        assert_eq!(stored.video_link, movie.video_link);
        assert_eq!(stored.rating, 5);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn last_watched_round_trips() {
        let (repo, path) = repository();
        let movie = Movie::new("Alien".into(), "Ridley Scott".into(), 1979);
        repo.save_movie(&movie).unwrap();
        let watched_at = DateTime::parse_from_rfc3339("2026-10-19T20:15:00Z")
            .unwrap()
            .with_timezone(&Utc);

        repo.set_last_watched(&movie.id, watched_at).unwrap();

        let stored = repo.get_movie_by_id(&movie.id).unwrap();
        assert_eq!(stored.last_watched, Some(watched_at));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn updates_on_missing_movie_are_not_found() {
        let (repo, path) = repository();
        let ghost = Movie::new("Ghost".into(), "Nobody".into(), 2000);

        assert!(matches!(repo.update_movie(&ghost), Err(AppError::NotFound(_))));
        assert!(matches!(repo.set_rating(&ghost.id, 3), Err(AppError::NotFound(_))));
        assert!(matches!(
            repo.set_last_watched(&ghost.id, Utc::now()),
            Err(AppError::NotFound(_))
        ));
        let _ = std::fs::remove_file(path);
    }
}
