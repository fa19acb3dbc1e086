use crate::models::response::ValidationResponse;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{ValidateLength, ValidateRange};

pub const MIN_YEAR: i32 = 1900;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub cast: Vec<String>,
    pub series: Vec<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub rating: i32,
    pub last_watched: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Movie {
    pub fn new(title: String, director: String, year: i32) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            title,
            director,
            year,
            cast: Vec::new(),
            series: Vec::new(),
            tags: Vec::new(),
            description: None,
            video_link: None,
            rating: 0,
            last_watched: None,
            created_at: None,
        }
    }
}

/// Fields of the "add a movie" form exactly as the browser submits them.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

impl MovieForm {
    /// Checks every field and builds the movie when all of them pass.
    /// Errors come back in form order.
    pub fn validate_movie(&self, current_year: i32) -> Result<Movie, Vec<ValidationResponse>> {
        let mut validation_errors = Vec::new();

        // Required means "something was typed": whitespace counts
        if !self.title.validate_length(Some(1), None, None) {
            validation_errors.push(ValidationResponse::new("title", "Add a valid movie title"));
        }

        if !self.director.validate_length(Some(1), None, None) {
            validation_errors.push(ValidationResponse::new(
                "director",
                "Please specify the director of the movie title!",
            ));
        }

        let range_message = format!("Year must be between {} and {}", MIN_YEAR, current_year);
        let year = if self.year.is_empty() {
            validation_errors.push(ValidationResponse::new("year", "What year?"));
            None
        } else {
            match self.year.trim().parse::<i32>() {
                Ok(year) if year.validate_range(Some(MIN_YEAR), Some(current_year), None, None) => {
                    Some(year)
                }
                Ok(_) => {
                    validation_errors.push(ValidationResponse::new("year", range_message));
                    None
                }
                // an unparseable year also fails the range check
                Err(_) => {
                    validation_errors
                        .push(ValidationResponse::new("year", "Not a valid integer value."));
                    validation_errors.push(ValidationResponse::new("year", range_message));
                    None
                }
            }
        };

        match year {
            Some(year) if validation_errors.is_empty() => Ok(Movie::new(
                self.title.clone(),
                self.director.clone(),
                year,
            )),
            _ => Err(validation_errors),
        }
    }
}

/// The edit form: the add form plus the free-text details of a movie.
/// `cast`, `series` and `tags` hold one entry per line.
#[derive(Debug, Default, Deserialize)]
pub struct ExtendedMovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_link: String,
}

fn split_lines(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split('\n').map(|line| line.trim().to_string()).collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl ExtendedMovieForm {
    /// Validates the form and writes it over `movie`, keeping its id, rating
    /// and watch history.
    pub fn apply_to(&self, movie: &mut Movie, current_year: i32) -> Result<(), Vec<ValidationResponse>> {
        let base = MovieForm {
            title: self.title.clone(),
            director: self.director.clone(),
            year: self.year.clone(),
        }
        .validate_movie(current_year)?;

        movie.title = base.title;
        movie.director = base.director;
        movie.year = base.year;
        movie.cast = split_lines(&self.cast);
        movie.series = split_lines(&self.series);
        movie.tags = split_lines(&self.tags);
        movie.description = non_empty(&self.description);
        movie.video_link = non_empty(&self.video_link);
        Ok(())
    }
}
