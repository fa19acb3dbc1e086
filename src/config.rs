use crate::errors::AppError;

pub const DEFAULT_PUBLISH_POST_URL: &str = "http://127.0.0.1:8080/movies/publish";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub publish_post_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            database_path: String::from("./data/movies.db"),
            publish_post_url: String::from(DEFAULT_PUBLISH_POST_URL),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for anything unset. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::ConfigError(format!("PORT must be a valid number ({}): {}", raw, e))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            publish_post_url: lookup("PUBLISH_POST_URL").unwrap_or(defaults.publish_post_url),
        })
    }
}
