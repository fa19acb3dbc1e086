use serde::Serialize;

/// Reply body of `POST /movies/publish`. Serializes as `{"success": "..."}` or
/// `{"error": "..."}`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PublishResponse {
    Success(String),
    Error(String),
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ValidationResponse {
    pub field: String,
    pub message: String,
}

impl ValidationResponse {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Folds field errors into the single message shown in the error banner.
    pub fn join(errors: &[ValidationResponse]) -> String {
        errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_response_uses_banner_keys() {
        let ok = serde_json::to_value(PublishResponse::Success("Movie added".into())).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": "Movie added" }));

        let err = serde_json::to_value(PublishResponse::Error("Title is required".into())).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "Title is required" }));
    }

    #[test]
    fn join_keeps_field_order() {
        let errors = vec![
            ValidationResponse::new("title", "Add a valid movie title"),
            ValidationResponse::new("year", "What year?"),
        ];
        assert_eq!(
            ValidationResponse::join(&errors),
            "Add a valid movie title, What year?"
        );
    }
}
