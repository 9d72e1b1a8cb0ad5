use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record in {origin}, row {row}, field {field}: {value:?} is not a number")]
    MalformedRecord {
        origin: String,
        row: usize,
        field: usize,
        value: String,
    },

    #[error("Invalid record in {origin}: {reason}")]
    InvalidRecord { origin: String, reason: String },

    #[error("Duplicate recipe: {0}")]
    DuplicateRecipe(String),

    #[error("Invalid classification for {recipe}: {meal} index {index} has no slot")]
    InvalidClassification {
        recipe: String,
        meal: &'static str,
        index: i64,
    },

    #[error("Recipe not found: {0}")]
    UnknownRecipe(String),

    #[error("Solver error: {0}")]
    Solver(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
