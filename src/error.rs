use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RecipeGenError {
    DatabaseError(String),
    ValidationError(String),
    GenerationError(String),
    ConfigurationError(String),
}

impl fmt::Display for RecipeGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeGenError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            RecipeGenError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            RecipeGenError::GenerationError(msg) => write!(f, "Generation error: {msg}"),
            RecipeGenError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for RecipeGenError {}

pub type Result<T> = std::result::Result<T, RecipeGenError>;
