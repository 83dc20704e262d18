use crate::error::{RecipeGenError, Result};

#[derive(Debug, Clone)]
pub struct RecipeGenConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub environment: String,
}

impl Default for RecipeGenConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/recipegen_development".to_string(),
            max_connections: 10,
            environment: "development".to_string(),
        }
    }
}

impl RecipeGenConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(max_connections) = std::env::var("RECIPEGEN_MAX_CONNECTIONS") {
            config.max_connections = max_connections.parse().map_err(|e| {
                RecipeGenError::ConfigurationError(format!("Invalid max_connections: {e}"))
            })?;
        }

        if let Ok(environment) = std::env::var("RECIPEGEN_ENV") {
            config.environment = environment;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecipeGenConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.environment, "development");
    }
}
