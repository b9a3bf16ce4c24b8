use anyhow::Context;

/// Runtime configuration, loaded once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL prepended to the resource path when building Location headers.
    pub public_url: String,
    pub cors_allow_origin: String,
    /// Maximum number of tags a single todo may reference.
    pub max_todo_tags: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:todo.db".to_string());
        let public_url =
            std::env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let max_todo_tags = std::env::var("MAX_TODO_TAGS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("MAX_TODO_TAGS must be a non-negative integer")?;

        Ok(Config {
            host,
            port,
            database_url,
            public_url,
            cors_allow_origin,
            max_todo_tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Pin the variables this test asserts on; the surrounding process
        // environment must not leak in.
        for var in ["HOST", "PORT", "PUBLIC_URL", "MAX_TODO_TAGS"] {
            std::env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_todo_tags, 5);
        assert!(config.public_url.starts_with("http"));
    }
}
