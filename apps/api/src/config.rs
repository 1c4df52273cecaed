use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with context if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expire_hours: i64,
    pub llm_api_key: String,
    /// Base URL of the headless-render collaborator.
    pub renderer_url: String,
    /// Externally reachable base URL of this service; the renderer fetches
    /// preview pages from it.
    pub public_base_url: String,
    /// Allowed CORS origins; empty means permissive (local development).
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_expire_hours: std::env::var("JWT_EXPIRE_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse::<i64>()
                .context("JWT_EXPIRE_HOURS must be a whole number of hours")?,
            llm_api_key: require_env("LLM_API_KEY")?,
            renderer_url: require_env("RENDERER_URL")?,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://unused".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expire_hours: 1,
            llm_api_key: "test-key".to_string(),
            renderer_url: "http://localhost:3001".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            cors_origins: Vec::new(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
