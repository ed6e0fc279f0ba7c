//! Runtime settings from environment variables.

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Settings {
    /// Read settings from the environment. `DATABASE_URL` is required;
    /// the rest have defaults suitable for local development.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::BadRequest("DATABASE_URL is not set".into()))?;
        let host = std::env::var("SCOREBOOK_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("SCOREBOOK_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| AppError::BadRequest("SCOREBOOK_PORT must be a port number".into()))?,
            Err(_) => 3000,
        };
        let max_connections = std::env::var("SCOREBOOK_DB_POOL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        Ok(Settings {
            database_url,
            host,
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
