use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Registration page template, re-read on every generation.
    pub template_path: PathBuf,
    /// Directory generated artifacts are written to and served from.
    pub generated_dir: PathBuf,
    /// Directory of the flat-file JSON store. `None` disables the legacy routes.
    pub legacy_data_dir: Option<PathBuf>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `3001`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                               |
    /// | `TEMPLATE_PATH`        | `templates/registration-form.html` |
    /// | `GENERATED_DIR`        | `generated`                        |
    /// | `LEGACY_DATA_DIR`      | unset                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let template_path = std::env::var("TEMPLATE_PATH")
            .unwrap_or_else(|_| "templates/registration-form.html".into())
            .into();

        let generated_dir = std::env::var("GENERATED_DIR")
            .unwrap_or_else(|_| "generated".into())
            .into();

        let legacy_data_dir = std::env::var("LEGACY_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            template_path,
            generated_dir,
            legacy_data_dir,
            jwt,
        }
    }
}
