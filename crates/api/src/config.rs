/// Server configuration loaded from environment variables.
///
/// Constructed once in `main` and passed into the components that need it;
/// nothing reads the process environment after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The default `*` allows any origin, matching the open reporting
    /// endpoint this server exposes to exercise clients.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite database URL (default: `sqlite:phishtrack.db?mode=rwc`).
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `5000`                         |
    /// | `CORS_ORIGINS`         | `*`                            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `DATABASE_URL`         | `sqlite:phishtrack.db?mode=rwc`|
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:phishtrack.db?mode=rwc".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
        }
    }
}
