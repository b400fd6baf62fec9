use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mgl_blanket.db?mode=rwc";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "mgl12345";
pub const DEFAULT_SESSION_SECRET: &str = "mgl_export_blanket_secret_key";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    /// Argon2 PHC string. When set it replaces the plain admin password.
    pub admin_password_hash: Option<String>,
    pub session_secret: String,
    pub session_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            admin_password_hash: None,
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

impl AppConfig {
    /// Start from the fixed defaults above and let deployment environment
    /// variables override them, the same `from_env` layering the service's
    /// configuration has always used; with nothing set the shop runs on the
    /// built-in constants.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        let host = env::var("APP_HOST").unwrap_or(defaults.host);
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let admin_username = env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username);
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password);
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|h| !h.trim().is_empty());
        let session_secret = env::var("SESSION_SECRET").unwrap_or(defaults.session_secret);
        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(defaults.session_ttl_hours);

        if session_secret.is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        Ok(Self {
            database_url,
            host,
            port,
            admin_username,
            admin_password,
            admin_password_hash,
            session_secret,
            session_ttl_hours,
        })
    }
}
