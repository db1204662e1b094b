use std::path::PathBuf;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 24 * 365;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL (e.g. sqlite://brandkit.db?mode=rwc, postgres://...)
    pub database_url: String,

    /// Server host (default: 127.0.0.1)
    pub server_host: String,

    /// Server port (default: 5000)
    pub server_port: u16,

    /// Environment: development, production, test
    pub environment: String,

    /// WordNet 3.x `dict/` directory backing the synonym lookups.
    pub wordnet_dir: Option<PathBuf>,

    /// JSON thesaurus (`{"word": [["lemma", ...], ...]}`), used when no
    /// WordNet directory is configured.
    pub thesaurus_path: Option<PathBuf>,

    /// Login and session settings.
    pub security: SecurityConfig,
}

/// Login and session settings.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Session lifetime in hours (default: 24, at most [`MAX_SESSION_EXPIRY_HOURS`])
    pub session_expiry_hours: u64,

    /// Minimum accepted password length when creating users (default: 8)
    pub min_password_length: usize,

    /// Throttle repeated login attempts per username.
    pub enable_rate_limit: bool,

    /// Login attempts allowed inside one window (default: 5)
    pub rate_limit_max_attempts: u32,

    /// Window length in seconds (default: 300)
    pub rate_limit_window_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        SecurityConfig {
            session_expiry_hours: 24,
            min_password_length: 8,
            enable_rate_limit: true,
            rate_limit_max_attempts: 5,
            rate_limit_window_secs: 300,
        }
    }
}

impl SecurityConfig {
    fn from_env() -> Self {
        let defaults = SecurityConfig::default();
        SecurityConfig {
            session_expiry_hours: clamp_session_expiry(env_parse(
                "SESSION_EXPIRY_HOURS",
                defaults.session_expiry_hours,
            )),
            min_password_length: env_parse("MIN_PASSWORD_LENGTH", defaults.min_password_length),
            enable_rate_limit: env_flag("ENABLE_RATE_LIMIT", defaults.enable_rate_limit),
            rate_limit_max_attempts: env_parse(
                "RATE_LIMIT_MAX_ATTEMPTS",
                defaults.rate_limit_max_attempts,
            ),
            rate_limit_window_secs: env_parse(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            ),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if present (ignore errors if missing)
        let _ = dotenvy::dotenv();

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://brandkit.db?mode=rwc".to_string()),
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env_parse("SERVER_PORT", 5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            wordnet_dir: std::env::var("WORDNET_DIR").ok().map(PathBuf::from),
            thesaurus_path: std::env::var("THESAURUS_PATH").ok().map(PathBuf::from),
            security: SecurityConfig::from_env(),
        })
    }

    /// Configuration for tests: in-memory SQLite, random port, no dictionary.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            environment: "test".to_string(),
            wordnet_dir: None,
            thesaurus_path: None,
            security: SecurityConfig {
                enable_rate_limit: false,
                ..SecurityConfig::default()
            },
        }
    }

    /// Check if running in development mode.
    pub fn is_dev(&self) -> bool {
        self.environment == "development"
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {key} value {raw:?}, using default");
            default
        }),
        Err(_) => default,
    }
}

fn clamp_session_expiry(hours: u64) -> u64 {
    if hours > MAX_SESSION_EXPIRY_HOURS {
        tracing::warn!("SESSION_EXPIRY_HOURS={hours} exceeds {MAX_SESSION_EXPIRY_HOURS}, clamping");
        return MAX_SESSION_EXPIRY_HOURS;
    }
    hours
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes"),
        Err(_) => default,
    }
}
