use std::env;

/// Maximum length of a stored extension name.
/// Tied to the DB column and the input maxlength in the view; changing it
/// requires migrating existing rows first.
pub const EXTENSION_MAX_LENGTH: usize = 20;

/// Maximum number of custom extensions that may be registered.
pub const MAX_CUSTOM_EXTENSIONS: u64 = 200;

/// Fixed extension names seeded at startup. Adding an entry seeds a new row
/// on the next start; removing one leaves the existing row in place.
pub const FIXED_EXTENSION_NAMES: [&str; 7] = ["bat", "cmd", "com", "cpl", "exe", "scr", "js"];

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host (default: "127.0.0.1")
    pub host: String,

    /// Bind port (default: 3000)
    pub port: u16,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(), // Vite default
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(default.host),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Configuration for tests and local development
    pub fn development() -> Self {
        Self::default()
    }
}
