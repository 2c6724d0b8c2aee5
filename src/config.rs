// src/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Everything the server reads from the environment, gathered once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Credential for the generative-language provider. Absent means the
    /// live provider path is never attempted.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Key expected in the `x-admin-key` header for /admin routes.
    pub admin_key: Option<String>,
    /// External symptom-analysis service. Unset means the canned analysis
    /// is always used.
    pub symptom_service_url: Option<String>,
    /// When set, sessions and preferences are persisted to this JSON file
    /// instead of the in-memory store.
    pub store_path: Option<PathBuf>,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-pro".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            admin_key: None,
            symptom_service_url: None,
            store_path: None,
            session_ttl: Duration::from_secs(1800),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: non_empty("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            admin_key: non_empty("ADMIN_KEY"),
            symptom_service_url: non_empty("SYMPTOM_SERVICE_URL"),
            store_path: non_empty("STORE_PATH").map(PathBuf::from),
            session_ttl: non_empty("SESSION_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
        }
    }
}

// An empty value behaves the same as an unset variable.
fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
