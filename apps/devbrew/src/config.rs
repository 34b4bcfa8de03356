use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "devbrew-data";
const DEFAULT_ASSIST_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ASSIST_MODEL: &str = "gemini-3-flash-preview";

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub assist_base_url: String,
    pub assist_model: String,
    pub assist_api_key: Option<String>,
}

impl AppConfig {
    /// Environment-driven configuration. Everything has a working default
    /// except the assist API key, which stays `None` so the collaborators
    /// run in fallback mode.
    pub fn from_env() -> Self {
        Self {
            data_dir: env_nonempty("DEVBREW_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            assist_base_url: env_nonempty("DEVBREW_ASSIST_URL")
                .unwrap_or_else(|| DEFAULT_ASSIST_BASE_URL.to_string()),
            assist_model: env_nonempty("DEVBREW_ASSIST_MODEL")
                .unwrap_or_else(|| DEFAULT_ASSIST_MODEL.to_string()),
            assist_api_key: env_nonempty("GEMINI_API_KEY"),
        }
    }
}
