/// Build-time settings for the frontend.
///
/// Values come from environment variables at compile time (the bundle has no
/// process environment at runtime):
/// - `CLUB_API_BASE_URL`: backend origin, default `http://localhost:8080`
/// - `CLUB_LOG_LEVEL`: `debug`, `info`, `warn` or `error`, default `info`
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LogLevel,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("CLUB_API_BASE_URL"), option_env!("CLUB_LOG_LEVEL"))
    }

    fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            log_level: log_level.and_then(LogLevel::parse).unwrap_or(LogLevel::Info),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
