use std::sync::OnceLock;

use crate::config::{AppConfig, LogLevel};

static MIN_LEVEL: OnceLock<LogLevel> = OnceLock::new();

/// Component-tagged logging to the browser console.
pub struct Logger;

impl Logger {
    /// Set the minimum level. Only the first call has an effect.
    pub fn init(config: &AppConfig) {
        let _ = MIN_LEVEL.set(config.log_level);
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format_line(level, component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }

    fn enabled(level: LogLevel) -> bool {
        level >= *MIN_LEVEL.get().unwrap_or(&LogLevel::Info)
    }
}

fn format_line(level: LogLevel, component: &str, message: &str) -> String {
    let tag = match level {
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    };
    format!("[{}] [{}] {}", tag, component, message)
}
