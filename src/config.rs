// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion service used for translation
    pub translator: TranslatorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Bearer token; only needed when translating
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request deadline in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = TranslatorConfig::default();
        let translator_config = TranslatorConfig {
            api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            temperature: parse_var("LLM_TEMPERATURE", defaults.temperature)?,
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            translator: translator_config,
            logging: logging_config,
        })
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open config file: {}", e))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        Self::from_json(&contents)
    }

    fn from_json(contents: &str) -> AppResult<Self> {
        serde_json::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Failed to create log file: {}", e))
                })?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to initialize logger: {}", e)))
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
            file_path: None,
        }
    }
}
