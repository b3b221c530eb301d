use mb_chat::ChatConfig;
use mb_core::Calendar;
use mb_serve::Environment;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = ".mon-bondhu/mon-bondhu.db";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    /// Offset that "today" is taken at for date-only fields.
    pub calendar: Calendar,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

/// On-disk shape. Every field is optional; absent ones keep the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    db_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    environment: Option<String>,
    utc_offset: Option<String>,
    #[serde(default)]
    openai: FileOpenAi,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOpenAi {
    api_key: Option<String>,
    api_url: Option<String>,
    model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let chat = ChatConfig::default();
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            calendar: Calendar::default(),
            openai: OpenAiConfig {
                api_key: chat.api_key,
                api_url: chat.api_url,
                model: chat.model,
            },
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(file, &env)
    }

    pub fn resolve(file: Option<&Path>, env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = file {
            config.apply_file(read_file(path)?)?;
        }
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn chat(&self) -> ChatConfig {
        ChatConfig {
            api_key: self.openai.api_key.clone(),
            api_url: self.openai.api_url.clone(),
            model: self.openai.model.clone(),
            ..ChatConfig::default()
        }
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(db_path) = file.db_path {
            self.db_path = db_path;
        }
        if let Some(host) = file.host {
            self.host = parse_host(&host)?;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(environment) = file.environment {
            self.environment = parse_environment(&environment)?;
        }
        if let Some(utc_offset) = file.utc_offset {
            self.calendar = parse_utc_offset(&utc_offset)?;
        }
        if let Some(api_key) = file.openai.api_key {
            self.openai.api_key = non_blank(api_key);
        }
        if let Some(api_url) = file.openai.api_url {
            self.openai.api_url = api_url;
        }
        if let Some(model) = file.openai.model {
            self.openai.model = model;
        }
        Ok(())
    }

    fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<(), ConfigError> {
        let var = |name: &str| env.get(name).filter(|value| !value.trim().is_empty());
        if let Some(db_path) = var("MON_BONDHU_DB_PATH") {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(host) = var("MON_BONDHU_HOST") {
            self.host = parse_host(host)?;
        }
        if let Some(port) = var("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                message: format!("'{port}' is not a port number"),
            })?;
        }
        if let Some(environment) = var("MON_BONDHU_ENV").or_else(|| var("NODE_ENV")) {
            self.environment = parse_environment(environment)?;
        }
        if let Some(utc_offset) = var("MON_BONDHU_UTC_OFFSET") {
            self.calendar = parse_utc_offset(utc_offset)?;
        }
        if let Some(api_key) = var("OPENAI_API_KEY") {
            self.openai.api_key = Some(api_key.clone());
        }
        if let Some(api_url) = var("OPENAI_API_URL") {
            self.openai.api_url = api_url.clone();
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.openai.model = model.clone();
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name: "host",
        message: format!("'{value}' is not an IP address"),
    })
}

fn parse_environment(value: &str) -> Result<Environment, ConfigError> {
    value.parse().map_err(|err: mb_serve::UnknownEnvironment| ConfigError::Invalid {
        name: "environment",
        message: err.to_string(),
    })
}

fn parse_utc_offset(value: &str) -> Result<Calendar, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name: "utc_offset",
        message: format!("'{value}' is not an offset like +06:00"),
    })
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
