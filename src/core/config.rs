use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_secret")]
    pub secret: String,
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
    #[serde(default = "default_views_dir")]
    pub views_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            num_threads: default_num_threads(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_session_secret(),
            ttl_secs: default_session_ttl(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            views_dir: default_views_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_session_secret() -> String {
    "automationPracticeSecret".to_string()
}

fn default_session_ttl() -> i64 {
    600 // 10 minutes
}

fn default_cookie_name() -> String {
    "portal_session".to_string()
}

fn default_users_file() -> PathBuf {
    PathBuf::from("testData.json")
}

fn default_views_dir() -> PathBuf {
    PathBuf::from("views")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    true
}

impl Config {
    /// Load configuration. The TOML file is optional; defaults apply when it
    /// is absent. `PORT` and `SESSION_SECRET` environment variables override
    /// the file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .context(format!("Invalid PORT environment variable: {}", port))?;
        }

        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            self.session.secret = secret;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.session.secret.is_empty() {
            bail!("Session secret must not be empty");
        }

        if self.session.ttl_secs <= 0 {
            bail!("Session ttl_secs must be greater than 0");
        }

        if self.session.cookie_name.is_empty() {
            bail!("Session cookie_name must not be empty");
        }

        if self.data.users_file.as_os_str().is_empty() {
            bail!("users_file must not be empty");
        }

        if self.data.views_dir.as_os_str().is_empty() {
            bail!("views_dir must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
