use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "GFG_STATS_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const ENV_USER_AGENT: &str = "GFG_USER_AGENT";
const ENV_REQUEST_TIMEOUT: &str = "GFG_REQUEST_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
const DEFAULT_PORT: u16 = 58353;

/// Upstream site and HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: f64,
    /// Legacy profile page, `<base><username>/`
    pub profile_base_url: String,
    /// Practice page embedding the JSON payload, `<base><username>/practice/`
    pub practice_base_url: String,
    /// Prefix for problem links, followed by the problem slug
    pub problem_base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            profile_base_url: "https://www.geeksforgeeks.org/user/".to_string(),
            practice_base_url: "https://auth.geeksforgeeks.org/user/".to_string(),
            problem_base_url: "https://practice.geeksforgeeks.org/problems/".to_string(),
        }
    }
}

impl FetchConfig {
    /// Request timeout; values that are not a positive, representable
    /// duration fall back to the default
    pub fn timeout(&self) -> Duration {
        let default = Duration::from_secs(DEFAULT_TIMEOUT_SECS as u64);
        if self.timeout_secs > 0.0 {
            Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(default)
        } else {
            default
        }
    }

    fn apply_env(&mut self) {
        if let Ok(agent) = std::env::var(ENV_USER_AGENT) {
            if !agent.trim().is_empty() {
                self.user_agent = agent;
            }
        }

        if let Some(secs) = std::env::var(ENV_REQUEST_TIMEOUT)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
        {
            self.timeout_secs = secs;
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl ConfigFile {
    /// Parse file contents; an empty file yields defaults
    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub fetch: FetchConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            port: DEFAULT_PORT,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut fetch = Self::load_config_file(&config_path)
            .map(|cf| cf.fetch)
            .unwrap_or_default();
        fetch.apply_env();

        Self { fetch, port, host }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match ConfigFile::parse(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
