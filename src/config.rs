use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_SESSION_FILE: &str = "./session.json";
pub const DEFAULT_MIN_LOADER_MS: u64 = 2000;

/// Env-file style configuration: `KEY=value` lines, `#` comments, optional
/// `export ` prefix and surrounding quotes. Environment variables win over
/// the file so a key can be overridden per invocation.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.values.get(key).cloned())
    }

    /// Backend base URL, trailing slashes stripped.
    pub fn api_url(&self) -> Result<String, ConfigError> {
        self.get("API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingKey("API_URL"))
    }

    pub fn session_file(&self) -> PathBuf {
        self.get("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
    }

    /// Minimum time the loading indicator stays visible.
    pub fn min_loader(&self) -> Duration {
        let ms = self
            .get("MIN_LOADER_MS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MIN_LOADER_MS);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn write_config(content: &str) -> String {
        let path = env::temp_dir().join(format!("pawshelt_cfg_{}.env", Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn parses_env_file_syntax() {
        let path = write_config(
            "# backend\nexport API_URL=\"http://localhost:8080/\"\nMIN_LOADER_MS=1500\n\n",
        );
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.api_url().unwrap(), "http://localhost:8080");
        assert_eq!(config.min_loader(), Duration::from_millis(1500));
        assert_eq!(config.session_file(), PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn rejects_lines_without_equals() {
        let path = write_config("API_URL http://localhost\n");
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::InvalidLine { line: 1, .. })
        ));
    }

    #[test]
    fn missing_api_url_is_an_error() {
        let config = AppConfig::default();
        assert!(matches!(config.api_url(), Err(ConfigError::MissingKey("API_URL"))));
    }
}
