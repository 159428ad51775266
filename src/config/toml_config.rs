use crate::utils::error::{PoolError, Result};
use serde::{Deserialize, Serialize};

/// Optional TOML configuration for the medal updater, e.g.:
///
/// ```toml
/// [pool]
/// path = "data/pool.json"
/// mirror = "data/pool.js"
///
/// [source]
/// settings_url = "https://example.com/settings.json"
/// endpoint = "https://example.com/medals"
/// api_key = "${MEDALS_API_KEY}"
/// timeout_seconds = 15
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFileConfig {
    pub pool: Option<PoolSection>,
    pub source: Option<SourceSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSection {
    pub path: Option<String>,
    pub mirror: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub settings_url: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl UpdateFileConfig {
    /// 從 TOML 檔案載入配置，支援 ${VAR} 環境變數替換
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = substitute_env_vars(&content);
        toml::from_str(&content).map_err(|e| PoolError::ConfigError {
            message: format!("invalid config file {}: {}", path, e),
        })
    }
}

fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;

    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_parses_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[pool]
path = "data/pool.json"

[source]
endpoint = "https://example.com/medals"
timeout_seconds = 15
"#
        )
        .unwrap();

        let config = UpdateFileConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.pool.unwrap().path.as_deref(), Some("data/pool.json"));
        let source = config.source.unwrap();
        assert_eq!(source.endpoint.as_deref(), Some("https://example.com/medals"));
        assert_eq!(source.timeout_seconds, Some(15));
        assert_eq!(source.api_key, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEDAL_POOL_TEST_KEY", "secret-key");
        let substituted = substitute_env_vars("api_key = \"${MEDAL_POOL_TEST_KEY}\"");
        assert_eq!(substituted, "api_key = \"secret-key\"");

        // Unknown variables are left as-is.
        let untouched = substitute_env_vars("api_key = \"${MEDAL_POOL_NO_SUCH_VAR}\"");
        assert_eq!(untouched, "api_key = \"${MEDAL_POOL_NO_SUCH_VAR}\"");
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();
        let err = UpdateFileConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PoolError::ConfigError { .. }));
    }
}
