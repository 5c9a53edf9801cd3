use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

/// Settings of the HTTP fetch collaborator used by the configuration store.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Base against which relative locations (e.g. `settings.json`) are resolved.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout() -> u64 { 5 }
fn default_request_timeout() -> u64 { 30 }
fn default_user_agent() -> String { format!("config-store/{}", env!("CARGO_PKG_VERSION")) }

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

pub fn load_from_file(path: &str) -> Result<FetchConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("cannot read {path}: {e}"))?;
    from_toml_str(&content)
}

/// Parse and validate a TOML document.
pub fn from_toml_str(content: &str) -> Result<FetchConfig> {
    let mut cfg: FetchConfig = toml::from_str(content)?;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

impl FetchConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // blank base_url means "no base"
        if let Some(base) = &self.base_url {
            let trimmed = base.trim();
            if trimmed.is_empty() {
                self.base_url = None;
            } else {
                reqwest::Url::parse(trimmed)
                    .map_err(|e| anyhow!("base_url {trimmed:?} is not an absolute URL: {e}"))?;
                self.base_url = Some(trimmed.to_string());
            }
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("timeouts must be positive seconds"));
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = from_toml_str("")?;
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert!(cfg.user_agent.starts_with("config-store/"));
        Ok(())
    }

    #[test]
    fn explicit_values_are_kept() -> Result<()> {
        let cfg = from_toml_str(
            r#"
            base_url = " http://127.0.0.1:8080/app/ "
            connect_timeout_secs = 2
            request_timeout_secs = 10
            user_agent = "my-app"
            "#,
        )?;
        assert_eq!(cfg.base_url.as_deref(), Some("http://127.0.0.1:8080/app/"));
        assert_eq!(cfg.connect_timeout_secs, 2);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.user_agent, "my-app");
        Ok(())
    }

    #[test]
    fn blank_base_url_and_agent_are_normalized() -> Result<()> {
        let cfg = from_toml_str("base_url = \"  \"\nuser_agent = \"\"")?;
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.user_agent, default_user_agent());
        Ok(())
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = from_toml_str("request_timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("timeouts"));
    }

    #[test]
    fn rejects_relative_base_url() {
        assert!(from_toml_str("base_url = \"configs/\"").is_err());
    }

    #[test]
    fn loads_from_file() -> Result<()> {
        let tmp = std::env::temp_dir().join(format!("fetch_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, "request_timeout_secs = 7\n")?;
        let cfg = load_from_file(tmp.to_str().unwrap())?;
        assert_eq!(cfg.request_timeout(), Duration::from_secs(7));
        let _ = std::fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_from_file("/nonexistent/fetch.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
