use crate::core::menu::{Menu, MenuItem};
use crate::core::ConfigProvider;
use crate::domain::money::Money;
use crate::utils::error::{FundError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_substituted, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STORE_URL_ENV: &str = "SUPABASE_URL";
pub const STORE_KEY_ENV: &str = "SUPABASE_KEY";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub store: StoreConfig,
    pub fundraiser: Option<FundraiserConfig>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundraiserConfig {
    pub name: String,
    pub goal: Money,
}

impl SiteConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FundError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FundError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Store settings without a config file; no menu. Each field comes from
    /// the given value, else `SUPABASE_URL` / `SUPABASE_KEY`.
    pub fn from_env(url: Option<String>, key: Option<String>) -> Result<Self> {
        let url = env_fallback(url, STORE_URL_ENV)?;
        let key = env_fallback(key, STORE_KEY_ENV)?;

        Ok(Self {
            store: StoreConfig {
                url,
                key,
                timeout_seconds: None,
            },
            fundraiser: None,
            menu: Vec::new(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FundError::ConfigError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_store_overrides(mut self, url: Option<String>, key: Option<String>) -> Self {
        if let Some(url) = url {
            self.store.url = url;
        }
        if let Some(key) = key {
            self.store.key = key;
        }
        self
    }

    pub fn menu(&self) -> Menu {
        Menu::new(self.menu.clone())
    }

    pub fn fundraiser_name(&self) -> &str {
        self.fundraiser
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("Ice Cream Fundraiser")
    }

    pub fn fundraising_goal(&self) -> Money {
        self.fundraiser
            .as_ref()
            .map(|f| f.goal)
            .unwrap_or(Money::ZERO)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_substituted("store.url", &self.store.url)?;
        validate_url("store.url", &self.store.url)?;
        validate_substituted("store.key", &self.store.key)?;
        validate_non_empty_string("store.key", &self.store.key)?;

        if self.store.timeout_seconds == Some(0) {
            return Err(FundError::InvalidConfigValueError {
                field: "store.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        for item in &self.menu {
            validate_non_empty_string("menu.name", &item.name)?;
            if item.price.cents() < 0 {
                return Err(FundError::InvalidConfigValueError {
                    field: format!("menu.{}.price", item.name),
                    value: item.price.to_string(),
                    reason: "Price cannot be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn env_fallback(value: Option<String>, var: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => std::env::var(var).map_err(|_| FundError::MissingConfigError {
            field: var.to_string(),
        }),
    }
}

impl ConfigProvider for SiteConfig {
    fn store_url(&self) -> &str {
        &self.store.url
    }

    fn store_key(&self) -> &str {
        &self.store.key
    }

    fn request_timeout_secs(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[store]
url = "https://abc.supabase.co"
key = "anon-key"

[fundraiser]
name = "Summer Scoops"
goal = 5000

[[menu]]
name = "Vanilla Cone"
price = 3.50

[[menu]]
name = "Sundae"
price = 5
description = "Two scoops, hot fudge"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = SiteConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.store_url(), "https://abc.supabase.co");
        assert_eq!(config.request_timeout_secs(), 10);
        assert_eq!(config.fundraiser_name(), "Summer Scoops");
        assert_eq!(config.fundraising_goal(), Money::from_cents(500_000));
        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.menu().lookup("sundae").unwrap().price.cents(), 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCOOP_TEST_STORE_URL", "https://env.supabase.co");

        let toml_content = r#"
[store]
url = "${SCOOP_TEST_STORE_URL}"
key = "${SCOOP_TEST_UNSET_KEY}"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.url, "https://env.supabase.co");
        assert_eq!(config.store.key, "${SCOOP_TEST_UNSET_KEY}");
        assert!(config.validate().is_err());

        std::env::remove_var("SCOOP_TEST_STORE_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[store]
url = "invalid-url"
key = "anon-key"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let fixed = config.with_store_overrides(Some("http://localhost:54321".to_string()), None);
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml_content = r#"
[store]
url = "https://abc.supabase.co"
key = "anon-key"
timeout_seconds = 0
"#;
        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.fundraiser_name(), "Summer Scoops");
    }
}
