use crate::config::{ApiKey, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SEARCH_BASE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RecoError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

/// Config file layout:
///
/// ```toml
/// [provider]
/// api_key = "${GEMINI_API_KEY}"
/// model = "gemini-3-flash-preview"
///
/// [display]
/// search_base = "https://www.youtube.com/results"
///
/// [validation]
/// strict = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub display: Option<DisplayConfig>,
    pub validation: Option<ValidationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<ApiKey>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_search_base")]
    pub search_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub strict: Option<bool>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_search_base() -> String {
    DEFAULT_SEARCH_BASE.to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RecoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RecoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Layers the flags that also apply under `--config`. A given search base
    /// replaces `display.search_base`; `lenient` turns strict validation off.
    pub fn apply_overrides(&mut self, search_base: Option<&str>, lenient: bool) {
        if let Some(base) = search_base {
            self.display = Some(DisplayConfig {
                search_base: base.to_string(),
            });
        }
        if lenient {
            self.validation = Some(ValidationConfig {
                strict: Some(false),
            });
        }
    }

    fn search_base_or_default(&self) -> &str {
        self.display
            .as_ref()
            .map(|d| d.search_base.as_str())
            .unwrap_or(DEFAULT_SEARCH_BASE)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_key(&self) -> &str {
        self.provider
            .api_key
            .as_ref()
            .map(ApiKey::expose)
            .unwrap_or("")
    }

    fn api_endpoint(&self) -> &str {
        &self.provider.endpoint
    }

    fn model(&self) -> &str {
        &self.provider.model
    }

    fn search_base(&self) -> &str {
        self.search_base_or_default()
    }

    fn strict_validation(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.strict)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let key = crate::utils::validation::validate_required_field(
            "provider.api_key",
            &self.provider.api_key,
        )?;
        validate_non_empty_string("provider.api_key", key.expose())?;
        if ENV_VAR_PATTERN.is_match(key.expose()) {
            return Err(RecoError::ConfigError {
                message: "provider.api_key references an unset environment variable".to_string(),
            });
        }

        validate_url("provider.endpoint", &self.provider.endpoint)?;
        validate_non_empty_string("provider.model", &self.provider.model)?;
        validate_url("display.search_base", self.search_base_or_default())?;
        Ok(())
    }
}
