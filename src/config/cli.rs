use crate::config::{ApiKey, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SEARCH_BASE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "commute-beats")]
#[command(about = "출퇴근길을 위한 완벽한 7곡: AI music recommendations for your commute")]
pub struct CliConfig {
    /// Search once with this theme and exit
    #[arg(long, conflicts_with = "preset")]
    pub theme: Option<String>,

    /// Search once with preset N (1-6) and exit
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub preset: Option<u8>,

    /// TOML config file; replaces the provider flags below. `--search-base`
    /// and `--lenient` still apply on top of it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: ApiKey,

    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL for song search links [default: https://www.youtube.com/results]
    #[arg(long)]
    pub search_base: Option<String>,

    /// Accept responses that do not hold exactly 5 Korean + 2 International songs
    #[arg(long)]
    pub lenient: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn api_key(&self) -> &str {
        self.api_key.expose()
    }

    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn search_base(&self) -> &str {
        self.search_base.as_deref().unwrap_or(DEFAULT_SEARCH_BASE)
    }

    fn strict_validation(&self) -> bool {
        !self.lenient
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.api_key.is_blank() {
            return Err(crate::utils::error::RecoError::MissingConfigError {
                field: "api_key (GEMINI_API_KEY)".to_string(),
            });
        }
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("search_base", self.search_base())?;
        Ok(())
    }
}
