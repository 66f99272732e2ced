pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::shell::{AppShell, AttemptId, Submission, View};
pub use config::toml_config::TomlConfig;
pub use core::gemini::GeminiClient;
pub use domain::model::{RecommendationResponse, SongCategory, SongRecommendation, PRESET_THEMES};
pub use domain::ports::{ConfigProvider, RecommendationProvider};
pub use utils::error::{RecoError, Result};
