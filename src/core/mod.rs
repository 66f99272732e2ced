pub mod gemini;
pub mod prompt;

pub use crate::domain::model::{RecommendationResponse, SongCategory, SongRecommendation};
pub use crate::domain::ports::{ConfigProvider, RecommendationProvider};
pub use crate::utils::error::Result;
