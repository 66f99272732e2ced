use crate::domain::model::RecommendationResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn search_base(&self) -> &str;
    fn strict_validation(&self) -> bool;
}

/// Anything that turns a theme into a list of songs.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(&self, theme: &str) -> Result<RecommendationResponse>;
}

