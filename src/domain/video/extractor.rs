//! Video extractor trait

use async_trait::async_trait;

use super::entity::VideoInfo;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of video metadata and comments
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    /// Fetch metadata for `url`, including up to `max_comments` raw comments
    /// when `max_comments` is set
    async fn extract(
        &self,
        url: &str,
        max_comments: Option<usize>,
    ) -> Result<VideoInfo, DomainError>;

    /// Extractor name for logs and metrics
    fn extractor_name(&self) -> &'static str;
}
