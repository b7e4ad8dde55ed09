//! Template-fetch boundary. Caching is the host's concern, keyed by url.

use crate::boundary::BoundaryError;
use async_trait::async_trait;

#[async_trait]
pub trait TemplateLoader: Send + Sync {
    /// Fetches template content for `url`, consulting the host's cache.
    async fn load(&self, url: &str) -> Result<String, BoundaryError>;
}
