//! PageFetcher trait: URL in, cleaned visible text out.

use async_trait::async_trait;

use crate::error::FetchError;

/// Retrieves the readable text of a web page.
///
/// Implementations apply their own timeout and text-length cap. A failure is
/// reported as an error value and never panics; callers decide whether to
/// skip the page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// A human-readable name for this fetcher (e.g., "http").
    fn name(&self) -> &str;

    /// Fetch `url` and return its visible text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
