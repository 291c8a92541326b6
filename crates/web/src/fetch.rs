//! HTTP page fetcher: GET a page, strip the chrome, keep the readable text.

use std::time::Duration;

use async_trait::async_trait;
use fifi_core::error::{Error, FetchError};
use fifi_core::fetch::PageFetcher;
use fifi_core::text::truncate_chars;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::crawler::HtmlSource;

/// Browser-like User-Agent; several campus servers reject unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Elements whose whole subtree is navigation or code rather than content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

/// Fetches pages over HTTP and extracts their visible text.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl HttpPageFetcher {
    /// A fetcher with a per-request `timeout` that keeps at most `max_chars`
    /// characters of each page.
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, max_chars })
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self.client.get(url).send().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_body(url).await?;
        let text = extract_text(&body);
        if text.is_empty() {
            warn!(url, "Page has no readable text");
            return Err(FetchError::Empty(url.to_string()));
        }

        let text = truncate_chars(&text, self.max_chars).to_string();
        debug!(url, chars = text.chars().count(), "Fetched page text");
        Ok(text)
    }
}

#[async_trait]
impl HtmlSource for HttpPageFetcher {
    async fn get_html(&self, url: &str) -> Result<String, FetchError> {
        self.get_body(url).await
    }
}

/// Visible text of an HTML document, skipping script, style and page chrome.
///
/// Text nodes are trimmed and joined with single spaces.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();
    collect_text(document.root_element(), &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_TAGS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(child_element, parts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Schurz Library</title><style>body { color: red; }</style></head>
  <body>
    <header>Site Banner</header>
    <nav><a href="/">Home</a></nav>
    <main>
      <h1>Library Hours</h1>
      <p>Open   until
         11 PM.</p>
      <script>var tracking = 1;</script>
    </main>
    <footer>Copyright</footer>
  </body>
</html>"#;

    #[test]
    fn extract_keeps_content_and_drops_chrome() {
        let text = extract_text(PAGE);
        assert!(text.contains("Library Hours"));
        assert!(text.contains("Schurz Library"));
        assert!(!text.contains("Site Banner"));
        assert!(!text.contains("Home"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn extract_joins_text_nodes_with_spaces() {
        let text = extract_text("<html><body><p>Go</p><p>Titans!</p></body></html>");
        assert_eq!(text, "Go Titans!");
    }

    #[test]
    fn extract_of_empty_body_is_empty() {
        assert!(extract_text("<html><body><script>x()</script></body></html>").is_empty());
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_without_network() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(1), 3000).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
