// SPDX-License-Identifier: MPL-2.0
//! One-shot loading of the content document.
//!
//! [`ContentStore::load`] fetches and parses the document on first use and
//! hands out the cached copy afterwards. A failed load caches nothing and is
//! not retried; the next call simply tries again.

use super::ContentDocument;
use crate::assets;
use crate::error::ContentError;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Where the content document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A file bundled into the binary, named relative to the asset root.
    Embedded(String),
    /// A JSON file on disk.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource::Embedded(assets::CONTENT_DOCUMENT.to_string())
    }
}

impl ContentSource {
    /// Interprets a user-supplied location: URLs by scheme, anything else as
    /// a filesystem path.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ContentSource::Url(location.to_string())
        } else {
            ContentSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Embedded(name) => write!(f, "bundled:{}", name),
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Memoizing loader for the content document.
#[derive(Debug, Default)]
pub struct ContentStore {
    source: ContentSource,
    cached: OnceCell<Arc<ContentDocument>>,
    fetches: AtomicUsize,
}

impl ContentStore {
    #[must_use]
    pub fn new(source: ContentSource) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Returns the document, fetching it only if no load has succeeded yet.
    ///
    /// Concurrent first callers share a single fetch.
    pub async fn load(&self) -> Result<Arc<ContentDocument>, ContentError> {
        self.cached
            .get_or_try_init(|| async {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(source = %self.source, "fetching content document");
                let bytes = self.fetch_bytes().await?;
                let document = ContentDocument::from_slice(&bytes)?;
                tracing::debug!(
                    languages = document.languages().count(),
                    "content document loaded"
                );
                Ok::<_, ContentError>(Arc::new(document))
            })
            .await
            .map(Arc::clone)
    }

    /// The cached document, if a load has already succeeded.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<ContentDocument>> {
        self.cached.get().cloned()
    }

    /// Number of fetch attempts made so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    async fn fetch_bytes(&self) -> Result<Vec<u8>, ContentError> {
        match &self.source {
            ContentSource::Embedded(name) => {
                assets::get(name).ok_or_else(|| ContentError::MissingEmbedded(name.clone()))
            }
            ContentSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|err| ContentError::Fetch(format!("{}: {}", path.display(), err))),
            ContentSource::Url(url) => fetch_url(url).await,
        }
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>, ContentError> {
    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| ContentError::Fetch(err.to_string()))?;
    let body = response
        .bytes()
        .await
        .map_err(|err| ContentError::Fetch(err.to_string()))?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_location_distinguishes_urls_and_paths() {
        assert_eq!(
            ContentSource::from_location("https://example.com/data/i18n.json"),
            ContentSource::Url("https://example.com/data/i18n.json".into())
        );
        assert_eq!(
            ContentSource::from_location("data/i18n.json"),
            ContentSource::File(PathBuf::from("data/i18n.json"))
        );
    }

    #[tokio::test]
    async fn second_load_returns_cache_without_fetching() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("i18n.json");
        fs::write(&path, r#"{"en": {"meta": {"title": "Hi"}}}"#).expect("write content");

        let store = ContentStore::new(ContentSource::File(path.clone()));
        let first = store.load().await.expect("first load");

        // The resource disappearing must not matter once cached.
        fs::remove_file(&path).expect("remove content");
        let second = store.load().await.expect("cached load");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("i18n.json");
        let store = ContentStore::new(ContentSource::File(path.clone()));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ContentError::Fetch(_)));
        assert!(store.cached().is_none());

        fs::write(&path, r#"{"tr": {}}"#).expect("write content");
        let doc = store.load().await.expect("load after failure");
        assert!(doc.get("tr").is_some());
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("i18n.json");
        fs::write(&path, "{not json").expect("write content");

        let store = ContentStore::new(ContentSource::File(path));
        assert!(matches!(
            store.load().await.unwrap_err(),
            ContentError::Parse(_)
        ));
    }

    /// Serves `body` on `/i18n.json` and 404 on any other path, one
    /// response per connection.
    async fn serve_once(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                let (status, payload) = if head.starts_with("GET /i18n.json ") {
                    ("200 OK", body)
                } else {
                    ("404 Not Found", "")
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                    payload.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn url_source_fetches_over_http() {
        let base = serve_once(r#"{"en": {"hero": {"title": "Hi"}}}"#).await;

        let store = ContentStore::new(ContentSource::from_location(&format!("{base}/i18n.json")));
        let doc = store.load().await.expect("fetch over http");
        assert!(doc.get("en").is_some());

        let missing = ContentStore::new(ContentSource::Url(format!("{base}/missing.json")));
        let err = missing.load().await.unwrap_err();
        assert!(matches!(err, ContentError::Fetch(_)));
        assert!(missing.cached().is_none());
    }

    #[tokio::test]
    async fn bundled_document_has_both_languages() {
        let store = ContentStore::default();
        let doc = store.load().await.expect("bundled content loads");
        assert!(doc.get("tr").is_some());
        assert!(doc.get("en").is_some());
    }

    #[tokio::test]
    async fn unknown_bundled_name_is_reported() {
        let store = ContentStore::new(ContentSource::Embedded("data/missing.json".into()));
        assert_eq!(
            store.load().await.unwrap_err(),
            ContentError::MissingEmbedded("data/missing.json".into())
        );
    }
}
