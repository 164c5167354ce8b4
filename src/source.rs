use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{MatchError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where the knowledge-base text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    File(PathBuf),
    Url(String),
}

impl From<&str> for KnowledgeSource {
    fn from(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            KnowledgeSource::Url(location.to_string())
        } else {
            KnowledgeSource::File(PathBuf::from(location))
        }
    }
}

impl KnowledgeSource {
    /// Fetches and decodes the source. Every failure is reported as
    /// [`MatchError::LoadFailure`].
    pub async fn fetch(&self) -> Result<String> {
        let bytes = self
            .fetch_bytes()
            .await
            .map_err(|err| MatchError::load_failure(self.to_string(), reason_of(err)))?;
        debug!(source = %self, bytes = bytes.len(), "fetched knowledge base");
        Ok(decode_utf8(&bytes))
    }

    async fn fetch_bytes(&self) -> Result<Vec<u8>> {
        match self {
            KnowledgeSource::File(path) => Ok(tokio::fs::read(path).await?),
            KnowledgeSource::Url(url) => {
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(MatchError::load_failure(
                        url.clone(),
                        format!(
                            "HTTP {}",
                            status.canonical_reason().unwrap_or(status.as_str())
                        ),
                    ));
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeSource::File(path) => write!(f, "{}", path.display()),
            KnowledgeSource::Url(url) => write!(f, "{url}"),
        }
    }
}

fn reason_of(err: MatchError) -> String {
    match err {
        MatchError::LoadFailure { reason, .. } => reason,
        MatchError::Io(err) => err.to_string(),
        MatchError::Http(err) => err.to_string(),
        other => other.to_string(),
    }
}

/// Decodes as UTF-8 independent of locale: a leading BOM is dropped and
/// invalid sequences become U+FFFD.
pub fn decode_utf8(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!("knowledge base contains invalid UTF-8; replaced with U+FFFD");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn location_distinguishes_urls_from_paths() {
        assert_eq!(
            KnowledgeSource::from("https://example.com/kb.csv"),
            KnowledgeSource::Url("https://example.com/kb.csv".into())
        );
        assert_eq!(
            KnowledgeSource::from("data/knowledge-base.csv"),
            KnowledgeSource::File(PathBuf::from("data/knowledge-base.csv"))
        );
    }

    #[test]
    fn decode_strips_bom_and_keeps_persian_text() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("سلام".as_bytes());
        assert_eq!(decode_utf8(&bytes), "سلام");
    }

    #[test]
    fn decode_replaces_invalid_sequences() {
        let text = decode_utf8(b"ab\xFFcd");
        assert_eq!(text, "ab\u{FFFD}cd");
    }

    #[tokio::test]
    async fn fetch_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all("\"q\",\"a\"\n\"پرسش\",\"پاسخ\"".as_bytes())
            .expect("write");
        let source = KnowledgeSource::File(file.path().to_path_buf());
        let text = source.fetch().await.expect("fetch");
        assert!(text.contains("پرسش"));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_failure() {
        let source = KnowledgeSource::from("/nonexistent/knowledge-base.csv");
        let err = source.fetch().await.unwrap_err();
        match err {
            MatchError::LoadFailure { origin, reason } => {
                assert_eq!(origin, "/nonexistent/knowledge-base.csv");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_error_status_is_a_load_failure() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).await.expect("read");
            stream
                .write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .await
                .expect("write");
        });

        let url = format!("http://{addr}/kb.csv");
        let err = KnowledgeSource::from(url.as_str())
            .fetch()
            .await
            .unwrap_err();
        match err {
            MatchError::LoadFailure { origin, reason } => {
                assert_eq!(origin, url);
                assert!(reason.contains("Not Found"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        server.await.expect("server");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_load_failure() {
        let err = KnowledgeSource::from("http://127.0.0.1:1/kb.csv")
            .fetch()
            .await
            .unwrap_err();
        match err {
            MatchError::LoadFailure { origin, reason } => {
                assert_eq!(origin, "http://127.0.0.1:1/kb.csv");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
