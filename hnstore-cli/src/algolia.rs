//! HN Algolia search provider over reqwest

use std::time::Duration;

use hnstore::config::SearchConfig;
use hnstore::{ProviderError, SearchPayload, SearchProvider};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("hnsearch/", env!("CARGO_PKG_VERSION"));

pub struct AlgoliaProvider {
    client: reqwest::Client,
    config: SearchConfig,
}

impl AlgoliaProvider {
    pub fn new(config: SearchConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(transport)?;
        Ok(Self { client, config })
    }
}

fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

#[async_trait::async_trait]
impl SearchProvider for AlgoliaProvider {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchPayload, ProviderError> {
        let url = self.config.search_url(query, page);
        tracing::debug!(%url, "GET search page");

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status: status.as_u16(), body });
        }

        let body = response.text().await.map_err(transport)?;
        SearchPayload::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the request line
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}/api/v1", addr), handle)
    }

    fn provider_for(base: &str) -> AlgoliaProvider {
        let mut config = SearchConfig::default();
        config.set_api_base(base).unwrap();
        config.hits_per_page = 2;
        AlgoliaProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_decodes_response() {
        let body = r#"{"hits":[{"objectID":"42","title":"Rust 2.0","author":"ferris","url":"https://rust-lang.org","num_comments":9,"points":100}],"page":3,"nbPages":10}"#;
        let (base, server) = serve_once("HTTP/1.1 200 OK", body).await;

        let payload = provider_for(&base).fetch_page("rust lang", 3).await.unwrap();
        assert_eq!(payload.page, 3);
        assert_eq!(payload.hits.len(), 1);
        assert_eq!(payload.hits[0].object_id, "42");
        assert_eq!(payload.hits[0].points, 100);

        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /api/v1/search?query=rust+lang&page=3&hitsPerPage=2 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, server) = serve_once("HTTP/1.1 503 Service Unavailable", "overloaded").await;

        let err = provider_for(&base).fetch_page("rust", 0).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Status { status: 503, body: "overloaded".to_string() }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", "<html>nope</html>").await;

        let err = provider_for(&base).fetch_page("rust", 0).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider_for(&format!("http://{}/", addr))
            .fetch_page("rust", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
