use crate::config::ProviderConfig;
use crate::provider::models::SearchResponse;
use crate::{Error, Result};
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, error};

/// Client for the external recipe search API
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    config: ProviderConfig,
}

impl SearchClient {
    /// Create a new search client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Search the provider for recipes matching `query`
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!("Provider search: {:?}", query);

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("q", query),
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();

        if !status.is_success() {
            error!("Recipe provider error: HTTP {}", status);
            return Err(Error::UpstreamUnavailable(status.as_u16()));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| match self.classify(e) {
                Error::Http(e) => {
                    Error::Upstream(format!("Failed to parse provider response: {e}"))
                }
                other => other,
            })
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            error!(
                "Recipe provider timed out after {}s",
                self.config.timeout_seconds
            );
            Error::UpstreamTimeout(self.config.timeout_seconds)
        } else {
            Error::Http(err.without_url())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config_for(server: &Server) -> ProviderConfig {
        ProviderConfig {
            api_url: format!("{}/search", server.url()),
            app_id: "test-id".to_string(),
            app_key: "test-key".to_string(),
            ..ProviderConfig::default()
        }
    }

    #[tokio::test]
    async fn test_search_sends_query_and_credentials() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "chicken curry".into()),
                Matcher::UrlEncoded("app_id".into(), "test-id".into()),
                Matcher::UrlEncoded("app_key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "q": "chicken curry",
                    "count": 1,
                    "hits": [{"recipe": {"label": "Curry", "url": "https://example.com/curry"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = SearchClient::new(config_for(&server)).unwrap();
        let response = client.search("chicken curry").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.count, Some(1));
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status": "error", "message": "Unauthorized app_id"}"#)
            .create_async()
            .await;

        let client = SearchClient::new(config_for(&server)).unwrap();
        let err = client.search("pasta").await.unwrap_err();

        assert!(matches!(err, Error::UpstreamUnavailable(401)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_search_server_error_is_retryable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = SearchClient::new(config_for(&server)).unwrap();
        let err = client.search("pasta").await.unwrap_err();

        assert!(matches!(err, Error::UpstreamUnavailable(503)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_search_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = SearchClient::new(config_for(&server)).unwrap();
        let err = client.search("pasta").await.unwrap_err();

        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_search_timeout_is_retryable() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let client = SearchClient::new(ProviderConfig {
            api_url: format!("http://{addr}/search"),
            timeout_seconds: 1,
            ..ProviderConfig::default()
        })
        .unwrap();
        let err = client.search("pasta").await.unwrap_err();

        assert!(matches!(err, Error::UpstreamTimeout(1)));
        assert!(err.is_retryable());
    }
}
