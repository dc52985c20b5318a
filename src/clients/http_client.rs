//! HTTP client for Lightspeed API communication.
//!
//! This module provides the [`HttpClient`] type: a thin wrapper around
//! `reqwest` that joins paths to the account URL, attaches default headers
//! and the bearer token, and turns the raw response into an [`HttpResponse`].

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::LightspeedConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to one Lightspeed account.
///
/// The client does not retry and does not interpret status codes: every
/// response that arrives is returned, error envelopes included. Throttling
/// and retries belong to the [`RestClient`](crate::clients::RestClient).
///
/// # Example
///
/// ```rust,ignore
/// use lightspeed_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "Category.json").build()?;
/// let response = client.request(&request, "access-token").await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Account URL, always ending with a slash.
    base_url: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the account described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &LightspeedConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Lightspeed API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.account_url(),
            default_headers,
        })
    }

    /// Returns the account URL requests are joined to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full URL for a request path.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request authorized with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The request cannot be sent or the body cannot be read (`Network`)
    pub async fn request(
        &self,
        request: &HttpRequest,
        access_token: &str,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        headers.insert("Authorization".to_string(), format!("Bearer {access_token}"));
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending Lightspeed API request"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        Ok(HttpResponse::new(
            code,
            res_headers,
            HttpResponse::parse_body(&body_text),
        ))
    }

    /// Parses response headers into a `HashMap` keyed by lowercased name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountId, ApiUrl, ClientId, ClientSecret, RefreshToken};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(api_url: &str) -> LightspeedConfig {
        LightspeedConfig::builder()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .refresh_token(RefreshToken::new("refresh").unwrap())
            .account_id(AccountId::new("777").unwrap())
            .api_url(ApiUrl::new(api_url).unwrap())
            .user_agent_prefix("ReportRunner/1.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_builds_account_url_and_default_headers() {
        let client = HttpClient::new(&create_config("https://api.example.com/API/Account/")).unwrap();

        assert_eq!(client.base_url(), "https://api.example.com/API/Account/777/");
        assert_eq!(
            client.url_for("/Item/5.json"),
            "https://api.example.com/API/Account/777/Item/5.json"
        );
        let user_agent = client.default_headers.get("User-Agent").unwrap();
        assert!(user_agent.starts_with("ReportRunner/1.0 | Lightspeed API Library v"));
        assert_eq!(
            client.default_headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_request_sends_bearer_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/API/Account/777/Category.json"))
            .and(header("authorization", "Bearer token-1"))
            .and(query_param("offset", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-LS-API-Bucket-Level", "3/60")
                    .insert_header("X-LS-API-Drip-Rate", "1")
                    .set_body_json(json!({"@attributes": {"count": "0"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&create_config(&format!("{}/API/Account/", server.uri()))).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "Category.json")
            .query_param("offset", "100")
            .build()
            .unwrap();

        let response = client.request(&request, "token-1").await.unwrap();

        assert_eq!(response.code, 200);
        assert_eq!(response.bucket_level(), Some("3/60"));
        assert_eq!(response.drip_rate(), Some("1"));
        assert_eq!(response.body["@attributes"]["count"], "0");
    }

    #[tokio::test]
    async fn test_request_returns_error_responses_without_failing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/API/Account/777/Item.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "httpCode": "401",
                "httpMessage": "Unauthorized",
                "message": "Invalid access token."
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&create_config(&format!("{}/API/Account/", server.uri()))).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "Item.json")
            .build()
            .unwrap();

        let response = client.request(&request, "stale").await.unwrap();

        assert_eq!(response.code, 401);
        assert!(!response.is_ok());
        assert_eq!(response.body["httpCode"], "401");
    }

    #[tokio::test]
    async fn test_put_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/API/Account/777/Item/42.json"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"description": "Blue Widget"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Item": {"itemID": "42"}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&create_config(&format!("{}/API/Account/", server.uri()))).unwrap();
        let request = HttpRequest::builder(HttpMethod::Put, "Item/42.json")
            .body(json!({"description": "Blue Widget"}))
            .build()
            .unwrap();

        let response = client.request(&request, "token").await.unwrap();
        assert_eq!(response.body["Item"]["itemID"], "42");
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_sending() {
        let client = HttpClient::new(&create_config("http://127.0.0.1:9/API/Account/")).unwrap();
        let request = HttpRequest {
            http_method: HttpMethod::Put,
            path: "Item/1.json".to_string(),
            body: None,
            query: Vec::new(),
        };

        let result = client.request(&request, "token").await;
        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    }
}
