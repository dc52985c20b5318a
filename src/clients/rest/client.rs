//! REST client implementation for the Lightspeed Retail API.
//!
//! This module provides the [`RestClient`] type: it sends requests with the
//! current access token, runs every response through the rate/pagination
//! controller, and drives the page loop shared by all resources.

use serde_json::Value;

use crate::auth::{AccessTokenSource, TokenManager};
use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{LightspeedConfig, ThrottlePolicy};
use crate::rest::controller::{classify, plan, ApiResponse, ControlPlan};
use crate::rest::resource::{
    collection_records, decode_records, LightspeedResource, MissingCollectionPolicy,
};
use crate::rest::PageDecision;

/// REST API client for one Lightspeed account.
///
/// The client owns the token source `T` (a [`TokenManager`] by default) and
/// reads the current access token before every request, so a refresh
/// triggered by an expired-token envelope is used by the very next request.
///
/// Requests are issued one at a time. When the rate limiter is close to
/// full, or after an error envelope, the calling task sleeps before the
/// client returns.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use lightspeed_api::{LightspeedConfig, RestClient};
/// use lightspeed_api::rest::resources::{Item, ItemListParams};
///
/// let client = RestClient::new(&config)?;
/// let items = Item::all(&client, &ItemListParams::default()).await?;
/// println!("{} items", items.len());
/// ```
#[derive(Debug)]
pub struct RestClient<T = TokenManager> {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Source of bearer tokens.
    tokens: T,
    /// Unit costs, retry pauses and the retry ceiling.
    policy: ThrottlePolicy,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient<TokenManager> {
    /// Creates a client with a fresh [`TokenManager`] for `config`.
    ///
    /// No token is fetched up front; the first request comes back as an
    /// expired-token envelope and triggers a refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &LightspeedConfig) -> Result<Self, RestError> {
        Self::with_tokens(config, TokenManager::new(config.clone()))
    }
}

impl<T: AccessTokenSource> RestClient<T> {
    /// Creates a client that takes its tokens from `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn with_tokens(config: &LightspeedConfig, tokens: T) -> Result<Self, RestError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
            tokens,
            policy: config.throttle().clone(),
        })
    }

    /// Returns the token source.
    #[must_use]
    pub const fn tokens(&self) -> &T {
        &self.tokens
    }

    /// Returns the throttle policy.
    #[must_use]
    pub const fn policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    /// Returns the account URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http_client.base_url()
    }

    /// Sends one request with the current access token.
    ///
    /// The response is returned as-is; nothing is retried or throttled.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] if the request fails to send.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder =
            HttpRequest::builder(method, normalized_path).query(query.iter().cloned());
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        let token = self.tokens.access_token().await;
        self.http_client
            .request(&request, &token)
            .await
            .map_err(Into::into)
    }

    /// Runs a response through the controller and applies its plan.
    ///
    /// Sleeps for the bucket overflow or the error pause, refreshes the
    /// access token after an expired-token envelope, and returns what to
    /// request next.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Auth`] if the token refresh fails.
    pub async fn control(
        &self,
        response: &HttpResponse,
        method: HttpMethod,
    ) -> Result<PageDecision, RestError> {
        let plan = self.evaluate(response, method);
        self.apply(&plan).await?;
        Ok(plan.decision)
    }

    /// Sends a request, retrying it until the controller stops asking for
    /// retries.
    ///
    /// Returns the first response that is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MaxRetries`] once the request was retried
    /// `max_retries` times in a row, and any error of [`send`](Self::send)
    /// or [`control`](Self::control).
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<HttpResponse, RestError> {
        let mut attempts = 0_u32;
        loop {
            attempts += 1;
            let response = self.send(method, path, query, body.clone()).await?;
            let plan = self.evaluate(&response, method);

            if plan.decision == PageDecision::Retry {
                self.check_budget(path, attempts, response.code)?;
                self.apply(&plan).await?;
                continue;
            }

            self.apply(&plan).await?;
            return Ok(response);
        }
    }

    /// Sends a GET request through the controller.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Get, path, query, None).await
    }

    /// Sends a PUT request through the controller.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(&self, path: &str, body: Value) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Put, path, &[], Some(body)).await
    }

    /// Fetches every record of a collection, page by page.
    ///
    /// Starts at offset 0 and follows the controller's decisions until it
    /// reports the last page. `query` is sent with every page; an `offset`
    /// in it is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MaxRetries`] if one page keeps failing,
    /// [`RestError::MissingCollection`] if a page lacks the collection key
    /// (unless `R` retries such pages), [`RestError::Deserialize`] if a
    /// record does not match `R`, and any error of [`send`](Self::send) or
    /// [`control`](Self::control).
    pub async fn fetch_all<R: LightspeedResource>(
        &self,
        query: &[(String, String)],
    ) -> Result<Vec<R>, RestError> {
        let path = R::collection_path();
        let mut records = Vec::new();
        let mut offset = 0_u64;
        let mut attempts = 0_u32;

        loop {
            attempts += 1;

            let mut page_query: Vec<(String, String)> = query
                .iter()
                .filter(|(key, _)| key != "offset")
                .cloned()
                .collect();
            page_query.push(("offset".to_string(), offset.to_string()));

            let response = self.send(HttpMethod::Get, &path, &page_query, None).await?;
            let mut plan = self.evaluate(&response, HttpMethod::Get);

            if let PageDecision::Next(next) = plan.decision {
                if next <= offset {
                    tracing::warn!(
                        path = %path,
                        offset,
                        next,
                        "Page cursor did not advance; treating page as the last"
                    );
                    plan.decision = PageDecision::Stop;
                }
            }

            if plan.decision == PageDecision::Retry {
                self.check_budget(&path, attempts, response.code)?;
                self.apply(&plan).await?;
                continue;
            }

            self.apply(&plan).await?;

            if let Some(values) = collection_records(&response.body, R::NAME) {
                let page: Vec<R> = decode_records(values)?;
                tracing::debug!(
                    resource = R::NAME,
                    offset,
                    records = page.len(),
                    "Fetched page"
                );
                records.extend(page);
            } else {
                match R::MISSING_COLLECTION {
                    MissingCollectionPolicy::Fail => {
                        return Err(RestError::MissingCollection { key: R::NAME, path });
                    }
                    MissingCollectionPolicy::RetryPage if attempts <= self.policy.max_retries => {
                        tracing::warn!(
                            resource = R::NAME,
                            offset,
                            status = response.code,
                            "Page is missing its collection; retrying"
                        );
                        continue;
                    }
                    MissingCollectionPolicy::RetryPage => {
                        tracing::warn!(
                            resource = R::NAME,
                            offset,
                            attempts,
                            "Page is still missing its collection; skipping it"
                        );
                    }
                }
            }

            attempts = 0;
            match plan.decision {
                PageDecision::Next(next) => offset = next,
                PageDecision::Stop | PageDecision::Retry => break,
            }
        }

        tracing::debug!(resource = R::NAME, total = records.len(), "Fetched collection");
        Ok(records)
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingCollection`] if the response does not
    /// contain the record, and any error of [`request`](Self::request).
    pub async fn fetch_one<R: LightspeedResource>(
        &self,
        id: &str,
        query: &[(String, String)],
    ) -> Result<R, RestError> {
        let path = R::record_path(id);
        let response = self.get(&path, query).await?;

        let mut records: Vec<R> = collection_records(&response.body, R::NAME)
            .map(decode_records::<R>)
            .transpose()?
            .unwrap_or_default();

        if records.is_empty() {
            return Err(RestError::MissingCollection { key: R::NAME, path });
        }
        Ok(records.swap_remove(0))
    }

    /// Classifies a response, logs it, and returns the controller's plan.
    fn evaluate(&self, response: &HttpResponse, method: HttpMethod) -> ControlPlan {
        let classified = classify(response);

        match &classified {
            ApiResponse::Page { bucket, cursor } => {
                tracing::debug!(
                    level = bucket.level,
                    capacity = bucket.capacity,
                    drip_rate = bucket.drip_rate,
                    count = ?cursor.map(|c| c.count),
                    "Rate limit bucket"
                );
            }
            ApiResponse::ErrorEnvelope(envelope) => {
                tracing::warn!(
                    status = response.code,
                    envelope = %envelope,
                    "Lightspeed returned an error envelope"
                );
            }
            ApiResponse::Unparseable { status, reason } => {
                tracing::warn!(
                    status = *status,
                    reason = %reason,
                    body = %response.body,
                    "Unrecognized Lightspeed response"
                );
            }
        }

        plan(&classified, method, &self.policy)
    }

    /// Refreshes the token and sleeps as the plan requires.
    async fn apply(&self, plan: &ControlPlan) -> Result<(), RestError> {
        if plan.refresh {
            self.tokens.refresh().await?;
        }
        if !plan.pause.is_zero() {
            tracing::debug!(pause = ?plan.pause, "Throttling before next request");
            tokio::time::sleep(plan.pause).await;
        }
        Ok(())
    }

    /// Fails once a request has used up its retries.
    fn check_budget(&self, path: &str, attempts: u32, last_status: u16) -> Result<(), RestError> {
        if attempts > self.policy.max_retries {
            return Err(RestError::MaxRetries {
                path: path.to_string(),
                attempts,
                last_status,
            });
        }
        Ok(())
    }
}

/// Normalizes a REST API path.
///
/// Strips leading `/` characters and a trailing `.json`, then appends
/// `.json`. Empty paths are rejected.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}
