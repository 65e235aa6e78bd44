// SEAT Connect HTTP client
//
// Wraps `reqwest::Client` with bearer auth, a per-client concurrency
// cap, per-attempt timeouts, failure classification, and linear-backoff
// retries. Endpoint modules (vehicles, actions) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;
use url::Url;

use crate::auth::OAuthSession;
use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::transport::TransportConfig;

/// Parsed response body, per the backend's loose conventions:
/// JSON when the content type says so, empty when there is nothing,
/// raw text otherwise.
#[derive(Debug)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    /// Deserialize a JSON body into `T`; any other body is a protocol error.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => {
                let body = value.to_string();
                serde_json::from_value(value).map_err(|e| Error::Protocol {
                    message: e.to_string(),
                    body,
                })
            }
            Self::Text(body) => Err(Error::Protocol {
                message: "expected a JSON body".into(),
                body,
            }),
            Self::Empty => Err(Error::Protocol {
                message: "expected a JSON body, got an empty response".into(),
                body: String::new(),
            }),
        }
    }
}

/// Authenticated client for the SEAT Connect backend.
///
/// Cheap to share behind an `Arc`. At most `concurrency` requests are in
/// flight at once; excess callers queue on the semaphore in FIFO order.
pub struct ConnectClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<OAuthSession>,
    retry: RetryPolicy,
    timeout: Duration,
    semaphore: Arc<Semaphore>,
}

impl ConnectClient {
    /// Create a client from an authenticated session and transport config.
    pub fn new(session: Arc<OAuthSession>, config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
            retry: config.retry,
            timeout: config.timeout,
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
        })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get(&self, path: &str) -> Result<ResponseBody, Error> {
        self.request(Method::GET, path).await
    }

    pub(crate) async fn post(&self, path: &str) -> Result<ResponseBody, Error> {
        self.request(Method::POST, path).await
    }

    /// Issue a request with retries.
    ///
    /// Transient failures (429, 5xx, network, timeout) are retried up to
    /// the policy's budget with linear backoff; `Auth`, `ClientFatal`,
    /// and `Protocol` propagate immediately.
    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<ResponseBody, Error> {
        let url = self.api_url(path)?;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.attempt(method.clone(), url.clone()).await {
                Ok(body) => return Ok(body),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.delay(attempt);
                    debug!(
                        %url,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: acquire a concurrency permit, attach a bearer token,
    /// and run the request under the per-attempt deadline. The deadline
    /// covers request start to full body receipt; time spent queueing on
    /// the semaphore does not count against it.
    async fn attempt(&self, method: Method, url: Url) -> Result<ResponseBody, Error> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("request semaphore is never closed");

        let bearer = self.session.bearer().await?;

        debug!(%method, %url, "issuing request");

        let attempt = async {
            let resp = self
                .http
                .request(method, url)
                .bearer_auth(bearer.expose_secret())
                .send()
                .await
                .map_err(Error::Network)?;

            let status = resp.status();
            if !status.is_success() {
                // Drain the body on the failure path too.
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::from_status(status, body));
            }

            read_body(resp).await
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::InvalidUrl)
    }
}

/// Parse a successful response body.
///
/// Zero-length → `Empty`; JSON content type → parsed JSON (a parse
/// failure here is a protocol error, not a transient one); anything
/// else → raw text. The body is fully consumed on every path.
async fn read_body(resp: reqwest::Response) -> Result<ResponseBody, Error> {
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    let text = resp.text().await.map_err(Error::Network)?;

    if text.is_empty() {
        return Ok(ResponseBody::Empty);
    }
    if is_json {
        return serde_json::from_str(&text)
            .map(ResponseBody::Json)
            .map_err(|e| Error::Protocol {
                message: e.to_string(),
                body: text,
            });
    }
    Ok(ResponseBody::Text(text))
}
