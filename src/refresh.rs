use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::types::TokenPair;

/// Outcome of one refresh attempt.
///
/// Every failure mode — unreachable endpoint, timeout, non-2xx status,
/// malformed body — collapses to [`Failure`](RefreshResult::Failure). The
/// caller redirects to sign-in either way, so no cause survives past the
/// log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshResult {
    Success(TokenPair),
    Failure,
}

/// Token refresh seam.
///
/// [`HttpRefresher`] is the production implementation; tests substitute a
/// mock to observe call counts without network traffic.
pub trait Refresher: Send + Sync + 'static {
    /// Exchange a refresh token for a new token pair. Single attempt, no
    /// retries.
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = RefreshResult> + Send;
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

/// HTTP-backed refresher: one `POST {BACKEND_URL}/auth/refresh` per call.
pub struct HttpRefresher {
    refresh_url: Url,
    http: reqwest::Client,
}

impl HttpRefresher {
    /// Create a refresher with an explicit request timeout.
    ///
    /// The timeout bounds the whole call; an edge gate must not hold request
    /// latency hostage to a slow backend.
    #[must_use]
    pub fn new(refresh_url: Url, timeout: Duration) -> Self {
        Self {
            refresh_url,
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client with static defaults"),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }
}

impl Refresher for HttpRefresher {
    async fn refresh(&self, refresh_token: &str) -> RefreshResult {
        let response = match self
            .http
            .post(self.refresh_url.clone())
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "refresh endpoint unreachable");
                return RefreshResult::Failure;
            }
        };

        if !response.status().is_success() {
            // Expected path for revoked/expired refresh tokens.
            tracing::debug!(status = response.status().as_u16(), "refresh rejected");
            return RefreshResult::Failure;
        }

        match response.json::<TokenPair>().await {
            Ok(tokens) => RefreshResult::Success(tokens),
            Err(e) => {
                tracing::warn!(error = %e, "malformed refresh response");
                RefreshResult::Failure
            }
        }
    }
}
