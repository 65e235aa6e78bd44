// OAuth2 session against the VW Group identity service.
//
// Holds the token material for one SEAT account and refreshes it when
// expired. Token refresh failures are always surfaced as `Error::Auth`:
// a session that cannot refresh needs user re-authentication, never a
// transport retry.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{AUTH_AUTHORIZE_URL, AUTH_TOKEN_URL};

/// Clock skew allowed when deciding whether a token is still usable.
const EXPIRY_SKEW_SECS: i64 = 60;

/// OAuth2 token material for one authenticated SEAT account.
///
/// This is the only state the client persists; hosts serialize it
/// however they see fit and hand it back on restart.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Absolute expiry of the access token. `None` means the expiry is
    /// unknown — the token is used as-is until the backend rejects it.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSet {
    pub fn new(access_token: SecretString, refresh_token: SecretString) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: None,
        }
    }

    /// A token set holding only a refresh token. The access token is
    /// marked expired so the first `bearer()` call performs a refresh.
    pub fn from_refresh_token(refresh_token: SecretString) -> Self {
        Self::new(SecretString::from(""), refresh_token).with_expires_in(0)
    }

    /// Set expiry from a relative `expires_in` (seconds from now).
    pub fn with_expires_in(mut self, expires_in_secs: i64) -> Self {
        self.expires_at = Some(Utc::now() + ChronoDuration::seconds(expires_in_secs));
        self
    }

    /// Whether the access token should be refreshed before use.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() + ChronoDuration::seconds(EXPIRY_SKEW_SECS) >= at,
            None => false,
        }
    }
}

/// Wire shape of the identity service's token responses.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// OAuth2 session: application credentials + current tokens.
///
/// Owns its own `reqwest::Client` — the identity service is a different
/// host than the API backend and is not subject to the transport's
/// concurrency cap or retry policy.
pub struct OAuthSession {
    http: reqwest::Client,
    authorize_url: Url,
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
    tokens: Mutex<TokenSet>,
}

impl OAuthSession {
    /// Create a session from application credentials and stored tokens.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: SecretString,
        tokens: TokenSet,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("seatlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            http,
            authorize_url: Url::parse(AUTH_AUTHORIZE_URL)?,
            token_url: Url::parse(AUTH_TOKEN_URL)?,
            client_id: client_id.into(),
            client_secret,
            tokens: Mutex::new(tokens),
        })
    }

    /// Override the token endpoint (tests, non-production stacks).
    pub fn with_token_url(mut self, token_url: Url) -> Self {
        self.token_url = token_url;
        self
    }

    /// Override the authorize endpoint (tests, non-production stacks).
    pub fn with_authorize_url(mut self, authorize_url: Url) -> Self {
        self.authorize_url = authorize_url;
        self
    }

    /// URL the user visits to authorize this application.
    ///
    /// Completing the flow redirects to `redirect_uri` with the code
    /// that [`Self::exchange_code`] trades for the initial token set.
    /// `state` is echoed back unmodified for CSRF verification.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("state", state);
        url
    }

    /// Return a valid bearer token, refreshing first if expired.
    ///
    /// The token lock is held across the refresh so concurrent callers
    /// never trigger a refresh stampede.
    pub async fn bearer(&self) -> Result<SecretString, Error> {
        let mut tokens = self.tokens.lock().await;
        if tokens.is_expired() {
            debug!("access token expired, refreshing");
            *tokens = self.grant_refresh(&tokens).await?;
        }
        Ok(tokens.access_token.clone())
    }

    /// Force a token refresh regardless of expiry.
    pub async fn refresh(&self) -> Result<(), Error> {
        let mut tokens = self.tokens.lock().await;
        *tokens = self.grant_refresh(&tokens).await?;
        Ok(())
    }

    /// Exchange an authorization code for an initial token set.
    ///
    /// Used once when an account is first linked; afterwards the
    /// refresh-token grant keeps the session alive.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<(), Error> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];
        let response = self.token_request(&params).await?;

        let mut tokens = self.tokens.lock().await;
        *tokens = merge_response(response, &tokens);
        Ok(())
    }

    /// Clone of the current token material, for host persistence.
    pub async fn token_set(&self) -> TokenSet {
        self.tokens.lock().await.clone()
    }

    async fn grant_refresh(&self, current: &TokenSet) -> Result<TokenSet, Error> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.expose_secret()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];
        let response = self.token_request(&params).await?;
        debug!("token refresh successful");
        Ok(merge_response(response, current))
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse, Error> {
        let resp = self
            .http
            .post(self.token_url.clone())
            .form(params)
            .send()
            .await
            .map_err(|e| Error::Auth {
                message: format!("token endpoint unreachable: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        resp.json::<TokenResponse>().await.map_err(|e| Error::Auth {
            message: format!("malformed token response: {e}"),
        })
    }
}

/// Fold a token response into a new `TokenSet`, keeping the previous
/// refresh token when the server did not rotate it.
fn merge_response(response: TokenResponse, current: &TokenSet) -> TokenSet {
    let mut next = TokenSet::new(
        SecretString::from(response.access_token),
        response
            .refresh_token
            .map_or_else(|| current.refresh_token.clone(), SecretString::from),
    );
    if let Some(expires_in) = response.expires_in {
        next = next.with_expires_in(expires_in);
    }
    next
}
