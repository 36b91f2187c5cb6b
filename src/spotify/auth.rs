use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{MusicError, Result},
    types::Token,
    warning,
};

/// Seconds before expiry at which a reused token is considered stale.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Long-lived credentials used for the refresh-token grant.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub refresh_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credentials {
    pub fn new(
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            refresh_token: Some(refresh_token.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
        }
    }

    /// Returns the three values, or a configuration error naming every
    /// missing one. Empty strings count as missing.
    fn require(&self) -> Result<(&str, &str, &str)> {
        let refresh_token = present(&self.refresh_token);
        let client_id = present(&self.client_id);
        let client_secret = present(&self.client_secret);

        match (refresh_token, client_id, client_secret) {
            (Some(r), Some(i), Some(s)) => Ok((r, i, s)),
            _ => {
                let mut missing = Vec::new();
                if refresh_token.is_none() {
                    missing.push("SPOTIFY_REFRESH_TOKEN");
                }
                if client_id.is_none() {
                    missing.push("SPOTIFY_CLIENT_ID");
                }
                if client_secret.is_none() {
                    missing.push("SPOTIFY_CLIENT_SECRET");
                }
                Err(MusicError::Configuration { missing })
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Exchanges the configured refresh token for short-lived bearer tokens.
///
/// By default every call performs a fresh `grant_type=refresh_token` request
/// against the token endpoint. With [`TokenProvider::with_token_cache`] the
/// last token is reused until it is within four minutes of expiring.
pub struct TokenProvider {
    http: Client,
    token_url: String,
    credentials: Credentials,
    cached: Option<Mutex<Option<Token>>>,
}

impl TokenProvider {
    pub fn new(http: Client, token_url: impl Into<String>, credentials: Credentials) -> Self {
        TokenProvider {
            http,
            token_url: token_url.into(),
            credentials,
            cached: None,
        }
    }

    /// Builds a provider from the process environment.
    pub fn from_env(http: Client) -> Self {
        let provider = Self::new(
            http,
            config::spotify_apitoken_url(),
            config::spotify_credentials(),
        );
        if config::spotify_token_cache() {
            provider.with_token_cache()
        } else {
            provider
        }
    }

    pub fn with_token_cache(mut self) -> Self {
        self.cached = Some(Mutex::new(None));
        self
    }

    /// Returns a bearer token for the Web API.
    ///
    /// # Errors
    ///
    /// - [`MusicError::Configuration`] if any credential is missing; no
    ///   request is sent in that case
    /// - [`MusicError::UpstreamAuth`] if the token endpoint answers with a
    ///   non-2xx status, cannot be reached, or returns a body without an
    ///   `access_token`
    pub async fn access_token(&self) -> Result<String> {
        let (refresh_token, client_id, client_secret) = self.credentials.require()?;

        let Some(cache) = &self.cached else {
            return self
                .request_token(refresh_token, client_id, client_secret)
                .await
                .map(|t| t.access_token);
        };

        let mut slot = cache.lock().await;
        if let Some(token) = slot.as_ref() {
            if !is_expired(token) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self
            .request_token(refresh_token, client_id, client_secret)
            .await?;
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }

    async fn request_token(
        &self,
        refresh_token: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Token> {
        let res = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .map_err(|e| auth_error(e.to_string(), None))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| auth_error(e.to_string(), None))?;

        if !status.is_success() {
            return Err(auth_error(format!("token endpoint returned {}", status), Some(body)));
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| auth_error(format!("malformed token response: {}", e), Some(body.clone())))?;

        let Some(access_token) = json["access_token"].as_str().filter(|t| !t.is_empty()) else {
            return Err(auth_error(
                "token response has no access_token".to_string(),
                Some(body),
            ));
        };

        Ok(Token {
            access_token: access_token.to_string(),
            scope: json["scope"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_u64().unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now + EXPIRY_BUFFER_SECS >= token.obtained_at + token.expires_in
}

fn auth_error(message: String, detail: Option<String>) -> MusicError {
    warning!(
        "Error getting Spotify access token: {}",
        detail.as_deref().unwrap_or(&message)
    );
    MusicError::UpstreamAuth { message, detail }
}
