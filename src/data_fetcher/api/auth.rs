//! OAuth client-credentials flow against the regional Battle.net endpoint.

use crate::error::AppError;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error, info, instrument};

/// Bearer token for API calls. Valid until the API answers 401.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Requests a token with HTTP Basic credentials and
/// `grant_type=client_credentials`.
///
/// Anything other than a 200 carrying `access_token` is an
/// `AppError::AuthFailure`.
#[instrument(skip(client, client_id, client_secret))]
pub async fn authenticate(
    client: &Client,
    oauth_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, AppError> {
    info!("Requesting access token from {oauth_url}");

    let response = client
        .post(oauth_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| {
            error!("Token request to {} failed: {}", oauth_url, e);
            AppError::auth_failure(format!("token request failed: {e}"))
        })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        error!("Token endpoint answered HTTP {status} (URL: {oauth_url})");
        let code = status.as_u16();
        return Err(AppError::auth_failure(format!(
            "token endpoint returned HTTP {code}"
        )));
    }

    let body: TokenResponse = response.json().await.map_err(|e| {
        error!("Unreadable token response from {}: {}", oauth_url, e);
        AppError::auth_failure(format!("unreadable token response: {e}"))
    })?;

    match body.access_token {
        Some(token) if !token.is_empty() => {
            debug!("Access token received, expires in {:?}s", body.expires_in);
            Ok(AccessToken::new(token))
        }
        _ => Err(AppError::auth_failure("response has no access_token")),
    }
}
