//! Single-shot HTTP fetching with status classification and parse-error
//! diagnostics. Retrying is left to the caller.

use super::auth::AccessToken;
use crate::error::AppError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

/// GETs `url` and parses the body as `T`.
///
/// - 200: the parsed body
/// - 401: `AppError::AuthExpired`, so the caller can re-authenticate
/// - other statuses: the matching `AppError::Api*` variant
/// - timeouts and connect failures: `NetworkTimeout` / `NetworkConnection`
#[instrument(skip(client, token))]
pub(super) async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &AccessToken,
) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = send(client.get(url).bearer_auth(token.as_str()), url).await?;
    let response = check_status(response, url)?;

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    parse_body(&response_text, url)
}

/// Downloads raw bytes without credentials, for media assets.
#[instrument(skip(client))]
pub(super) async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, AppError> {
    info!("Downloading {url}");

    let response = send(client.get(url), url).await?;
    let response = check_status(response, url)?;

    let body = response.bytes().await.map_err(|e| {
        error!("Failed to read response body from URL {}: {}", url, e);
        AppError::ApiFetch(e)
    })?;

    if body.is_empty() {
        return Err(AppError::api_no_data("Response body is empty", url));
    }
    Ok(body.to_vec())
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, AppError> {
    request.send().await.map_err(|e| {
        error!("Request failed for URL {}: {}", url, e);
        if e.is_timeout() {
            AppError::network_timeout(url)
        } else if e.is_connect() {
            AppError::network_connection(url, e.to_string())
        } else {
            AppError::ApiFetch(e)
        }
    })
}

fn check_status(response: Response, url: &str) -> Result<Response, AppError> {
    let status = response.status();
    debug!("Response status: {status}");

    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");

    if status_code == 401 {
        warn!("HTTP 401 - access token rejected (URL: {})", url);
        return Err(AppError::auth_expired(url));
    }

    error!("HTTP {} - {} (URL: {})", status_code, reason, url);

    Err(match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    })
}

fn parse_body<T: DeserializeOwned>(response_text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
