use super::auth::{self, AccessToken};
use super::fetch_utils::{fetch_bytes, fetch_json};
use super::http_client::create_http_client_with_timeout;
use super::rate_limiter::RateLimiter;
use super::urls::{Namespace, build_api_url};
use crate::config::{Config, Region};
use crate::error::AppError;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Regional Battle.net API client. Every request, the token POST included,
/// goes through one shared rate limiter.
#[derive(Debug)]
pub struct BattleNetClient {
    http: Client,
    region: Region,
    api_base_url: String,
    oauth_url: String,
    limiter: RateLimiter,
}

impl BattleNetClient {
    pub fn new(
        http: Client,
        region: Region,
        api_base_url: impl Into<String>,
        oauth_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            region,
            api_base_url: api_base_url.into(),
            oauth_url: oauth_url.into(),
            limiter: RateLimiter::battle_net(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(
            http,
            config.region,
            config.api_base_url(),
            config.oauth_url(),
        ))
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn url_for(&self, path_or_url: &str, namespace: Option<Namespace>) -> String {
        build_api_url(
            &self.api_base_url,
            self.region.as_str(),
            path_or_url,
            namespace,
        )
    }

    pub async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, AppError> {
        self.limiter.acquire().await;
        auth::authenticate(&self.http, &self.oauth_url, client_id, client_secret).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path_or_url: &str,
        token: &AccessToken,
        namespace: Option<Namespace>,
    ) -> Result<T, AppError> {
        let url = self.url_for(path_or_url, namespace);
        self.limiter.acquire().await;
        fetch_json(&self.http, &url, token).await
    }

    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.limiter.acquire().await;
        fetch_bytes(&self.http, url).await
    }
}
