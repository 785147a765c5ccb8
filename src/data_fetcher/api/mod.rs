pub mod auth;
pub mod client;
pub mod fetch_utils;
pub mod http_client;
pub mod orchestrator;
pub mod rate_limiter;
pub mod urls;
pub mod wow_api;

pub use auth::{AccessToken, authenticate};
pub use client::BattleNetClient;
pub use http_client::create_http_client_with_timeout;
pub use orchestrator::{ArchiveSummary, Session, archive_characters};
pub use rate_limiter::RateLimiter;
pub use urls::*;
pub use wow_api::*;
