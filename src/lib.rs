//! Mythic keystone archive library
//!
//! Fetches World of Warcraft mythic keystone progress (equipment, season
//! ratings, best runs and realm leaderboards) from the Battle.net API and
//! stores it as YAML files.
//!
//! # Examples
//!
//! ```rust,no_run
//! use keystone_archive::{AppError, Config, archive_characters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     let summary = archive_characters(&config).await?;
//!     println!("{} runs written", summary.runs_written);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{CharacterConfig, Config, Region};
pub use data_fetcher::{ArchiveSummary, archive_characters};
pub use error::AppError;
pub use storage::Storage;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
