use crate::cli::Args;
use crate::logging::setup_logging;
use keystone_archive::archive_characters;
use keystone_archive::config::{Config, paths};
use keystone_archive::error::AppError;
use tracing::info;

/// Runs one archive pass.
///
/// - Loads and validates the config, applying CLI overrides
/// - With `--list-config`, prints the effective settings and returns
/// - Sets up logging, then archives every configured character
pub async fn run(args: Args) -> Result<(), AppError> {
    let config_path = args.config.clone().unwrap_or_else(paths::get_config_path);
    let mut config = Config::load(Some(&config_path)).await?;

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
        config.validate()?;
    }

    if args.list_config {
        config.display(&config_path);
        return Ok(());
    }

    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!(
        "{} {} starting, logging to {}",
        keystone_archive::NAME,
        keystone_archive::VERSION,
        log_file_path
    );
    info!(
        "Archiving {} characters into {}",
        config.characters.len(),
        config.data_dir
    );

    let summary = archive_characters(&config).await?;
    if summary.characters_skipped > 0 {
        info!(
            "{} of {} characters could not be fetched",
            summary.characters_skipped,
            config.characters.len()
        );
    }
    Ok(())
}
