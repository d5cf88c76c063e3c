//! Review list - Entry Point

use clap::Parser;
use reviewlist::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ResolvedConfig,
};
use reviewlist::images::{DirectoryImageFetcher, ImageLoader, DEFAULT_IMAGE_WORKERS};
use reviewlist::model::{AppError, SourceError};
use reviewlist::source::{FileReviewSource, ThreadedDispatcher};
use reviewlist::state::{PaginationController, RowFactory};
use reviewlist::text::CellMeasurer;
use reviewlist::view::{self, AppChannels, Palette, ReviewsApp};
use reviewlist::view_state::{RowLayoutEngine, RowMetrics};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use tracing::info;

/// Review list - browse a paginated review feed in the terminal
#[derive(Parser, Debug)]
#[command(name = "reviewlist")]
#[command(version)]
#[command(about = "Paginated review list with variable-height rows")]
pub struct Args {
    /// Path to the review fixture JSON (`{"items": [...], "count": N}`)
    pub file: Option<PathBuf>,

    /// Reviews per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Directory avatar and photo paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    /// Simulated page fetch latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            page_size: self.page_size.and_then(|n| usize::try_from(n).ok()),
            data_file: self.file.clone(),
            image_dir: self.images.clone(),
            latency_ms: self.latency_ms,
        }
    }
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged)?;
    let config = apply_cli_overrides(with_env, args.overrides());
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = reviewlist::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let data_file = config.data_file.clone().ok_or(SourceError::NoInput)?;
    let source =
        FileReviewSource::open(&data_file)?.with_latency(Duration::from_millis(config.latency_ms));

    let (page_tx, page_rx) = mpsc::channel();
    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let (image_tx, image_rx) = mpsc::channel();

    let metrics = RowMetrics::cells();
    let factory = RowFactory::new(&metrics, config.max_lines());
    let engine = RowLayoutEngine::new(
        CellMeasurer,
        metrics,
        factory.styles().show_more_label(),
        config.layout_cache_capacity,
    );
    let controller = PaginationController::new(
        ThreadedDispatcher::new(source, page_tx),
        factory,
        config.page_size,
        snapshot_tx,
    );

    let terminal = view::setup_terminal()?;
    let mut app = ReviewsApp::new(
        terminal,
        controller,
        engine,
        AppChannels {
            snapshots: snapshot_rx,
            pages: page_rx,
            images: image_rx,
        },
    )
    .with_palette(Palette::from_env_and_args(args.no_color))
    .with_prefetch_screens(config.prefetch_screens);

    if let Some(dir) = &config.image_dir {
        let fetcher = DirectoryImageFetcher::new(dir);
        app = app.with_images(ImageLoader::new(fetcher, DEFAULT_IMAGE_WORKERS, image_tx));
    }

    // Run the app and always restore the terminal, even on error
    let result = app.run();
    view::restore_terminal()?;
    result?;

    info!("Exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["reviewlist", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["reviewlist", "--version"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["reviewlist"]);
        assert_eq!(args.file, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.images, None);
        assert_eq!(args.latency_ms, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_data_file() {
        let args = Args::parse_from(["reviewlist", "fixtures/reviews.json"]);
        assert_eq!(
            args.overrides().data_file,
            Some(PathBuf::from("fixtures/reviews.json"))
        );
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "reviewlist",
            "reviews.json",
            "--page-size",
            "7",
            "--images",
            "/tmp/img",
            "--latency-ms",
            "300",
            "--no-color",
            "--config",
            "/tmp/cfg.toml",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.page_size, Some(7));
        assert_eq!(overrides.image_dir, Some(PathBuf::from("/tmp/img")));
        assert_eq!(overrides.latency_ms, Some(300));
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/cfg.toml")));
    }

    #[test]
    fn test_page_size_zero_rejected() {
        let result = Args::try_parse_from(["reviewlist", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_size_not_a_number_rejected() {
        let result = Args::try_parse_from(["reviewlist", "--page-size", "lots"]);
        assert!(result.is_err());
    }
}
