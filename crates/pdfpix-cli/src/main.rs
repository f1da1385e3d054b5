//! CLI application: extract the images of a PDF and browse them.

mod viewer;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use pdfpix_core::config::{RunConfig, ViewerConfig};
use pdfpix_core::error::ConfigError;
use pdfpix_core::extract::Progress;
use pdfpix_core::startup::prepare_images;

const USAGE: &str = "Usage: pdfpix <path-to-pdf-file> [-b]";

/// Extract the images embedded in a PDF and show them in a viewer
#[derive(Parser)]
#[command(name = "pdfpix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PDF file to extract images from
    pdf: Option<PathBuf>,

    /// Reuse images already in the 'images' folder instead of extracting
    #[arg(short = 'b', long)]
    buffered: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = RunConfig::new(cli.pdf, cli.buffered).map_err(|e| match e {
        ConfigError::MissingPdf => anyhow!("{e}\n{USAGE}"),
        other => anyhow::Error::new(other),
    })?;

    if config.buffered {
        println!(
            "{} Using buffered images from '{}' folder",
            style("ℹ").blue(),
            config.image_dir.display()
        );
    }

    let pb = ProgressBar::hidden();
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")?
            .progress_chars("=>-"),
    );

    let prepared = prepare_images(&config, |event| match event {
        Progress::Started { pages } => {
            pb.set_length(u64::from(pages));
            pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        }
        Progress::PageDone { page, images } => {
            pb.set_message(format!("(page {page}: {images} images)"));
            pb.inc(1);
        }
    });
    pb.finish_and_clear();
    let prepared = prepared?;

    if let Some(summary) = &prepared.extraction {
        println!(
            "{} Extracted {} images from {} pages",
            style("✓").green(),
            summary.files.len(),
            summary.pages
        );
    }
    debug!("Viewer will show {} images", prepared.images.len());

    viewer::run(prepared.images, ViewerConfig::default())
        .map_err(|e| anyhow!("viewer failed: {e}"))
}
