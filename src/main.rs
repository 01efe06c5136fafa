#![allow(unused_doc_comments)]

pub mod annotator;
pub mod appconfig;
pub mod logging;
pub mod options;
pub mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};

use annotator::Annotator;
use appconfig::AppSettings;
use options::Options;

fn main() -> Result<()> {
    let opts = Options::parse();

    let _guard = logging::init_logs(opts.log_dir.as_deref())?;

    if let Err(e) = run(&opts) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

fn run(opts: &Options) -> Result<()> {
    let mut settings = AppSettings::read_or_default(&opts.config)?;
    opts.apply(&mut settings);
    debug!("settings: {:?}", settings);

    let image = image::open(&opts.image)
        .with_context(|| format!("Failed to open image {}", opts.image.display()))?;

    if opts.labels.is_empty() {
        warn!("no labels given, nothing to annotate");
    }

    let mut annotator = Annotator::new(settings);
    annotator.start_session(&image, opts.labels.iter().cloned())?;

    let annotations = annotator.get_annotations();

    let missing: Vec<&str> = opts
        .labels
        .iter()
        .map(String::as_str)
        .filter(|l| annotations.get(l).is_none())
        .collect();
    if !missing.is_empty() {
        warn!("window closed before placing: {}", missing.join(", "));
    }

    info!("{} labels annotated", annotations.len());
    for (label, coord) in &annotations {
        println!("{}: ({}, {})", label, coord.x, coord.y);
    }

    Ok(())
}
