use std::path::PathBuf;

use clap::Parser;

use crate::appconfig::AppSettings;

/// Click through a list of labels on an image and print where each one landed.
#[derive(Parser, Debug, Clone)]
#[command(name = "point_annotator", version, about)]
pub struct Options {
    /// Image to annotate
    pub image: PathBuf,

    /// Labels to place, in order (repeat or separate with commas)
    #[arg(short, long = "label", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Settings file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Close the window once every label is placed
    #[arg(long)]
    pub close_on_complete: bool,

    /// Also write JSON logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Options {
    /// Command-line flags win over the settings file.
    pub fn apply(&self, settings: &mut AppSettings) {
        if self.close_on_complete {
            settings.close_on_complete = true;
        }
    }
}
