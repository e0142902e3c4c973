//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::options::DisplayOptions;

/// Show NumPy .npy files as a grid of jet-colored images.
#[derive(Parser, Debug)]
#[command(name = "npyplot", version, about, long_about = None)]
pub struct Args {
    /// One or more .npy files
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Do not print the index above each image
    #[arg(long)]
    pub no_index: bool,

    /// Print min and max above each image
    #[arg(long)]
    pub limits: bool,

    /// Print average, median and shape above each image
    #[arg(long)]
    pub stats: bool,

    /// Sort the paths before loading
    #[arg(long)]
    pub sort: bool,

    /// Added to every displayed index
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_name = "N")]
    pub offset: i64,

    /// Use each file name as its title
    #[arg(long)]
    pub default_titles: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_limits: self.limits,
            show_stats: self.stats,
            enable_index: !self.no_index,
            index_offset: self.offset,
            sort_inputs: self.sort,
            use_filename_as_title: self.default_titles,
            image_names: None,
        }
    }
}
