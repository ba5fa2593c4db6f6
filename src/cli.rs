use clap::Parser;
use std::path::PathBuf;

use crate::selector::SelectorPresets;

#[derive(Parser, Debug, Clone)]
#[command(name = "friends-renamer")]
#[command(version = "0.1.0")]
#[command(about = "Rename ripped Friends disc titles to episode filenames", long_about = None)]
pub struct Args {
    /// Folder holding the ripped .mkv files (prompted for if omitted)
    #[arg(short, long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Season number, e.g. 2 (prompted for if omitted)
    #[arg(short, long, value_name = "N")]
    pub season: Option<String>,

    /// Disc number, e.g. 2 (prompted for if omitted)
    #[arg(short, long, value_name = "N")]
    pub disc: Option<String>,

    /// Mapping file to read instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Config file to load instead of searching the default locations
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delete .mkv files in the folder that weren't renamed
    #[arg(long, default_value = "false")]
    pub cleanup: bool,

    /// Fail on malformed mapping lines instead of skipping them
    #[arg(long, default_value = "false")]
    pub strict: bool,

    /// Disable tab completion on the folder prompt
    #[arg(long, default_value = "false")]
    pub no_completion: bool,
}

impl Args {
    pub fn presets(&self) -> SelectorPresets {
        SelectorPresets {
            folder: self.folder.clone(),
            season: self.season.clone(),
            disc: self.disc.clone(),
        }
    }
}
