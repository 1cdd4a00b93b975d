use crate::ExportKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "MUSIC_BOX_TOOL",
    about = "Turn a Note Block Studio song into Music Box note grids or book pages!"
)]
pub struct Args {
    /// Path to the target .nbs file (saved by Note Block Studio 3.x or newer).
    pub nbs: PathBuf,

    /// What to produce. Supports command|command-1.20|pages|info|json.
    #[arg(short, long, default_value = "command")]
    pub export: String,

    /// Also drop notes whose own velocity is 0.
    #[arg(short, long, default_value_t = false)]
    pub skip_silent: bool,

    /// Dry run (print first dry_run_max decoded notes and exit).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum notes to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Prints extra information to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the binary can print for a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Export(ExportKind),
    /// Header summary only.
    Info,
    /// The decoded song and its grouped notes as JSON.
    Json,
}
