use std::num::NonZeroUsize;

use clap::Parser;

/// treepick – fuzzy-filter a file listing as an interactive tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command used to produce the path list (one path per line,
    /// directories marked with a trailing slash)
    #[arg(short = 'c', long = "cmd", value_name = "CMD", default_value = "fd")]
    pub cmd: String,

    /// Directories with more than N children start collapsed
    #[arg(short = 'n', long = "collapse", value_name = "N", default_value_t = 10)]
    pub collapse: usize,

    /// Capacity of the per-query match cache
    #[arg(long, value_name = "N", default_value = "64")]
    pub cache_capacity: NonZeroUsize,

    /// Match case-sensitively (default is case-insensitive)
    #[arg(short = 's', long)]
    pub case_sensitive: bool,

    /// Maximum number of tree rows drawn at once
    #[arg(short = 'l', long = "height", value_name = "N", default_value = "20")]
    pub height: NonZeroUsize,
}
