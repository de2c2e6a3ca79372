use clap::Parser;
use std::path::PathBuf;

/// Query a JSON record file with the site search syntax.
#[derive(Parser)]
pub struct Cli {
    /// JSON file holding the record array to search.
    #[clap(long)]
    pub records: PathBuf,
    /// Session file for recent-search history; created on first use.
    #[clap(long)]
    pub session: Option<PathBuf>,
    /// The query, e.g. 'type:portfolio branding -draft'.
    pub query: String,
}
