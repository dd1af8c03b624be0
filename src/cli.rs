//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "view-my-startup")]
#[command(about = "Pick startups, compare them and check their rank", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/view-my-startup/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and VMS_BASE_URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Also write logs to <data dir>/view-my-startup/logs
    #[arg(long)]
    pub log_file: bool,
}
