//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sentimind: terminal client for a classified social feed
#[derive(Parser, Debug)]
#[command(name = "sentimind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the feed, optionally filtered by category
    Feed(FeedArgs),

    /// Publish a post and show the refreshed feed
    Post(PostArgs),

    /// List categories known to the service
    Categories(CategoriesArgs),

    /// Interactive feed with filter bar and composer
    Tui(TuiArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and service connectivity
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Only show posts of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Text to publish
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File containing the text to publish (use - for stdin)
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// File receiving logs while the terminal UI is active
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
