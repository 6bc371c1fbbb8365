//! CLI argument parsing for prompttemplate

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(author, version, about = "Render prompt templates with icon and color helpers", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Use unicode icons
    #[arg(long)]
    pub fancy: bool,

    /// Strip color codes from output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template and print the result
    Render {
        /// Template source
        #[arg(required = true)]
        template: String,

        /// Inline JSON data
        #[arg(short, long, conflicts_with = "data_file")]
        data: Option<String>,

        /// JSON or YAML file with the data
        #[arg(short = 'f', long)]
        data_file: Option<PathBuf>,
    },

    /// Compile templates and report errors
    Check {
        /// Template sources
        #[arg(required = true)]
        templates: Vec<String>,
    },

    /// List the icon helpers
    Icons,
}
