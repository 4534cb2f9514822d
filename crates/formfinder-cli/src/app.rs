//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formfinder")]
#[command(
    author,
    version,
    about = "Find the IRS tax form for your question"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Config file (defaults to $FORMFINDER_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question
    Ask(AskArgs),

    /// Show mode and corpus status
    Status,

    /// List all forms
    Forms,

    /// Show one form and its extracted sections
    Form(FormArgs),

    /// Check whether a restart could switch modes
    SwitchMode,

    /// Start MCP server
    Mcp,
}

#[derive(Args)]
pub struct AskArgs {
    /// Question
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Number of results (default: 3 simple, 5 enhanced)
    #[arg(short = 'n', long = "top-k")]
    pub top_k: Option<usize>,

    /// List matching forms without composing an answer
    #[arg(long)]
    pub no_generate: bool,
}

#[derive(Args)]
pub struct FormArgs {
    /// Form number, e.g. 1040 or W-2
    pub number: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
    Md,
}
