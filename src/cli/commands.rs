use clap::{Args, Parser, Subcommand};

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "tenable-cs-parser",
    version,
    long_version = LONG_VERSION,
    about = "Normalizes Tenable.io Container Security scan reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a scan report into normalized vulnerability records
    Convert(ConvertArgs),
    /// Check that a scan report decodes cleanly
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ConvertArgs {
    /// Path to the Tenable.io CS scan report (JSON)
    #[arg(short, long)]
    pub input: String,

    /// Path for the normalized output document
    #[arg(short, long)]
    pub output: String,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Path to the Tenable.io CS scan report (JSON)
    #[arg(short, long)]
    pub input: String,
}
