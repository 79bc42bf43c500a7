use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenable_cs_parser::cli::{self, Cli, Commands};
use tenable_cs_parser::errors::ParserError;

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        Commands::Convert(args) => cli::convert::handle_convert(args, cli.quiet),
        Commands::Validate(args) => cli::validate::handle_validate(args, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            ParserError::Decode(_) | ParserError::Json(_) => 2,
            ParserError::Io(_) => 3,
            ParserError::Sink(_) => 1,
        };
        std::process::exit(exit_code);
    }
}
