use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::commands::ConvertArgs;
use crate::errors::ParserError;
use crate::pipeline::ParseRun;
use crate::reporting::format_summary;
use crate::sink::{JsonSink, VulnerabilitySink};

pub fn handle_convert(args: ConvertArgs, quiet: bool) -> Result<(), ParserError> {
    let input = BufReader::new(File::open(&args.input)?);
    let output = BufWriter::new(File::create(&args.output)?);
    let mut sink = JsonSink::new(output, args.pretty);

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Converting {}", args.input));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let mut run = ParseRun::new();
    let result = run.execute(input, &mut sink);
    spinner.finish_and_clear();
    let report = result?;

    sink.set_scan_info(report.scan.clone());
    let summary = format_summary(sink.vulnerabilities(), &report);
    sink.finish()?;

    info!(output = %args.output, "Normalized report written");
    if !quiet {
        print!("{summary}");
    }
    Ok(())
}
