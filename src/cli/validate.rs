use std::fs::File;
use std::io::BufReader;

use crate::cli::commands::ValidateArgs;
use crate::errors::ParserError;
use crate::pipeline::ParseRun;
use crate::sink::NullSink;

pub fn handle_validate(args: ValidateArgs, quiet: bool) -> Result<(), ParserError> {
    let input = BufReader::new(File::open(&args.input)?);
    let mut sink = NullSink::new();

    let mut run = ParseRun::new();
    let report = run.execute(input, &mut sink)?;

    if !quiet {
        println!(
            "{}: {} findings, {} vulnerabilities, {} skipped, {} merged",
            args.input,
            report.findings_seen,
            report.delivered(),
            report.skipped,
            report.merged
        );
    }
    Ok(())
}
