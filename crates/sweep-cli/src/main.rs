#![forbid(unsafe_code)]

mod output;

use clap::Parser;
use output::{CliError, OutputMode, render, render_error};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use sweep_core::{Compaction, MalformedPolicy, compact};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Wrong argument count or otherwise unusable invocation.
const EXIT_USAGE: u8 = 1;
/// Input file missing, unreadable, or (strict mode) malformed.
const EXIT_READ: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "swp: retention-window record compactor",
    long_about = "Compact an ordered record stream, keeping at most the two most recent\n\
                  records per identity. A third occurrence tombstones its two\n\
                  predecessors and starts a fresh retention window.",
    after_help = "EXAMPLES:\n    # Compact a data file\n    swp sessions.dat\n\n    # Machine-readable output\n    swp sessions.dat --json\n\n    # Accept short lines, padding missing fields\n    swp sessions.dat --lenient"
)]
struct Cli {
    /// Input data file, one `<identity> <address> <port>` record per line.
    file: PathBuf,

    /// Treat missing tokens as empty strings instead of failing the pass.
    #[arg(long)]
    lenient: bool,

    /// Print the compaction report to stderr after the records.
    #[arg(long)]
    stats: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    const fn policy(&self) -> MalformedPolicy {
        if self.lenient {
            MalformedPolicy::Lenient
        } else {
            MalformedPolicy::Strict
        }
    }
}

/// Initialize tracing to stderr, honoring `SWEEP_LOG` over the flag defaults.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env("SWEEP_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; they are not usage errors.
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    init_tracing(cli.verbose, cli.quiet);
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let mode = cli.output_mode();

    let text = match fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(err) => {
            let _ = render_error(
                mode,
                &CliError::with_details(
                    format!("error reading data from {}: {err}", cli.file.display()),
                    "check that the path exists and is readable",
                    "unreadable_input",
                ),
            );
            return EXIT_READ;
        }
    };

    let compaction = match compact(text.lines(), cli.policy()) {
        Ok(compaction) => compaction,
        Err(err) => {
            let _ = render_error(
                mode,
                &CliError::with_details(
                    err.to_string(),
                    "fix the input line, or rerun with --lenient to pad missing fields",
                    "malformed_record",
                ),
            );
            return EXIT_READ;
        }
    };

    info!(
        lines = compaction.report.lines_read,
        identities = compaction.report.identities_seen,
        triggers = compaction.report.triggers_fired,
        "compaction complete"
    );

    if let Err(err) = render(mode, &compaction, render_human) {
        debug!("failed writing output: {err}");
        return EXIT_READ;
    }

    // JSON output already embeds the report; stderr keeps stdout index-clean.
    if cli.stats && !mode.is_json() && !cli.quiet {
        let report = &compaction.report;
        eprintln!(
            "lines: {}  identities: {}  triggers: {}  tombstoned: {}",
            report.lines_read,
            report.identities_seen,
            report.triggers_fired,
            report.records_tombstoned
        );
    }

    0
}

/// Write `<index>: <line-or-empty>` for every record slot.
fn render_human(compaction: &Compaction, w: &mut dyn Write) -> std::io::Result<()> {
    for (i, record) in compaction.records.iter().enumerate() {
        writeln!(w, "{i}: {}", record.as_line().unwrap_or(""))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_selects_json_mode() {
        let cli = Cli::try_parse_from(["swp", "data.txt", "--json"]).expect("valid args");
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn lenient_flag_selects_policy() {
        let strict = Cli::try_parse_from(["swp", "data.txt"]).expect("valid args");
        assert_eq!(strict.policy(), MalformedPolicy::Strict);

        let lenient = Cli::try_parse_from(["swp", "data.txt", "--lenient"]).expect("valid args");
        assert_eq!(lenient.policy(), MalformedPolicy::Lenient);
    }

    #[test]
    fn missing_file_argument_is_a_usage_error() {
        let err = Cli::try_parse_from(["swp"]).expect_err("missing positional");
        assert!(err.use_stderr());
    }

    #[test]
    fn render_human_blanks_tombstones() {
        let compaction = compact(
            ["bob 1.1.1.1 10", "bob 2.2.2.2 20", "bob 3.3.3.3 30"],
            MalformedPolicy::Strict,
        )
        .expect("well-formed");

        let mut buf = Vec::new();
        render_human(&compaction, &mut buf).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "0: \n1: \n2: bob 3.3.3.3 30\n");
    }
}
