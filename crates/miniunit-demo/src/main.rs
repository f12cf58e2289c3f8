use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use miniunit::{Registry, Runner, SuiteReport};
use std::io;
use std::panic;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cases;
mod config;
mod report;

use config::Config;
use report::MarkdownRenderer;

/// Run the miniunit demo suite.
///
/// Every case is declared at module scope and registers itself; this
/// program only decides what to skip and how to print the results.
///
/// EXAMPLES:
///     miniunit-demo                           Run with both report layouts
///     miniunit-demo --format table            Default table only
///     miniunit-demo --skip TEST4=crashes      Skip another case
///     miniunit-demo --list                    List registered cases
///
/// ENVIRONMENT VARIABLES:
///     MINIUNIT_FORMAT     Default report layout (table, markdown, both)
///     MINIUNIT_NO_COLOR   Set to disable colored output
///     NO_COLOR            Set to disable colored output
///     MINIUNIT_LOG        Log filter for stderr (default: warn)
#[derive(Parser, Debug)]
#[command(name = "miniunit-demo")]
#[command(version)]
struct Cli {
    /// Report layout
    #[arg(long, short = 'f', value_enum, env = "MINIUNIT_FORMAT", default_value_t = Format::Both)]
    format: Format,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
    /// Skip a case before the run, as NAME=REASON (repeatable)
    #[arg(long, short = 's', value_name = "NAME=REASON", value_parser = parse_skip)]
    skip: Vec<(String, String)>,
    /// List registered cases and exit
    #[arg(long, short = 'l')]
    list: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned `[name] description : RESULT` rows
    Table,
    /// Markdown pipe table
    Markdown,
    /// Both layouts, one after the other
    Both,
}

impl Format {
    fn table(self) -> bool {
        matches!(self, Format::Table | Format::Both)
    }

    fn markdown(self) -> bool {
        matches!(self, Format::Markdown | Format::Both)
    }
}

fn parse_skip(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, reason)) if !name.is_empty() && !reason.is_empty() => {
            Ok((name.to_string(), reason.to_string()))
        }
        _ => Err(format!("expected NAME=REASON, got '{}'", arg)),
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Route panic messages from case bodies to the log instead of stderr.
fn quiet_panics() {
    panic::set_hook(Box::new(|info| {
        tracing::debug!("{}", info);
    }));
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config);
    quiet_panics();

    if cli.list {
        for case in miniunit::all() {
            println!("{}\t{}", case.name(), case.description());
        }
        return Ok(ExitCode::SUCCESS);
    }

    miniunit::skip!(TEST1, "testing skip")?;
    for (name, reason) in &cli.skip {
        miniunit::skip(name, reason).with_context(|| format!("cannot skip '{}'", name))?;
    }

    // Command-line flag overrides environment variable
    let color = !(cli.no_color || config.no_color);
    let mut overall = SuiteReport::default();

    if cli.format.table() {
        println!("Default test run function:");
        let report = Runner::new().with_color(color).run()?;
        overall.cases.extend(report.cases);
        println!();
    }

    if cli.format.markdown() {
        println!("Custom test run function:");
        let report =
            Runner::new().run_with(Registry::global(), &mut MarkdownRenderer, &mut io::stdout())?;
        overall.cases.extend(report.cases);
        println!();
    }

    tracing::debug!(passed = overall.verdict(), "demo finished");
    println!("Overall result: {}", miniunit::verdict_label(&overall));
    Ok(overall.exit_code())
}
