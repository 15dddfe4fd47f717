use crate::cli::args::OutputFormat;
use crate::exit_codes::{EXIT_NOTHING_TO_TERMINATE, EXIT_REGISTRY_UNREADABLE, EXIT_SUCCESS};
use anyhow::Context;
use clap::Args;
use horizon_core::registry::{local_master_prefix, FileRegistry};
use horizon_core::{
    HorizonConfig, ReportLine, SqliteStateStore, TermSignalSender, TerminateError,
    TerminateOutcome, TerminateRequest, TerminationReport, Terminator,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TerminateArgs {
    /// Fail if there are no processes to terminate
    #[arg(long)]
    pub fail: bool,

    /// Wait for all workers to terminate (published in fast-termination mode)
    #[arg(long)]
    pub wait: bool,

    /// Master name prefix (default: config `prefix`, then the slugged host name)
    #[arg(long, env = "HORIZON_PREFIX")]
    pub prefix: Option<String>,

    /// Registry snapshot of known master supervisors (overrides config)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// State store holding the restart marker (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn run(args: TerminateArgs, config: &HorizonConfig) -> anyhow::Result<i32> {
    let store_path = args.store.unwrap_or_else(|| config.store_path.clone());
    let registry_path = args
        .registry
        .unwrap_or_else(|| config.registry_path.clone());
    let prefix = args
        .prefix
        .or_else(|| config.prefix.clone())
        .unwrap_or_else(local_master_prefix);
    // An empty prefix would match every master in the registry.
    anyhow::ensure!(
        !prefix.is_empty(),
        "master prefix is empty (host name has no usable characters); pass --prefix"
    );
    tracing::debug!(
        %prefix,
        store = %store_path.display(),
        registry = %registry_path.display(),
        fast_termination = config.fast_termination,
        "terminate settings resolved"
    );

    // Without a store the restart can never be announced, so nothing gets
    // signalled either.
    super::ensure_parent_dir(&store_path).context("restart marker cannot be published")?;
    let store =
        SqliteStateStore::open(&store_path).context("restart marker cannot be published")?;

    let registry = FileRegistry::new(registry_path);
    let sender = TermSignalSender::new();
    let terminator = Terminator::new(&registry, &sender, &store, prefix, config.fast_termination);

    let request = TerminateRequest {
        fail_on_empty: args.fail,
        wait_for_drain: args.wait,
    };

    match terminator.run(request) {
        Ok(outcome) => {
            render(&outcome, args.format)?;
            Ok(if outcome.is_failure() {
                EXIT_NOTHING_TO_TERMINATE
            } else {
                EXIT_SUCCESS
            })
        }
        Err(TerminateError::Registry(e)) => {
            eprintln!("✗ {e}");
            eprintln!("  restart marker was published; masters were not signalled");
            Ok(EXIT_REGISTRY_UNREADABLE)
        }
        Err(e @ TerminateError::Store { .. }) => {
            // Signals may already be out; show them before failing.
            if let Some(report) = e.report() {
                render_report(report, args.format)?;
            }
            Err(e.into())
        }
    }
}

fn render(outcome: &TerminateOutcome, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    render_report(&outcome.report, format)
}

fn render_report(report: &TerminationReport, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in report.lines() {
        match line {
            ReportLine::Info { message } => println!("{message}"),
            ReportLine::Task { label, done: true } => println!("  ✓ {label}"),
            ReportLine::Task { label, done: false } => println!("  ✗ {label}"),
            ReportLine::Error { message } => eprintln!("✗ {message}"),
        }
    }
    if !report.outcomes.is_empty() {
        println!();
    }

    Ok(())
}
