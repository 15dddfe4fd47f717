use crate::cli::args::OutputFormat;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::Args;
use horizon_core::marker::read_published;
use horizon_core::{HorizonConfig, SqliteStateStore};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// State store holding the restart marker (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn run(args: StatusArgs, config: &HorizonConfig) -> anyhow::Result<i32> {
    let store_path = args.store.unwrap_or_else(|| config.store_path.clone());

    let (marker, wait) = if store_path.exists() {
        let store = SqliteStateStore::open(&store_path)
            .with_context(|| format!("failed to open state store {}", store_path.display()))?;
        read_published(&store)?
    } else {
        (None, None)
    };

    if args.format == OutputFormat::Json {
        let doc = serde_json::json!({
            "restart_marker": marker,
            "wait_flag": wait,
            "fast_termination": config.fast_termination,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(EXIT_SUCCESS);
    }

    match marker {
        Some(m) => {
            let when = Utc
                .timestamp_opt(m.timestamp, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| m.timestamp.to_string());
            println!("Restart requested at {when} (unix {})", m.timestamp);
        }
        None => println!("No restart has been requested."),
    }
    match wait {
        Some(w) => println!("Wait for drain: {}", w.enabled),
        None => println!("Wait for drain: not set"),
    }

    Ok(EXIT_SUCCESS)
}
