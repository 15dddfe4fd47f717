use super::args::*;

pub mod status;
pub mod terminate;

use crate::exit_codes::EXIT_SUCCESS;
use horizon_core::HorizonConfig;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let load_config = || HorizonConfig::load(cli.config.as_deref());

    match cli.cmd {
        Command::Terminate(args) => terminate::run(args, &load_config()?).await,
        Command::Status(args) => status::run(args, &load_config()?).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Make sure the store's parent directory exists before SQLite opens it.
pub(crate) fn ensure_parent_dir(path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create state directory {}", parent.display()))?;
    }
    Ok(())
}
