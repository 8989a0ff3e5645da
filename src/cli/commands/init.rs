use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::journal::Journal;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the data directory holding the ledger tables
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rollbook…");

    let cfg = if let Some(custom) = &cli.data_dir {
        Config::init_all(Some(custom.clone()), cli.test)?
    } else {
        Config::init_all(None, cli.test)?
    };

    // Journal entry (non-blocking)
    let journal = Journal::new(cfg.journal_path());
    if let Err(e) = journal.record("init", &cfg.data_dir, "Data directory initialized") {
        warning(format!("Failed to write journal entry: {e}"));
    }

    println!("🎉 rollbook initialization completed!");
    Ok(())
}
