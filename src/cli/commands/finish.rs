use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ledger::{FinishForm, Ledger, RollSelector};
use crate::store::journal::Journal;
use crate::ui::messages::{info, success, warning};
use crate::utils::time;

/// Close one open roll.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Finish {
        roll,
        pick,
        time: time_arg,
        operator,
        weight,
        tares,
        remarks,
    } = cmd
    {
        //
        // 1. Resolve the selector (clap guarantees exactly one)
        //
        let selection = if let Some(id) = roll {
            RollSelector::Id(id.clone())
        } else if let Some(row) = pick {
            RollSelector::Pick(*row)
        } else {
            return Err(AppError::MissingField("roll selection"));
        };

        //
        // 2. Parse end time (default: now)
        //
        let t = match time_arg {
            Some(s) => time::parse_required_time(s)?,
            None => time::now_to_minute(),
        };

        //
        // 3. Execute
        //
        let ledger = Ledger::from_config(cfg);
        let submission = ledger.finish_roll(FinishForm {
            selection,
            end_time: t,
            operator: operator.clone(),
            weight: *weight,
            tares: *tares,
            remarks: remarks.clone().unwrap_or_default(),
        })?;

        let closed = &submission.record;
        success(format!("Roll closed: {}", closed.label()));
        println!("   weight: {} kg, tares: {}", closed.weight, closed.tares);

        if !cfg.keep_closed_rolls {
            info("Closed rolls are not kept locally; this record lives on the mirror only.");
        }

        if let Some(warn) = submission.mirror.warning() {
            warning(warn);
        }

        //
        // 4. Journal (non-blocking)
        //
        let journal = Journal::new(cfg.journal_path());
        if let Err(e) = journal.record(
            "finish",
            &closed.id,
            &format!(
                "Closed roll on machine {} (mirror: {})",
                closed.machine,
                submission.mirror.as_str()
            ),
        ) {
            warning(format!("Failed to write journal entry: {e}"));
        }
    }

    Ok(())
}
