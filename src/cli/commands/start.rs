use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ledger::{Ledger, StartForm};
use crate::models::Shift;
use crate::store::journal::Journal;
use crate::ui::messages::{success, warning};
use crate::utils::{date, time};

/// Open a new roll on a machine.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start {
        date: date_arg,
        shift,
        machine,
        raw_lot,
        order_lot,
        operator,
        time: time_arg,
        remarks,
    } = cmd
    {
        //
        // 1. Parse date (default: today)
        //
        let d = match date_arg {
            Some(s) => date::parse_required_date(s)?,
            None => date::today(),
        };

        //
        // 2. Parse shift
        //
        let sh = Shift::from_input(shift).ok_or_else(|| AppError::InvalidShift(shift.clone()))?;

        //
        // 3. Parse start time (default: now)
        //
        let t = match time_arg {
            Some(s) => time::parse_required_time(s)?,
            None => time::now_to_minute(),
        };

        //
        // 4. Execute
        //
        let ledger = Ledger::from_config(cfg);
        let submission = ledger.start_roll(StartForm {
            date: d,
            shift: sh,
            machine: *machine,
            raw_lot: raw_lot.clone(),
            order_lot: order_lot.clone(),
            operator: operator.clone(),
            start_time: t,
            remarks: remarks.clone().unwrap_or_default(),
        })?;

        let roll = &submission.record;
        success(format!("Roll opened: {}", roll.label()));
        println!("   id: {}", roll.id);

        if let Some(warn) = submission.mirror.warning() {
            warning(warn);
        }

        //
        // 5. Journal (non-blocking)
        //
        let journal = Journal::new(cfg.journal_path());
        if let Err(e) = journal.record(
            "start",
            &roll.id,
            &format!(
                "Opened roll on machine {} (mirror: {})",
                roll.machine,
                submission.mirror.as_str()
            ),
        ) {
            warning(format!("Failed to write journal entry: {e}"));
        }
    }

    Ok(())
}
