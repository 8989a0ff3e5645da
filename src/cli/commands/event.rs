use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ledger::{EventForm, Ledger};
use crate::models::EventKind;
use crate::store::journal::Journal;
use crate::ui::messages::{success, warning};
use crate::utils::{date, time};

/// Record a line event (stoppage, breakage, cleaning, ...).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Event {
        kind,
        date: date_arg,
        machine,
        start,
        end,
        operator,
        description,
        stop_meter,
    } = cmd
    {
        //
        // 1. Parse kind
        //
        let k =
            EventKind::from_input(kind).ok_or_else(|| AppError::InvalidEventKind(kind.clone()))?;

        //
        // 2. Parse date (default: today)
        //
        let d = match date_arg {
            Some(s) => date::parse_required_date(s)?,
            None => date::today(),
        };

        //
        // 3. Parse times (default: now)
        //
        let start_t = match start {
            Some(s) => time::parse_required_time(s)?,
            None => time::now_to_minute(),
        };
        let end_t = match end {
            Some(s) => time::parse_required_time(s)?,
            None => time::now_to_minute(),
        };

        //
        // 4. Execute
        //
        let ledger = Ledger::from_config(cfg);
        let submission = ledger.record_event(EventForm {
            kind: k,
            date: d,
            machine: *machine,
            start_time: start_t,
            end_time: end_t,
            operator: operator.clone(),
            description: description.clone(),
            stop_meter: stop_meter.clone().unwrap_or_default(),
        })?;

        let event = &submission.record;
        success(format!(
            "Event recorded: {} on machine {} ({} min)",
            event.kind, event.machine, event.minutes
        ));

        if let Some(warn) = submission.mirror.warning() {
            warning(warn);
        }

        //
        // 5. Journal (non-blocking)
        //
        let journal = Journal::new(cfg.journal_path());
        if let Err(e) = journal.record(
            "event",
            &event.id,
            &format!(
                "{} on machine {} for {} min (mirror: {})",
                event.kind,
                event.machine,
                event.minutes,
                submission.mirror.as_str()
            ),
        ) {
            warning(format!("Failed to write journal entry: {e}"));
        }
    }

    Ok(())
}
