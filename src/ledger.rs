//! The roll & event ledger: three operations over two record stores and
//! one derived store, with a best-effort remote mirror.
//!
//! Every operation commits locally first. The mirror leg runs after the
//! local write and can only degrade the outcome to a warning, never
//! roll it back.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::mirror::{Mirror, MirrorStatus, MirrorTable, SheetsMirror};
use crate::models::{ClosedRoll, Event, EventKind, Roll, Shift};
use crate::store::{CsvTable, Table};
use chrono::{NaiveDate, NaiveTime};

/// Result of one ledger operation: the record now committed locally,
/// plus what happened on the mirror leg.
#[derive(Debug)]
pub struct Submission<T> {
    pub record: T,
    pub mirror: MirrorStatus,
}

/// How the operator points at one open roll when closing it.
#[derive(Debug, Clone)]
pub enum RollSelector {
    /// Full identifier or unique prefix.
    Id(String),
    /// 1-based row number in the current open-rolls listing.
    Pick(usize),
}

#[derive(Debug, Clone)]
pub struct StartForm {
    pub date: NaiveDate,
    pub shift: Shift,
    pub machine: u32,
    pub raw_lot: String,
    pub order_lot: String,
    pub operator: String,
    pub start_time: NaiveTime,
    pub remarks: String,
}

#[derive(Debug, Clone)]
pub struct FinishForm {
    pub selection: RollSelector,
    pub end_time: NaiveTime,
    pub operator: String,
    pub weight: f64,
    pub tares: u32,
    pub remarks: String,
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub kind: EventKind,
    pub date: NaiveDate,
    pub machine: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub operator: String,
    pub description: String,
    pub stop_meter: String,
}

pub struct Ledger {
    open: Box<dyn Table<Roll>>,
    closed: Box<dyn Table<ClosedRoll>>,
    events: Box<dyn Table<Event>>,
    mirror: Option<Box<dyn Mirror>>,
    keep_closed: bool,
}

impl Ledger {
    pub fn new(
        open: Box<dyn Table<Roll>>,
        closed: Box<dyn Table<ClosedRoll>>,
        events: Box<dyn Table<Event>>,
        mirror: Option<Box<dyn Mirror>>,
        keep_closed: bool,
    ) -> Self {
        Self {
            open,
            closed,
            events,
            mirror,
            keep_closed,
        }
    }

    /// Wires the ledger over the configured CSV tables and, when
    /// mirroring is enabled, the spreadsheet gateway.
    pub fn from_config(cfg: &Config) -> Self {
        let mirror: Option<Box<dyn Mirror>> = if cfg.mirror_enabled {
            Some(Box::new(SheetsMirror::new(cfg.mirror_api_base.clone())))
        } else {
            None
        };

        Ledger::new(
            Box::new(CsvTable::<Roll>::new(cfg.open_rolls_path())),
            Box::new(CsvTable::<ClosedRoll>::new(cfg.closed_rolls_path())),
            Box::new(CsvTable::<Event>::new(cfg.events_path())),
            mirror,
            cfg.keep_closed_rolls,
        )
    }

    /// Current open set, in table order.
    pub fn open_rolls(&self) -> AppResult<Vec<Roll>> {
        self.open.list()
    }

    /// Locally kept closed rolls, oldest first.
    pub fn closed_rolls(&self) -> AppResult<Vec<ClosedRoll>> {
        self.closed.list()
    }

    /// All recorded line events, oldest first.
    pub fn events(&self) -> AppResult<Vec<Event>> {
        self.events.list()
    }

    /// Opens a new roll: fresh identifier, append to the open set,
    /// mirror to EN_CURSO.
    pub fn start_roll(&self, form: StartForm) -> AppResult<Submission<Roll>> {
        let raw_lot = required("raw-material lot", &form.raw_lot)?;
        let order_lot = required("fabrication-order lot", &form.order_lot)?;
        let operator = required("operator", &form.operator)?;
        valid_machine(form.machine)?;

        let roll = Roll::new(
            form.date,
            form.shift,
            form.machine,
            raw_lot,
            order_lot,
            form.start_time,
            operator,
            form.remarks.trim().to_string(),
        );

        self.open.append(&roll)?;
        let mirror = self.mirror_to(MirrorTable::EnCurso, roll.mirror_row());

        Ok(Submission {
            record: roll,
            mirror,
        })
    }

    /// Closes one open roll: build the closed record, keep it locally
    /// when configured to, mirror to BOBINAS, then drop the roll from
    /// the open set. `Open -> Closed` is terminal.
    pub fn finish_roll(&self, form: FinishForm) -> AppResult<Submission<ClosedRoll>> {
        let operator = required("closing operator", &form.operator)?;

        let roll = self.resolve(&form.selection)?;
        let closed = ClosedRoll::from_open(
            roll,
            form.end_time,
            operator,
            form.weight,
            form.tares,
            form.remarks.trim().to_string(),
        );

        if self.keep_closed {
            self.closed.append(&closed)?;
        }

        let mirror = self.mirror_to(MirrorTable::Bobinas, closed.mirror_row());

        // Removal is not conditional on the mirror outcome.
        self.open.remove_by_key(&closed.id)?;

        Ok(Submission {
            record: closed,
            mirror,
        })
    }

    /// Records a line event. Shift and OF lot come from whichever roll
    /// is open on the same machine; an incident with no such roll is
    /// rejected before anything is written.
    pub fn record_event(&self, form: EventForm) -> AppResult<Submission<Event>> {
        let operator = required("operator", &form.operator)?;
        let description = required("description", &form.description)?;
        valid_machine(form.machine)?;

        let context = self
            .open
            .list()?
            .into_iter()
            .find(|r| r.machine == form.machine);

        let (shift, order_lot) = match context {
            Some(roll) => (Some(roll.shift), roll.order_lot),
            None if form.kind.is_incident() => {
                return Err(AppError::NoActiveOrder(form.machine));
            }
            None => (None, String::new()),
        };

        let event = Event::new(
            form.kind,
            form.date,
            shift,
            form.machine,
            order_lot,
            form.start_time,
            form.end_time,
            operator,
            description,
            form.stop_meter.trim().to_string(),
        );

        self.events.append(&event)?;
        let mirror = self.mirror_to(MirrorTable::Eventos, event.mirror_row());

        Ok(Submission {
            record: event,
            mirror,
        })
    }

    /// Resolves a selector against the current open set.
    ///
    /// Identifiers match exactly first, then as a prefix; a prefix
    /// shared by several rolls is rejected rather than guessed.
    pub fn resolve(&self, selection: &RollSelector) -> AppResult<Roll> {
        let rolls = self.open.list()?;

        match selection {
            RollSelector::Id(wanted) => {
                if let Some(exact) = rolls.iter().find(|r| r.id == *wanted) {
                    return Ok(exact.clone());
                }

                let mut matches = rolls.iter().filter(|r| r.id.starts_with(wanted.as_str()));
                match (matches.next(), matches.next()) {
                    (Some(only), None) => Ok(only.clone()),
                    (Some(_), Some(_)) => Err(AppError::AmbiguousRoll(wanted.clone())),
                    (None, _) => Err(AppError::RollNotFound(wanted.clone())),
                }
            }
            RollSelector::Pick(row) => rolls
                .get(row.wrapping_sub(1))
                .cloned()
                .ok_or_else(|| AppError::RollNotFound(format!("#{row}"))),
        }
    }

    // Mirror leg: the only place mirror errors are caught and turned
    // into a status the caller can surface.
    fn mirror_to(&self, table: MirrorTable, row: Vec<serde_json::Value>) -> MirrorStatus {
        match &self.mirror {
            None => MirrorStatus::Skipped,
            Some(mirror) => match mirror.append(table, row) {
                Ok(()) => MirrorStatus::Delivered,
                Err(e) => MirrorStatus::Failed(e.to_string()),
            },
        }
    }
}

fn required(field: &'static str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn valid_machine(machine: u32) -> AppResult<()> {
    if machine < 1 {
        return Err(AppError::InvalidMachine(machine));
    }
    Ok(())
}
