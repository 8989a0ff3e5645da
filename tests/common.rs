#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use rollbook::errors::{AppError, AppResult};
use rollbook::mirror::{Mirror, MirrorTable};
use rollbook::models::{Roll, Shift};
use rollbook::store::{Record, Table};
use serde_json::Value;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn rb() -> Command {
    let mut cmd = cargo_bin_cmd!("rollbook");
    // The mirror leg must fail the same way on every machine, even one
    // that happens to carry real spreadsheet credentials.
    cmd.env_remove("GOOGLE_SERVICE_ACCOUNT");
    cmd.env_remove("GOOGLE_SHEET_ID");
    cmd
}

/// Create a unique test data directory inside the system temp dir and
/// remove any leftover from a previous run.
pub fn setup_data_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollbook", name));
    let data_dir = path.to_string_lossy().to_string();
    fs::remove_dir_all(&data_dir).ok();
    data_dir
}

/// Read one ledger table from the data dir as raw text.
pub fn read_table(data_dir: &str, file: &str) -> String {
    let path = Path::new(data_dir).join(file);
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing table file: {}", path.display()))
}

/// Data rows of a table dump (everything below the header line).
pub fn data_rows(table: &str) -> Vec<&str> {
    table
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .collect()
}

/// Initialize a data dir and open one roll on the given machine,
/// returning the new roll id parsed from the command output.
pub fn init_with_open_roll(data_dir: &str, machine: u32, order_lot: &str) -> String {
    rb().args(["--data-dir", data_dir, "--test", "init"])
        .assert()
        .success();

    start_roll(data_dir, machine, order_lot)
}

/// Open one roll via the CLI and return its id.
pub fn start_roll(data_dir: &str, machine: u32, order_lot: &str) -> String {
    let output = rb()
        .args([
            "--data-dir",
            data_dir,
            "start",
            "--date",
            "2025-09-01",
            "--shift",
            "1",
            "--machine",
            &machine.to_string(),
            "--raw-lot",
            "MP-100",
            "--order-lot",
            order_lot,
            "--operator",
            "Ana",
            "--time",
            "06:00",
        ])
        .output()
        .expect("failed to run start");
    assert!(output.status.success(), "start must succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let id_line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("id: "))
        .expect("start output should print the new roll id");
    id_line.trim().trim_start_matches("id: ").trim().to_string()
}

// ---------------------------------------------------------------
// Library-level doubles for driving the Ledger without touching
// disk or network.
// ---------------------------------------------------------------

/// In-memory table that shares its rows with the test body.
pub struct MemTable<T> {
    rows: Rc<RefCell<Vec<T>>>,
}

impl<T> MemTable<T> {
    pub fn new() -> Self {
        Self {
            rows: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Rc::new(RefCell::new(rows)),
        }
    }

    /// Handle kept by the test to inspect the rows after the table has
    /// been boxed into a Ledger.
    pub fn handle(&self) -> Rc<RefCell<Vec<T>>> {
        Rc::clone(&self.rows)
    }
}

impl<T: Record> Table<T> for MemTable<T> {
    fn list(&self) -> AppResult<Vec<T>> {
        Ok(self.rows.borrow().clone())
    }

    fn append(&self, record: &T) -> AppResult<()> {
        self.rows.borrow_mut().push(record.clone());
        Ok(())
    }

    fn remove_by_key(&self, key: &str) -> AppResult<()> {
        self.rows.borrow_mut().retain(|r| r.key() != key);
        Ok(())
    }
}

/// Mirror that always fails, standing in for an unreachable gateway.
pub struct FailingMirror;

impl Mirror for FailingMirror {
    fn append(&self, _table: MirrorTable, _row: Vec<Value>) -> AppResult<()> {
        Err(AppError::Mirror("connection refused".to_string()))
    }
}

/// Mirror that records every appended row for later assertions.
pub struct RecordingMirror {
    rows: Rc<RefCell<Vec<(MirrorTable, Vec<Value>)>>>,
}

impl RecordingMirror {
    pub fn new() -> Self {
        Self {
            rows: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn handle(&self) -> Rc<RefCell<Vec<(MirrorTable, Vec<Value>)>>> {
        Rc::clone(&self.rows)
    }
}

impl Mirror for RecordingMirror {
    fn append(&self, table: MirrorTable, row: Vec<Value>) -> AppResult<()> {
        self.rows.borrow_mut().push((table, row));
        Ok(())
    }
}

/// An open roll with fixed, readable field values for library tests.
pub fn sample_roll(id: &str, machine: u32, order_lot: &str) -> Roll {
    Roll {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        shift: Shift::Morning,
        machine,
        raw_lot: "MP-100".to_string(),
        order_lot: order_lot.to_string(),
        start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        start_operator: "Ana".to_string(),
        start_remarks: String::new(),
    }
}
