//! Unified application error type.
//! Every module (store, ledger, mirror, cli) returns AppError so the
//! handlers can report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Table encoding error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),

    // ---------------------------
    // Validation / ledger errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Machine number must be 1 or higher (got {0})")]
    InvalidMachine(u32),

    #[error("No active fabrication order on machine {0}: incidents need an open roll")]
    NoActiveOrder(u32),

    #[error("No open roll matches '{0}'")]
    RollNotFound(String),

    #[error("'{0}' matches more than one open roll, use a longer id prefix")]
    AmbiguousRoll(String),

    // ---------------------------
    // Mirror (remote spreadsheet)
    // ---------------------------
    #[error("Mirror error: {0}")]
    Mirror(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Backup errors
    // ---------------------------
    #[error("Backup error: {0}")]
    Backup(String),
}

pub type AppResult<T> = Result<T, AppError>;
