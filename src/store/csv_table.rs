//! CSV-backed table: header row plus data rows, read and rewritten
//! whole on every operation.

use super::{Record, Table};
use crate::errors::AppResult;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;

pub struct CsvTable<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> CsvTable<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl<T: Record + Serialize + DeserializeOwned> CsvTable<T> {
    // The header row is written explicitly so an empty table still
    // serializes as a header-only file.
    fn write_all(&self, rows: &[T]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        wtr.write_record(T::HEADERS)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        Ok(())
    }
}

impl<T: Record + Serialize + DeserializeOwned> Table<T> for CsvTable<T> {
    /// Reads the whole table. A missing file is an empty table; a
    /// malformed row is a hard error, never a silent reset.
    fn list(&self) -> AppResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for row in rdr.deserialize() {
            rows.push(row?);
        }

        Ok(rows)
    }

    fn append(&self, record: &T) -> AppResult<()> {
        let mut rows = self.list()?;
        rows.push(record.clone());
        self.write_all(&rows)
    }

    fn remove_by_key(&self, key: &str) -> AppResult<()> {
        let rows = self.list()?;
        let kept: Vec<T> = rows.into_iter().filter(|r| r.key() != key).collect();
        self.write_all(&kept)
    }
}
