pub mod csv_table;
pub mod journal;

pub use csv_table::CsvTable;

use crate::errors::AppResult;

/// A row type living in one durable table.
pub trait Record: Clone {
    /// Column headers, in on-disk order.
    const HEADERS: &'static [&'static str];

    /// Opaque unique key used for removal.
    fn key(&self) -> &str;
}

/// Repository seam over one durable table. Implementations re-read the
/// backing store on every call; nothing is cached across operations.
pub trait Table<T: Record> {
    fn list(&self) -> AppResult<Vec<T>>;

    fn append(&self, record: &T) -> AppResult<()>;

    /// Removes the row with the given key. Removing an absent key is a
    /// no-op, not an error.
    fn remove_by_key(&self, key: &str) -> AppResult<()>;
}
