//! An in-process host for embedding connectors without an analytics tool.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::connectors::{Host, Row, Table};
use crate::logging::{debug, warn};
use crate::schema::TableSchema;

/// A [`Host`] that keeps everything in memory.
///
/// Useful for running a connector headless and for inspecting what a
/// connector asked of its host.
#[derive(Debug, Default)]
pub struct MemoryHost {
    connection_data: Mutex<String>,
    connection_name: Mutex<Option<String>>,
    submissions: Mutex<usize>,
    errors: Mutex<Vec<String>>,
}

impl MemoryHost {
    /// Create a host with pre-existing connection data.
    pub fn with_connection_data(data: impl Into<String>) -> Self {
        Self {
            connection_data: Mutex::new(data.into()),
            ..Default::default()
        }
    }

    /// The connection name last set by a connector.
    pub fn connection_name(&self) -> Option<String> {
        lock(&self.connection_name).clone()
    }

    /// How many times a connector called [`Host::submit`].
    pub fn submissions(&self) -> usize {
        *lock(&self.submissions)
    }

    /// Every message passed to [`Host::abort_with_error`], oldest first.
    pub fn errors(&self) -> Vec<String> {
        lock(&self.errors).clone()
    }
}

impl Host for MemoryHost {
    fn connection_data(&self) -> String {
        lock(&self.connection_data).clone()
    }

    fn set_connection_data(&self, data: String) {
        *lock(&self.connection_data) = data;
    }

    fn set_connection_name(&self, name: String) {
        *lock(&self.connection_name) = Some(name);
    }

    fn submit(&self) {
        debug!("connection submitted");
        *lock(&self.submissions) += 1;
    }

    fn abort_with_error(&self, message: &str) {
        warn!("connector aborted: {message}");
        lock(&self.errors).push(message.to_owned());
    }
}

/// A [`Table`] that collects appended rows.
#[derive(Debug)]
pub struct MemoryTable {
    info: TableSchema,
    rows: Vec<Row>,
}

impl MemoryTable {
    /// Create an empty table for the given schema.
    pub fn new(info: TableSchema) -> Self {
        Self { info, rows: vec![] }
    }

    /// All rows appended so far.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Table for MemoryTable {
    fn table_info(&self) -> &TableSchema {
        &self.info
    }

    fn append_rows(&mut self, rows: Vec<Row>) {
        self.rows.extend(rows);
    }
}

/// Every critical section is a single read or write, so a poisoned lock
/// still holds consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSchema, DataType};

    use serde_json::json;

    #[test]
    fn host_records_connector_requests() {
        let host = MemoryHost::with_connection_data("before");
        assert_eq!(host.connection_data(), "before");

        host.set_connection_data("after".to_owned());
        host.set_connection_name("My Connection".to_owned());
        host.submit();
        host.abort_with_error("boom");

        assert_eq!(host.connection_data(), "after");
        assert_eq!(host.connection_name(), Some("My Connection".to_owned()));
        assert_eq!(host.submissions(), 1);
        assert_eq!(host.errors(), vec!["boom".to_owned()]);
    }

    #[test]
    fn table_keeps_rows_in_append_order() {
        let mut table = MemoryTable::new(TableSchema {
            id: "t".to_owned(),
            alias: None,
            columns: vec![ColumnSchema::new("n", "N", DataType::String)],
        });
        let row = |n: &str| {
            let mut r = Row::new();
            r.insert("n".to_owned(), json!(n));
            r
        };

        table.append_rows(vec![row("a"), row("b")]);
        table.append_rows(vec![row("c")]);

        assert_eq!(table.table_info().id, "t");
        let names: Vec<_> = table.rows().iter().map(|r| r["n"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }
}
