//! The contract between a host analytics tool and its connectors.
//!
//! The host drives every connector through the same lifecycle: it calls
//! [`Connector::init`] once, asks for the schema with
//! [`Connector::get_schema`], then calls [`Connector::get_data`] once per
//! table. Completion is signalled through the callbacks the host passes in.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::schema::TableSchema;

/// One row of table data, keyed by column id.
pub type Row = Map<String, Value>;

/// Called by a connector once it is ready to be used.
pub type ReadyCallback = Box<dyn FnOnce() + Send>;
/// Called by a connector with the tables it can produce.
pub type SchemaCallback = Box<dyn FnOnce(Vec<TableSchema>) + Send>;
/// Called by a connector after all rows of a table have been appended.
pub type DoneCallback = Box<dyn FnOnce() + Send>;

/// The trait all connectors are expected to implement.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Prepare the connector. Must call `ready` when done.
    fn init(&self, ready: ReadyCallback);
    /// Describe the tables this connector produces.
    fn get_schema(&self, callback: SchemaCallback);
    /// Fill `table` with data, then call `done`.
    ///
    /// Failures are reported through [`Host::abort_with_error`] rather than
    /// returned; `done` is only called on success.
    async fn get_data(&self, table: &mut dyn Table, done: DoneCallback);
}

/// Capabilities the host exposes to a connector.
pub trait Host: Send + Sync {
    /// The opaque connection state persisted by an earlier submit.
    fn connection_data(&self) -> String;
    /// Persist connection state for later `get_data` calls.
    fn set_connection_data(&self, data: String);
    /// Set the name the host displays for this connection.
    fn set_connection_name(&self, name: String);
    /// Hand control back to the host once the connection is configured.
    fn submit(&self);
    /// Stop the current operation and show `message` to the operator.
    fn abort_with_error(&self, message: &str);
}

/// A host table being filled by `get_data`.
pub trait Table: Send {
    /// The schema of the table being requested.
    fn table_info(&self) -> &TableSchema;
    /// Append rows to the table.
    fn append_rows(&mut self, rows: Vec<Row>);
}
