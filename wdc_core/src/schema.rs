//! Table schemas declared to the host.
//!
//! A connector describes every table it can produce up front, before any
//! data is requested. Columns are declared in the order the host should
//! display them.

use serde::{Deserialize, Serialize};

/// The data types a host column can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text.
    String,
    /// An ISO-8601 timestamp.
    Datetime,
    /// True or false.
    Boolean,
}

/// A single column in a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    /// The identifier rows use as the key for this column.
    pub id: String,
    /// The human-readable column name.
    pub alias: String,
    /// The column's type.
    pub data_type: DataType,
}

impl ColumnSchema {
    /// Basic constructor
    pub fn new(id: &str, alias: &str, data_type: DataType) -> Self {
        Self {
            id: id.to_owned(),
            alias: alias.to_owned(),
            data_type,
        }
    }
}

/// The description of one table a connector produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// The table identifier the host passes back when requesting data.
    pub id: String,
    /// A human-readable table name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// The table's columns, in display order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Column ids in declaration order.
    pub fn column_ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.id.as_str()).collect()
    }
}
