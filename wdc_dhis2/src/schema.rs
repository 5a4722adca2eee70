//! The single table this connector declares.

use wdc_core::schema::{ColumnSchema, DataType, TableSchema};

use crate::consts::{TABLE_ALIAS, TABLE_ID};

/// Columns of the users table, in display order.
pub fn user_columns() -> Vec<ColumnSchema> {
    use DataType::{Boolean, Datetime, String as Text};
    [
        ("id", "ID", Text),
        ("username", "Username", Text),
        ("firstName", "First Name", Text),
        ("surname", "Surname", Text),
        ("displayName", "Display Name", Text),
        ("gender", "Gender", Text),
        ("email", "Email", Text),
        ("phone", "Phone Number", Text),
        ("jobTitle", "Job Title", Text),
        ("created", "Created", Datetime),
        ("lastUpdated", "Last Updated", Datetime),
        ("disabled", "Disabled", Boolean),
        ("orgUnits", "Organisation Units", Text),
        ("roles", "User Roles", Text),
        ("groups", "User Groups", Text),
        ("lastLogin", "Last Login", Datetime),
    ]
    .into_iter()
    .map(|(id, alias, data_type)| ColumnSchema::new(id, alias, data_type))
    .collect()
}

/// The `DHIS2Users` table declared to the host.
pub fn users_table() -> TableSchema {
    TableSchema {
        id: TABLE_ID.to_owned(),
        alias: Some(TABLE_ALIAS.to_owned()),
        columns: user_columns(),
    }
}
