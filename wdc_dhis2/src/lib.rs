//! DHIS2 Users Connector
//!
//! Pulls every user of a DHIS2 instance into a single host table of
//! flattened rows.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use wdc_core::host::{MemoryHost, MemoryTable};
//! use wdc_core::Connector;
//! use wdc_dhis2::{schema, ConnectionConfig, Dhis2UsersConnector};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let host = Arc::new(MemoryHost::default());
//! let connector = Dhis2UsersConnector::new(host.clone());
//! connector.submit(&ConnectionConfig::new(
//!     "https://play.dhis2.org/demo",
//!     "admin",
//!     "district",
//! ))?;
//!
//! let mut table = MemoryTable::new(schema::users_table());
//! connector
//!     .get_data(&mut table, Box::new(|| println!("done")))
//!     .await;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod consts;
mod creds;
mod error;
mod nodes;
mod rest;
pub mod schema;

pub use consts::{CONNECTION_NAME, TABLE_ID, USER_FIELDS};
pub use creds::ConnectionConfig;
pub use error::FetchError;
pub use nodes::{FlatUserRow, NamedRef, RawUserRecord, UserCredentials};
pub use rest::{Dhis2RestClient, Dhis2RestConfig};

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use wdc_core::{
    connectors::{DoneCallback, ReadyCallback, Row, SchemaCallback},
    log_runtime,
    logging::{debug, error, info},
    Connector, Host, Table,
};

/// Fetch and flatten every user of the instance described by `config`.
pub async fn fetch_users(config: &ConnectionConfig) -> Result<Vec<FlatUserRow>, FetchError> {
    Dhis2RestClient::new(config.to_owned(), Dhis2RestConfig::default())?
        .fetch_users()
        .await
}

/// The host adapter for DHIS2 users.
///
/// Connection details are read from the host's connection data on every
/// `get_data` call, so a connection submitted with [`submit`](Self::submit)
/// in one session can be refreshed in a later one.
pub struct Dhis2UsersConnector {
    host: Arc<dyn Host>,
    rest_config: Dhis2RestConfig,
    /// Held for the duration of a fetch. Only one fetch runs at a time.
    fetch_lock: Mutex<()>,
}

impl Dhis2UsersConnector {
    /// Create a connector using the default HTTP settings.
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self::with_rest_config(host, Dhis2RestConfig::default())
    }

    /// Create a connector with custom HTTP settings, such as a shorter
    /// timeout.
    pub fn with_rest_config(host: Arc<dyn Host>, rest_config: Dhis2RestConfig) -> Self {
        Self {
            host,
            rest_config,
            fetch_lock: Mutex::new(()),
        }
    }

    /// Save `config` as the host's connection state and hand control back
    /// to the host.
    pub fn submit(&self, config: &ConnectionConfig) -> Result<()> {
        config.validate().context("validating connection")?;
        let data = config
            .to_connection_data()
            .context("serializing connection")?;

        self.host.set_connection_data(data);
        self.host.set_connection_name(CONNECTION_NAME.to_owned());
        info!("submitting connection to {}", config.base_url);
        self.host.submit();
        Ok(())
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, FetchError> {
        let config = ConnectionConfig::from_connection_data(&self.host.connection_data())?;
        let client = Dhis2RestClient::new(config, self.rest_config.to_owned())?;
        let users = log_runtime!("fetching users", client.fetch_users().await)?;
        Ok(users.iter().map(FlatUserRow::to_row).collect())
    }
}

#[async_trait]
impl Connector for Dhis2UsersConnector {
    fn init(&self, ready: ReadyCallback) {
        debug!("connector initialized");
        ready();
    }

    fn get_schema(&self, callback: SchemaCallback) {
        callback(vec![schema::users_table()]);
    }

    async fn get_data(&self, table: &mut dyn Table, done: DoneCallback) {
        let table_id = table.table_info().id.to_owned();
        if table_id != TABLE_ID {
            error!("asked for unknown table {table_id}");
            self.host
                .abort_with_error(&format!("Unknown table: {table_id}"));
            return;
        }

        let _guard = self.fetch_lock.lock().await;
        info!("fetching users for table {table_id}");
        match self.fetch_rows().await {
            Ok(rows) => {
                info!("appending {} rows to {table_id}", rows.len());
                table.append_rows(rows);
                done();
            }
            Err(e) => {
                error!("failed to fetch users: {e}");
                self.host
                    .abort_with_error(&format!("Unable to fetch DHIS2 users: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use wdc_core::host::{MemoryHost, MemoryTable};
    use wdc_core::schema::TableSchema;

    fn connector() -> (Arc<MemoryHost>, Dhis2UsersConnector) {
        let host = Arc::new(MemoryHost::default());
        let connector = Dhis2UsersConnector::new(host.clone());
        (host, connector)
    }

    #[test]
    fn init_signals_ready() {
        let (_, connector) = connector();
        let ready = Arc::new(AtomicBool::new(false));
        let flag = ready.clone();
        connector.init(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ready.load(Ordering::SeqCst));
    }

    #[test]
    fn schema_declares_one_users_table() {
        let (_, connector) = connector();
        let seen = Arc::new(std::sync::Mutex::new(Vec::<Vec<TableSchema>>::new()));
        for _ in 0..2 {
            let seen = seen.clone();
            connector.get_schema(Box::new(move |tables: Vec<TableSchema>| {
                seen.lock().unwrap().push(tables)
            }));
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].id, "DHIS2Users");
        assert_eq!(seen[0][0].columns.len(), 16);
    }

    #[test]
    fn submit_persists_connection() -> Result<()> {
        let (host, connector) = connector();
        let config = ConnectionConfig::new("https://play.dhis2.org/demo", "admin", "district");
        connector.submit(&config)?;

        assert_eq!(
            ConnectionConfig::from_connection_data(&host.connection_data())?,
            config
        );
        assert_eq!(host.connection_name().as_deref(), Some("DHIS2 Users"));
        assert_eq!(host.submissions(), 1);
        Ok(())
    }

    #[test]
    fn submit_rejects_incomplete_connection() {
        let (host, connector) = connector();
        let config = ConnectionConfig::new("https://play.dhis2.org/demo", "admin", "");

        assert!(connector.submit(&config).is_err());
        assert_eq!(host.connection_data(), "");
        assert_eq!(host.submissions(), 0);
    }

    #[tokio::test]
    async fn get_data_without_saved_connection_aborts() {
        let (host, connector) = connector();
        let mut table = MemoryTable::new(schema::users_table());
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        connector
            .get_data(&mut table, Box::new(move || flag.store(true, Ordering::SeqCst)))
            .await;

        assert!(!done.load(Ordering::SeqCst));
        assert!(table.rows().is_empty());
        let errors = host.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no connection data"), "{}", errors[0]);
    }

    #[tokio::test]
    async fn get_data_for_unknown_table_aborts() {
        let (host, connector) = connector();
        let mut table = MemoryTable::new(TableSchema {
            id: "Other".to_owned(),
            alias: None,
            columns: vec![],
        });

        connector.get_data(&mut table, Box::new(|| ())).await;

        assert_eq!(host.errors(), vec!["Unknown table: Other".to_owned()]);
    }
}
