use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Where and how to connect to a DHIS2 instance.
///
/// This is also the connection state persisted by the host between
/// submitting a connection and fetching its data, so it serializes to a
/// JSON object with exactly `baseUrl`, `username` and `password`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// The DHIS2 server root, e.g. `https://play.dhis2.org/demo`.
    pub base_url: String,
    /// DHIS2 account used for Basic authentication.
    pub username: String,
    /// Password of `username`. Never logged or printed.
    pub password: String,
}

impl ConnectionConfig {
    /// Basic constructor
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that every field is filled in.
    pub fn validate(&self) -> Result<(), FetchError> {
        let missing: Vec<_> = [
            ("baseUrl", &self.base_url),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FetchError::Configuration(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }

    /// Serialize into the host's connection-data string.
    pub fn to_connection_data(&self) -> Result<String, FetchError> {
        serde_json::to_string(self).map_err(|e| FetchError::Configuration(e.to_string()))
    }

    /// Read a config back from the host's connection-data string.
    pub fn from_connection_data(data: &str) -> Result<Self, FetchError> {
        if data.trim().is_empty() {
            return Err(FetchError::Configuration(
                "no connection data has been saved".to_owned(),
            ));
        }
        serde_json::from_str(data).map_err(|e| {
            FetchError::Configuration(format!("unable to read saved connection data: {e}"))
        })
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
