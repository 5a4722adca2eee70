//! Rest API interface for DHIS2
//!

use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;
use wdc_core::logging::{debug, error};

use crate::consts::{ACCEPT_HEADER, JSON_CONTENT, USERS_PATH, USER_FIELDS};
use crate::creds::ConnectionConfig;
use crate::error::FetchError;
use crate::nodes::{self, FlatUserRow, RawUserRecord};

/// Settings for the HTTP client.
#[derive(Clone, Debug)]
pub struct Dhis2RestConfig {
    /// Deadline for the whole request, including reading the body.
    pub timeout: Duration,
}

impl Default for Dhis2RestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Wrapper struct for http functionality
pub struct Dhis2RestClient {
    /// The credentials used to authenticate into DHIS2.
    credentials: ConnectionConfig,
    http_client: reqwest::Client,
    users_url: Url,
}

impl Dhis2RestClient {
    /// Validate the credentials and build a client.
    pub fn new(credentials: ConnectionConfig, config: Dhis2RestConfig) -> Result<Self, FetchError> {
        credentials.validate()?;
        let users_url = users_url(&credentials.base_url)?;
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self {
            credentials,
            http_client,
            users_url,
        })
    }

    /// The full URL of the users request, query included.
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }

    fn build_request(&self) -> reqwest::RequestBuilder {
        self.http_client
            .get(self.users_url.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT_HEADER, JSON_CONTENT)
    }

    /// Fetch every user in one request and flatten them into rows.
    ///
    /// The request is sent once. A non-success status fails without
    /// reading the body.
    pub async fn fetch_users(&self) -> Result<Vec<FlatUserRow>, FetchError> {
        let url = &self.users_url;
        debug!("requesting users from {url}");

        let resp = self.build_request().send().await.map_err(|e| {
            error!("error with request (GET {url}): {e}");
            FetchError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            error!("error with request - bad response (GET {url}): {status}");
            return Err(status.into());
        }

        let body = resp.json::<serde_json::Value>().await.map_err(|e| {
            error!("error parsing json response (GET {url}): {e}");
            if e.is_decode() {
                FetchError::Parse(format!("response is not valid JSON: {e}"))
            } else {
                FetchError::Transport(e)
            }
        })?;

        let users: Vec<RawUserRecord> = nodes::to_node_list(&body, &["users"])?;
        debug!("received {} users", users.len());
        Ok(users.into_iter().map(FlatUserRow::from).collect())
    }
}

/// Build `{base_url}/api/users.json?fields=..&paging=false`.
///
/// Any query or fragment on the base URL is dropped so the request
/// parameters appear exactly once.
fn users_url(base_url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| {
        FetchError::Configuration(format!("invalid base URL {base_url:?}: {reason}"))
    };

    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| invalid("not a hierarchical URL".to_owned()))?
        .pop_if_empty()
        .extend(USERS_PATH.split('/'));
    url.query_pairs_mut()
        .append_pair("fields", USER_FIELDS)
        .append_pair("paging", "false");
    Ok(url)
}

pub(crate) fn get_json_from_path<'a>(
    val: &'a serde_json::Value,
    path: &[&str],
) -> anyhow::Result<&'a serde_json::Value> {
    let mut full_path: String = "Object".to_owned();
    let mut return_val = val;

    for p in path {
        full_path = format!("{full_path}.{p}");
        return_val = return_val
            .get(p)
            .ok_or_else(|| anyhow!("unable to parse json - no such path exists: {full_path}"))?;
    }
    Ok(return_val)
}
