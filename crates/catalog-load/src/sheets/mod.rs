//! Google Sheets sink.
//!
//! Authenticates with a service-account key file, clears a wide range of
//! the first sheet, then writes the header and data rows starting at `A1`.

mod auth;

use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_core::CleanProductRecord;
use catalog_transform::CleanTable;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::LoadError;
use crate::sink::{ensure_not_empty, SaveSummary};

pub use auth::ServiceAccountKey;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const CLEAR_RANGE: &str = "A1:Z100000";
const WRITE_RANGE: &str = "A1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SheetsSink {
    spreadsheet_id: String,
    credentials_path: PathBuf,
    api_base: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    updated_cells: u64,
}

impl SheetsSink {
    #[must_use]
    pub fn new(spreadsheet_id: impl Into<String>, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            credentials_path: credentials_path.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Points the sink at a different API host (used by tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Clears the sheet and writes `table` from `A1`.
    ///
    /// # Errors
    ///
    /// - [`LoadError::EmptyTable`]: nothing to write.
    /// - [`LoadError::CredentialsNotFound`]: key file missing; no request is made.
    /// - [`LoadError::Credentials`] / [`LoadError::Token`]: authentication failed.
    /// - [`LoadError::SheetsApi`] / [`LoadError::Http`]: the API call failed.
    pub async fn try_save(&self, table: &CleanTable) -> Result<SaveSummary, LoadError> {
        ensure_not_empty(table)?;

        let key = ServiceAccountKey::from_file(&self.credentials_path)?;
        let assertion = auth::sign_assertion(&key, SPREADSHEETS_SCOPE, &self.credentials_path)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let token = auth::fetch_access_token(&client, &key, &assertion).await?;

        let values_url = format!(
            "{}/v4/spreadsheets/{}/values",
            self.api_base, self.spreadsheet_id
        );

        let clear = client
            .post(format!("{values_url}/{CLEAR_RANGE}:clear"))
            .bearer_auth(&token)
            .json(&json!({}))
            .send()
            .await?;
        check_status(clear).await?;

        let update = client
            .put(format!("{values_url}/{WRITE_RANGE}"))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&token)
            .json(&json!({
                "range": WRITE_RANGE,
                "majorDimension": "ROWS",
                "values": table_values(table),
            }))
            .send()
            .await?;
        let update = check_status(update).await?;
        let body: UpdateResponse = update.json().await?;

        Ok(SaveSummary {
            rows: table.len(),
            location: self.spreadsheet_id.clone(),
            cells_updated: Some(body.updated_cells),
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LoadError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LoadError::SheetsApi {
        status: status.as_u16(),
        body,
    })
}

/// Header row followed by one row per record; numbers stay numeric.
fn table_values(table: &CleanTable) -> Vec<Vec<Value>> {
    let header = CleanTable::header().map(Value::from).to_vec();
    std::iter::once(header)
        .chain(table.iter().map(record_values))
        .collect()
}

fn record_values(record: &CleanProductRecord) -> Vec<Value> {
    vec![
        json!(record.title),
        json!(record.price),
        json!(record.rating),
        json!(record.colors),
        json!(record.size),
        json!(record.gender),
        json!(record.timestamp),
    ]
}
