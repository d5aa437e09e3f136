/* Google Sheets access.
 * The values sheet feeds the option menus and the type classification table; the
 * ledger sheet receives one row per completed transaction.
 */

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    config::SheetsConfig,
    services::{check_response, CompletedTransaction, Ledger, OptionSource, ServiceError},
    steps::OptionRange,
};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    config: SheetsConfig,
    access_token: String,
}

impl SheetsClient {
    pub fn new(http: Client, config: SheetsConfig, access_token: String) -> SheetsClient {
        SheetsClient {
            http,
            config,
            access_token,
        }
    }

    fn values_url(&self, segment: &str) -> Result<Url, ServiceError> {
        let mut url = Url::parse(SHEETS_API)
            .map_err(|err| ServiceError::InvalidRequest(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidRequest(SHEETS_API.to_string()))?
            .push(&self.config.spreadsheet_id)
            .push("values")
            .push(segment);
        Ok(url)
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Vec<Value>>, ServiceError> {
        let url = self.values_url(range)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: ValueRange = check_response(response).await?.json().await?;
        Ok(body.values)
    }
}

#[async_trait]
impl OptionSource for SheetsClient {
    async fn options(&self, range: OptionRange) -> Result<Vec<String>, ServiceError> {
        let range = sheet_range(&self.config.values_sheet, self.config.ranges.get(range));
        let values = self.read_range(&range).await?;
        Ok(first_column(&values))
    }

    async fn lookup(&self, key: &str) -> Result<String, ServiceError> {
        let values = self.read_range(&quote_sheet(&self.config.values_sheet)).await?;
        let found = find_in_table(
            &values,
            key,
            self.config.lookup_search_column,
            self.config.lookup_return_column,
        );
        Ok(found.unwrap_or_default())
    }
}

#[async_trait]
impl Ledger for SheetsClient {
    async fn append(&self, transaction: &CompletedTransaction) -> Result<(), ServiceError> {
        let range = sheet_range(&self.config.ledger_sheet, "A1");
        let mut url = self.values_url(&format!("{}:append", range))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": [transaction.to_row()] }))
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }
}

// Sheet names with spaces or symbols must be quoted in A1 notation.
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

fn sheet_range(sheet: &str, range: &str) -> String {
    format!("{}!{}", quote_sheet(sheet), range)
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// First cell of every row, skipping blank rows.
fn first_column(values: &[Vec<Value>]) -> Vec<String> {
    values
        .iter()
        .filter_map(|row| row.first())
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .collect()
}

// Looks up `key` in the 1-based `search_column` and returns the same row's `return_column`.
// Column 0 matches nothing.
fn find_in_table(
    values: &[Vec<Value>],
    key: &str,
    search_column: usize,
    return_column: usize,
) -> Option<String> {
    let search = search_column.checked_sub(1)?;
    let target = return_column.checked_sub(1)?;
    values
        .iter()
        .find(|row| row.get(search).map_or(false, |cell| cell_text(cell) == key))
        .map(|row| row.get(target).map(cell_text).unwrap_or_default())
}
