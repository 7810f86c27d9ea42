use reqwest::Url;
use serde_json::json;
use tracing::{debug, error, info};

use crate::{config::SheetConfig, error::AppError, record::Cell};

use super::SheetStore;

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Response of a Sheets `values.get` call. `values` is omitted for empty ranges.
#[derive(serde::Deserialize, Debug)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Response of a Drive `files.list` call
#[derive(serde::Deserialize, Debug)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(serde::Deserialize, Debug)]
struct DriveFile {
    id: String,
    name: String,
}

/// A Google spreadsheet reached through the Sheets v4 REST API.
///
/// Opened once at startup and handed to the writer explicitly. Values are
/// written with `valueInputOption=RAW`, so text is stored as typed and never
/// parsed as a formula.
pub struct GoogleSheet {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    spreadsheet_id: String,
}

impl GoogleSheet {
    /// Opens the configured spreadsheet, resolving it by name through Drive
    /// when no ID is configured.
    pub async fn open(client: reqwest::Client, config: &SheetConfig) -> Result<Self, AppError> {
        let spreadsheet_id = match &config.spreadsheet_id {
            Some(id) => id.clone(),
            None => find_spreadsheet(&client, config).await?,
        };
        info!("Using spreadsheet {}", spreadsheet_id);

        Ok(GoogleSheet {
            client,
            endpoint: config.sheets_endpoint.clone(),
            access_token: config.access_token.clone(),
            spreadsheet_id,
        })
    }

    fn values_url(&self, range: &str) -> Result<Url, AppError> {
        let mut url = parse_endpoint(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|_| invalid_endpoint(&self.endpoint, "cannot be a base URL"))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    async fn get_values(&self, range: &str, major_dimension: &str) -> Result<Vec<Vec<String>>, AppError> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut()
            .append_pair("majorDimension", major_dimension);

        debug!("Reading range {}", range);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = check_status(response, "read range").await?;

        let value_range: ValueRange = response.json().await?;
        Ok(value_range.values)
    }

    async fn put_values(&self, range: &str, row: &[Cell]) -> Result<(), AppError> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        debug!("Writing {} value(s) to {}", row.len(), range);
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [row],
        });
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        check_status(response, "write range").await?;
        Ok(())
    }
}

impl SheetStore for GoogleSheet {
    async fn row_values(&self, worksheet: &str, row: usize) -> Result<Vec<String>, AppError> {
        let range = format!("{}!{}:{}", quote_worksheet(worksheet), row, row);
        let mut rows = self.get_values(&range, "ROWS").await?;
        Ok(if rows.is_empty() { Vec::new() } else { rows.swap_remove(0) })
    }

    async fn col_values(&self, worksheet: &str, col: usize) -> Result<Vec<String>, AppError> {
        let letter = column_letter(col);
        let range = format!("{}!{}:{}", quote_worksheet(worksheet), letter, letter);
        let mut cols = self.get_values(&range, "COLUMNS").await?;
        Ok(if cols.is_empty() { Vec::new() } else { cols.swap_remove(0) })
    }

    async fn all_values(&self, worksheet: &str) -> Result<Vec<Vec<String>>, AppError> {
        self.get_values(&quote_worksheet(worksheet), "ROWS").await
    }

    async fn update_cell(
        &mut self,
        worksheet: &str,
        row: usize,
        col: usize,
        value: &Cell,
    ) -> Result<(), AppError> {
        let range = format!("{}!{}{}", quote_worksheet(worksheet), column_letter(col), row);
        self.put_values(&range, std::slice::from_ref(value)).await
    }

    async fn update_row(
        &mut self,
        worksheet: &str,
        row: usize,
        values: &[Cell],
    ) -> Result<(), AppError> {
        let range = format!("{}!A{}", quote_worksheet(worksheet), row);
        self.put_values(&range, values).await
    }
}

async fn find_spreadsheet(client: &reqwest::Client, config: &SheetConfig) -> Result<String, AppError> {
    info!("Looking up spreadsheet '{}'", config.spreadsheet);

    let query = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        config.spreadsheet.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME_TYPE
    );
    let mut url = parse_endpoint(&config.drive_endpoint)?;
    url.path_segments_mut()
        .map_err(|_| invalid_endpoint(&config.drive_endpoint, "cannot be a base URL"))?
        .pop_if_empty()
        .push("files");
    url.query_pairs_mut()
        .append_pair("q", &query)
        .append_pair("fields", "files(id,name)");

    let response = client
        .get(url)
        .bearer_auth(&config.access_token)
        .send()
        .await?;
    let response = check_status(response, "spreadsheet lookup").await?;

    let list: FileList = response.json().await?;
    debug!("Spreadsheet lookup returned: {:?}", list);
    match list.files.into_iter().next() {
        Some(file) => {
            debug!("Resolved '{}' to {}", file.name, file.id);
            Ok(file.id)
        }
        None => Err(AppError::SpreadsheetNotFound(config.spreadsheet.clone())),
    }
}

async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("Failed to {}: {} {}", action, status, body);
    Err(AppError::ApiRequestFailed(format!("Failed to {}: {}", action, status)))
}

fn parse_endpoint(endpoint: &str) -> Result<Url, AppError> {
    Url::parse(endpoint).map_err(|e| invalid_endpoint(endpoint, &e.to_string()))
}

fn invalid_endpoint(endpoint: &str, reason: &str) -> AppError {
    AppError::InvalidConfig {
        name: endpoint.to_string(),
        reason: reason.to_string(),
    }
}

/// A1 worksheet reference: `'input_data'`, with embedded quotes doubled.
fn quote_worksheet(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

/// Converts a 1-based column number to its A1 letters (1 → A, 27 → AA).
fn column_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}
