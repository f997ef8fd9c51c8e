//! Blocking Google Sheets values client.
//!
//! Token acquisition and refresh live outside this crate; the client is
//! handed a ready bearer token and fails with `MissingToken` before any
//! network I/O when it is absent.

use std::time::Duration;

use billsync_enrich::EnrichedMatter;
use serde::{Deserialize, Serialize};

use crate::columns::{ColumnMap, SheetError, SheetField, HEADER_ROW};

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// One contiguous range and its cell values, as the values API shapes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Result of a batched write.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub updated_cells: u64,
    pub columns: usize,
}

#[derive(Serialize)]
struct BatchUpdateBody {
    #[serde(rename = "valueInputOption")]
    value_input_option: &'static str,
    data: Vec<ValueRange>,
}

#[derive(Deserialize)]
struct BatchUpdateResponse {
    #[serde(rename = "totalUpdatedCells", default)]
    total_updated_cells: u64,
}

/// First ~200 chars of an error body, cut on a char boundary so multibyte
/// upstream error pages cannot panic the status path.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(200) {
        Some((end, _)) => trimmed[..end].to_string(),
        None => trimmed.to_string(),
    }
}

/// Google Sheets API client (blocking).
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(token: String, spreadsheet_id: String) -> Self {
        Self::with_base_url(token, spreadsheet_id, DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(token: String, spreadsheet_id: String, base_url: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("billsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { http, base_url, token, spreadsheet_id }
    }

    fn token(&self) -> Result<&str, SheetError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(SheetError::MissingToken);
        }
        Ok(token)
    }

    fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, SheetError> {
        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().unwrap_or_default();
            return Err(SheetError::Http(status, snippet(&body)));
        }
        Ok(resp)
    }

    /// GET one range of values. Rows may be ragged or absent entirely.
    pub fn get_values(&self, range: &str) -> Result<ValueRange, SheetError> {
        let token = self.token()?.to_string();
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        );

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .map_err(|e| SheetError::Network(e.to_string()))?;
        let resp = Self::check_status(resp)?;

        resp.json::<ValueRange>()
            .map_err(|e| SheetError::Parse(e.to_string()))
    }

    /// POST every column's values in one `values:batchUpdate` call. All
    /// columns land in a single request: bounded API call count, and no
    /// half-written state is ever visible between columns.
    pub fn batch_update(&self, data: Vec<ValueRange>) -> Result<UpdateReport, SheetError> {
        let token = self.token()?.to_string();
        let columns = data.len();
        let url = format!(
            "{}/v4/spreadsheets/{}/values:batchUpdate",
            self.base_url, self.spreadsheet_id
        );

        let body = BatchUpdateBody { value_input_option: "RAW", data };
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .map_err(|e| SheetError::Network(e.to_string()))?;
        let resp = Self::check_status(resp)?;

        let parsed: BatchUpdateResponse =
            resp.json().map_err(|e| SheetError::Parse(e.to_string()))?;
        Ok(UpdateReport { updated_cells: parsed.total_updated_cells, columns })
    }

    /// Read the header row of a sheet tab (row [`HEADER_ROW`]).
    pub fn read_header_row(&self, sheet: &str) -> Result<Vec<String>, SheetError> {
        let range = format!("{}!{}:{}", sheet, HEADER_ROW, HEADER_ROW);
        let mut rows = self.get_values(&range)?.values;
        Ok(if rows.is_empty() { Vec::new() } else { rows.swap_remove(0) })
    }

    /// Read the file-number column: trimmed, empty rows skipped.
    pub fn read_file_column(&self, map: &ColumnMap, sheet: &str) -> Result<Vec<String>, SheetError> {
        let range = map.data_range(sheet, SheetField::File);
        let rows = self.get_values(&range)?.values;
        Ok(rows
            .iter()
            .filter_map(|row| row.first())
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect())
    }

    /// Write every enriched column back in one batched update.
    pub fn upload_enriched(
        &self,
        map: &ColumnMap,
        sheet: &str,
        matters: &[EnrichedMatter],
    ) -> Result<UpdateReport, SheetError> {
        let column =
            |field: SheetField, cell: fn(&EnrichedMatter) -> String| ValueRange {
                range: map.data_range(sheet, field),
                values: matters.iter().map(|m| vec![cell(m)]).collect(),
            };

        let data = vec![
            column(SheetField::Name, |m| m.name().to_string()),
            column(SheetField::Summary, |m| m.summary().to_string()),
            column(SheetField::PrimeSponsor, |m| {
                m.prime_sponsor.clone().unwrap_or_default()
            }),
            column(SheetField::SponsorCount, |m| m.sponsor_count.to_string()),
            column(SheetField::SponsorsNeeded, |m| {
                m.sponsors_remaining_needed.to_string()
            }),
            column(SheetField::SponsorList, |m| {
                m.sponsor_names.iter().cloned().collect::<Vec<_>>().join("\n")
            }),
            column(SheetField::History, |m| m.related_bills.join("\n")),
        ];

        self.batch_update(data)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;
    use billsync_enrich::MatterRecord;
    use httpmock::prelude::*;
    use std::collections::BTreeSet;
    use std::collections::HashMap;

    fn full_headers() -> Vec<String> {
        [
            "File #",
            "Name",
            "Prime Sponsor",
            "Original Summary",
            "# Current Co-Sponsors",
            "# Co-Sponsors Needed",
            "Current Co-Sponsors",
            "Bill History",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn enriched(file: &str) -> EnrichedMatter {
        let mut fields = HashMap::new();
        fields.insert("MatterId".to_string(), "123".to_string());
        fields.insert("MatterFile".to_string(), file.to_string());
        fields.insert("MatterName".to_string(), "Air Quality Act".to_string());
        fields.insert("MatterEXText5".to_string(), "A local law".to_string());
        EnrichedMatter {
            matter: MatterRecord::new(fields),
            prime_sponsor: Some("A".to_string()),
            sponsor_count: 2,
            sponsor_names: ["B", "C"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            sponsors_remaining_needed: 24,
            related_bills: vec!["Int 0026-2023".to_string()],
        }
    }

    #[test]
    fn test_missing_token_before_network() {
        let client =
            SheetsClient::with_base_url("  ".into(), "sheet1".into(), "http://127.0.0.1:1".into());
        assert!(matches!(client.get_values("A1:A"), Err(SheetError::MissingToken)));
        assert!(matches!(client.batch_update(Vec::new()), Err(SheetError::MissingToken)));
    }

    #[test]
    fn test_read_file_column_trims_and_skips_empty() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path_includes("/v4/spreadsheets/sheet1/values/Introductions")
                .path_includes("!A3:A")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(serde_json::json!({
                "range": "Introductions 2024!A3:A",
                "values": [["  Int 0026-2024 "], [], ["Int 0005-2024"], ["   "]]
            }));
        });

        let client = SheetsClient::with_base_url("tok".into(), "sheet1".into(), server.base_url());
        let map = resolve_columns(&full_headers()).unwrap();
        let files = client.read_file_column(&map, "Introductions 2024").unwrap();

        mock.assert();
        assert_eq!(files, vec!["Int 0026-2024", "Int 0005-2024"]);
    }

    #[test]
    fn test_read_header_row_missing_values_key() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path_includes("/v4/spreadsheets/sheet1/values/Introductions")
                .path_includes("!2:2");
            then.status(200)
                .json_body(serde_json::json!({ "range": "Introductions 2024!2:2" }));
        });

        let client = SheetsClient::with_base_url("tok".into(), "sheet1".into(), server.base_url());
        let headers = client.read_header_row("Introductions 2024").unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_upload_is_one_batched_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet1/values:batchUpdate")
                .header("authorization", "Bearer tok")
                .json_body_includes(
                    r#"{
                        "valueInputOption": "RAW",
                        "data": [
                            { "range": "Introductions 2024!B3:B", "values": [["Air Quality Act"]] },
                            { "range": "Introductions 2024!D3:D", "values": [["A local law"]] },
                            { "range": "Introductions 2024!C3:C", "values": [["A"]] },
                            { "range": "Introductions 2024!E3:E", "values": [["2"]] },
                            { "range": "Introductions 2024!F3:F", "values": [["24"]] },
                            { "range": "Introductions 2024!G3:G", "values": [["B\nC"]] },
                            { "range": "Introductions 2024!H3:H", "values": [["Int 0026-2023"]] }
                        ]
                    }"#,
                );
            then.status(200)
                .json_body(serde_json::json!({ "totalUpdatedCells": 7 }));
        });

        let client = SheetsClient::with_base_url("tok".into(), "sheet1".into(), server.base_url());
        let map = resolve_columns(&full_headers()).unwrap();
        let report = client
            .upload_enriched(&map, "Introductions 2024", &[enriched("Int 0026-2024")])
            .unwrap();

        mock.assert();
        assert_eq!(report.updated_cells, 7);
        assert_eq!(report.columns, 7);
    }

    #[test]
    fn test_upstream_error_surfaces_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_includes("/values/");
            then.status(403).body("{\"error\": {\"message\": \"denied\"}}");
        });

        let client = SheetsClient::with_base_url("tok".into(), "sheet1".into(), server.base_url());
        let err = client.get_values("A1:A").unwrap_err();
        assert!(matches!(err, SheetError::Http(403, _)));
    }

    #[test]
    fn test_multibyte_error_body_is_truncated_not_panicked() {
        let server = MockServer::start();
        // 199 ASCII bytes followed by multibyte chars: a naive byte slice
        // at 200 would land inside 'é'.
        let body = format!("{}ééééé", "x".repeat(199));
        server.mock(|when, then| {
            when.method(GET).path_includes("/values/");
            then.status(500).body(body);
        });

        let client = SheetsClient::with_base_url("tok".into(), "sheet1".into(), server.base_url());
        let err = client.get_values("A1:A").unwrap_err();
        match err {
            SheetError::Http(500, msg) => {
                assert_eq!(msg.chars().count(), 200);
                assert!(msg.ends_with('é'));
            }
            other => panic!("expected Http(500, _), got {other:?}"),
        }
    }
}
