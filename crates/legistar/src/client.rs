//! Blocking Legistar HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use crate::record::{MatterRecord, SponsorRecord};
use crate::xml::parse_records;

/// Public Legistar endpoint for the NYC Council matters collection.
pub const DEFAULT_API_BASE: &str = "https://webapi.legistar.com/v1/nyc";

/// Files per resolve query. Legistar rejects over-long `$filter` strings,
/// so file lists are split into OR-combined chunks of this size.
pub const CHUNK_SIZE: usize = 15;

const MATTER_ELEMENT: &str = "GranicusMatter";
const SPONSOR_ELEMENT: &str = "GranicusMatterSponsor";

/// Error type for Legistar operations.
#[derive(Debug)]
pub enum LegistarError {
    /// No API token configured (checked before any network I/O)
    MissingToken,
    /// Network error
    Network(String),
    /// Non-success HTTP status
    Http(u16, String),
    /// XML payload could not be parsed
    Parse(String),
    /// Same file number returned by more than one resolve chunk
    DuplicateFile(String),
}

impl std::fmt::Display for LegistarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegistarError::MissingToken => {
                write!(f, "Legistar API token not configured")
            }
            LegistarError::Network(msg) => write!(f, "Network error: {}", msg),
            LegistarError::Http(code, msg) => {
                write!(f, "Legistar request failed (HTTP {}): {}", code, msg)
            }
            LegistarError::Parse(msg) => write!(f, "Legistar response parse error: {}", msg),
            LegistarError::DuplicateFile(file) => {
                write!(f, "file '{}' returned by more than one resolve chunk", file)
            }
        }
    }
}

impl std::error::Error for LegistarError {}

/// First ~200 chars of an error body, cut on a char boundary so multibyte
/// upstream error pages cannot panic the status path.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(200) {
        Some((end, _)) => trimmed[..end].to_string(),
        None => trimmed.to_string(),
    }
}

/// Legistar API client (blocking).
#[derive(Clone)]
pub struct LegistarClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl LegistarClient {
    /// Create a client against the public NYC endpoint.
    ///
    /// The token may be empty; it is validated on first use so that client
    /// construction never fails, matching the configuration-error contract.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("billsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { http, base_url, token }
    }

    fn token(&self) -> Result<&str, LegistarError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(LegistarError::MissingToken);
        }
        Ok(token)
    }

    /// GET an XML payload, mapping transport and status failures.
    fn get_xml(&self, url: &str, query: &[(&str, &str)]) -> Result<String, LegistarError> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/xml")
            .send()
            .map_err(|e| LegistarError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().unwrap_or_default();
            return Err(LegistarError::Http(status, snippet(&body)));
        }

        resp.text().map_err(|e| LegistarError::Network(e.to_string()))
    }

    /// Resolve file numbers to matter records, keyed by `MatterFile`.
    ///
    /// The input is split into chunks of [`CHUNK_SIZE`] and each chunk is
    /// one filtered query (`MatterFile eq 'a' or MatterFile eq 'b' …`).
    /// Any chunk failure aborts the whole resolution; no partial merge is
    /// returned. Chunks are disjoint, so a file number arriving from two
    /// chunks is an upstream invariant violation, not a silent overwrite.
    pub fn resolve_by_files(
        &self,
        files: &[String],
    ) -> Result<HashMap<String, MatterRecord>, LegistarError> {
        let token = self.token()?.to_string();
        let url = format!("{}/matters", self.base_url);

        let mut by_file: HashMap<String, MatterRecord> = HashMap::new();

        for chunk in files.chunks(CHUNK_SIZE) {
            let filter = chunk
                .iter()
                .map(|file| format!("MatterFile eq '{}'", file))
                .collect::<Vec<_>>()
                .join(" or ");

            let body = self.get_xml(&url, &[("token", &token), ("$filter", &filter)])?;
            let records = parse_records(&body, MATTER_ELEMENT).map_err(LegistarError::Parse)?;

            for fields in records {
                let matter = MatterRecord::new(fields);
                let Some(file) = matter.matter_file() else {
                    continue;
                };
                let file = file.to_string();
                if by_file.insert(file.clone(), matter).is_some() {
                    return Err(LegistarError::DuplicateFile(file));
                }
            }
        }

        Ok(by_file)
    }

    /// Fetch a matter's sponsor roster, ascending by sequence. Missing or
    /// non-numeric sequences sort last.
    pub fn sponsors(&self, matter_id: &str) -> Result<Vec<SponsorRecord>, LegistarError> {
        let token = self.token()?.to_string();
        let url = format!("{}/matters/{}/sponsors", self.base_url, matter_id);

        let body = self.get_xml(&url, &[("token", &token)])?;
        let records = parse_records(&body, SPONSOR_ELEMENT).map_err(LegistarError::Parse)?;

        let mut sponsors: Vec<SponsorRecord> =
            records.into_iter().map(SponsorRecord::new).collect();
        sponsors.sort_by_key(|s| s.sequence());
        Ok(sponsors)
    }

    /// Fetch every matter with exactly the given name (related-bill
    /// discovery: reintroductions keep the name across sessions).
    pub fn matters_by_name(&self, name: &str) -> Result<Vec<MatterRecord>, LegistarError> {
        let token = self.token()?.to_string();
        let url = format!("{}/matters", self.base_url);
        let filter = format!("MatterName eq '{}'", name);

        let body = self.get_xml(&url, &[("token", &token), ("$filter", &filter)])?;
        let records = parse_records(&body, MATTER_ELEMENT).map_err(LegistarError::Parse)?;
        Ok(records.into_iter().map(MatterRecord::new).collect())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
