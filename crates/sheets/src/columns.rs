//! Header-driven column mapping.

use std::collections::HashMap;

/// Row holding the header text.
pub const HEADER_ROW: u32 = 2;

/// First data row (immediately below the headers).
pub const DATA_START_ROW: u32 = 3;

/// Tab name for a session year's introductions.
pub fn sheet_name(year: &str) -> String {
    format!("Introductions {}", year)
}

/// The closed set of logical columns the pipeline reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetField {
    /// File number — the identifier used for Legistar resolution.
    File,
    Name,
    PrimeSponsor,
    Summary,
    SponsorCount,
    SponsorsNeeded,
    SponsorList,
    History,
}

impl SheetField {
    pub const ALL: [SheetField; 8] = [
        SheetField::File,
        SheetField::Name,
        SheetField::PrimeSponsor,
        SheetField::Summary,
        SheetField::SponsorCount,
        SheetField::SponsorsNeeded,
        SheetField::SponsorList,
        SheetField::History,
    ];

    /// Exact header text expected on [`HEADER_ROW`].
    pub fn header(&self) -> &'static str {
        match self {
            SheetField::File => "File #",
            SheetField::Name => "Name",
            SheetField::PrimeSponsor => "Prime Sponsor",
            SheetField::Summary => "Original Summary",
            SheetField::SponsorCount => "# Current Co-Sponsors",
            SheetField::SponsorsNeeded => "# Co-Sponsors Needed",
            SheetField::SponsorList => "Current Co-Sponsors",
            SheetField::History => "Bill History",
        }
    }
}

/// Error type for sheet operations.
#[derive(Debug)]
pub enum SheetError {
    /// No access token configured (checked before any network I/O)
    MissingToken,
    /// Required headers absent from the header row — all reported together
    MissingColumns(Vec<String>),
    /// Header found past column Z; only single-letter addresses are supported
    ColumnOutOfRange(usize),
    /// Network error
    Network(String),
    /// Non-success HTTP status
    Http(u16, String),
    /// Response body could not be parsed
    Parse(String),
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::MissingToken => write!(f, "Sheets access token not configured"),
            SheetError::MissingColumns(names) => {
                write!(
                    f,
                    "column header(s) not found in row {}: {}",
                    HEADER_ROW,
                    names.join(", ")
                )
            }
            SheetError::ColumnOutOfRange(index) => {
                write!(f, "column index {} is past 'Z'; only columns A-Z are supported", index)
            }
            SheetError::Network(msg) => write!(f, "Network error: {}", msg),
            SheetError::Http(code, msg) => {
                write!(f, "Sheets request failed (HTTP {}): {}", code, msg)
            }
            SheetError::Parse(msg) => write!(f, "Sheets response parse error: {}", msg),
        }
    }
}

impl std::error::Error for SheetError {}

/// Column letters for every logical field, resolved once per run from the
/// header row and passed around as a value.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    letters: HashMap<SheetField, char>,
}

impl ColumnMap {
    pub fn letter(&self, field: SheetField) -> char {
        // resolve_columns only constructs complete maps
        self.letters[&field]
    }

    /// Open-ended data range for one column, e.g. `Introductions 2024!C3:C`.
    pub fn data_range(&self, sheet: &str, field: SheetField) -> String {
        let letter = self.letter(field);
        format!("{}!{}{}:{}", sheet, letter, DATA_START_ROW, letter)
    }
}

/// Zero-based column index to letter. Single letters only: the tracking
/// sheet has 8 columns of interest, and multi-letter addressing is a known
/// non-feature rather than a silent extension.
fn column_letter(index: usize) -> Result<char, SheetError> {
    if index > 25 {
        return Err(SheetError::ColumnOutOfRange(index));
    }
    Ok((b'A' + index as u8) as char)
}

/// Map every required header to its column letter.
///
/// All missing headers are collected and reported together, so one fix-up
/// pass on the sheet suffices.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnMap, SheetError> {
    let mut letters = HashMap::new();
    let mut missing = Vec::new();

    for field in SheetField::ALL {
        match headers.iter().position(|h| h == field.header()) {
            Some(index) => {
                letters.insert(field, column_letter(index)?);
            }
            None => missing.push(field.header().to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(SheetError::MissingColumns(missing));
    }

    Ok(ColumnMap { letters })
}
