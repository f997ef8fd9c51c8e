//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad config)   |
//! | 10-19   | legistar         | Upstream legislative API codes           |
//! | 20-29   | sheet            | Spreadsheet boundary codes               |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use billsync_enrich::EnrichError;
use billsync_legistar::LegistarError;
use billsync_sheets::SheetError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options, malformed config.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Legistar (10-19)
// =============================================================================

/// No Legistar API token provided (neither flag nor env var).
pub const EXIT_LEGISTAR_NOT_AUTH: u8 = 10;

/// Token rejected by Legistar (401/403).
pub const EXIT_LEGISTAR_AUTH: u8 = 11;

/// Upstream error (non-success status) or network failure.
pub const EXIT_LEGISTAR_UPSTREAM: u8 = 12;

/// One or more requested file numbers had no upstream record.
pub const EXIT_LEGISTAR_UNRESOLVED: u8 = 13;

/// Legistar payload could not be parsed, or a record lacked a needed field.
pub const EXIT_LEGISTAR_PARSE: u8 = 14;

// =============================================================================
// Sheet (20-29)
// =============================================================================

/// No Sheets access token provided (neither flag nor env var).
pub const EXIT_SHEET_NOT_AUTH: u8 = 20;

/// Required column headers missing from the header row.
pub const EXIT_SHEET_COLUMNS: u8 = 21;

/// Upstream error (non-success status) or network failure.
pub const EXIT_SHEET_UPSTREAM: u8 = 22;

/// Sheets response could not be parsed.
pub const EXIT_SHEET_PARSE: u8 = 23;

/// Required header sits past column Z (single-letter addressing only).
pub const EXIT_SHEET_RANGE: u8 = 24;

// =============================================================================
// Error Type Mapping
// =============================================================================

/// Map a LegistarError to its exit code.
pub fn legistar_exit_code(err: &LegistarError) -> u8 {
    match err {
        LegistarError::MissingToken => EXIT_LEGISTAR_NOT_AUTH,
        LegistarError::Http(401 | 403, _) => EXIT_LEGISTAR_AUTH,
        LegistarError::Http(_, _) | LegistarError::Network(_) => EXIT_LEGISTAR_UPSTREAM,
        LegistarError::Parse(_) => EXIT_LEGISTAR_PARSE,
        LegistarError::DuplicateFile(_) => EXIT_LEGISTAR_UPSTREAM,
    }
}

/// Map an EnrichError to its exit code.
pub fn enrich_exit_code(err: &EnrichError) -> u8 {
    match err {
        EnrichError::Incomplete(_) => EXIT_LEGISTAR_UNRESOLVED,
        EnrichError::MissingField { .. } => EXIT_LEGISTAR_PARSE,
        EnrichError::Source(inner) => legistar_exit_code(inner),
    }
}

/// Map a SheetError to its exit code.
pub fn sheet_exit_code(err: &SheetError) -> u8 {
    match err {
        SheetError::MissingToken => EXIT_SHEET_NOT_AUTH,
        SheetError::MissingColumns(_) => EXIT_SHEET_COLUMNS,
        SheetError::ColumnOutOfRange(_) => EXIT_SHEET_RANGE,
        SheetError::Http(_, _) | SheetError::Network(_) => EXIT_SHEET_UPSTREAM,
        SheetError::Parse(_) => EXIT_SHEET_PARSE,
    }
}
