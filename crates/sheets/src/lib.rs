//! Spreadsheet boundary for the sync pipeline.
//!
//! The tracking sheet is schema-by-convention: header text on row 2 names
//! each column, data starts on row 3. This crate resolves that header row
//! into an explicit column map once per run, reads the file-number column,
//! and writes every enriched column back in one batched update.

mod client;
mod columns;

pub use client::{SheetsClient, UpdateReport, ValueRange};
pub use columns::{
    resolve_columns, sheet_name, ColumnMap, SheetError, SheetField, DATA_START_ROW, HEADER_ROW,
};
