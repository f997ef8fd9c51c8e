//! Legistar web API client — shared between the sync pipeline and the CLI.
//!
//! This crate is the single source of truth for the Legistar wire contract:
//! resolve file numbers to matters, fetch a matter's sponsor roster, and
//! look up matters by name for related-bill discovery.
//!
//! Blocking reqwest client (no Tokio runtime required). No retries: a
//! non-success upstream status fails the whole operation, and a manual
//! rerun is expected.

mod client;
mod record;
mod xml;

pub use client::{LegistarClient, LegistarError, CHUNK_SIZE};
pub use record::{MatterRecord, SponsorRecord, SEQUENCE_SENTINEL};
