//! `billsync-enrich` — Matter enrichment pipeline.
//!
//! Pure pipeline crate: drives any [`MatterSource`] to resolve a list of
//! file numbers into enriched matter records, in input order, all-or-nothing.
//! No CLI or sheet dependencies.

pub mod engine;
pub mod enricher;
pub mod error;
pub mod model;
pub mod source;

pub use billsync_legistar::{MatterRecord, SponsorRecord};
pub use engine::resolve;
pub use enricher::{enrich, COUNCIL_SEATS, QUORUM_THRESHOLD};
pub use error::EnrichError;
pub use model::EnrichedMatter;
pub use source::MatterSource;
