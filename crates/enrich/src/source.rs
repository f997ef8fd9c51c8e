use std::collections::HashMap;

use billsync_legistar::{LegistarClient, LegistarError, MatterRecord, SponsorRecord};

/// Upstream lookups the engine needs. Implemented for [`LegistarClient`];
/// tests drive the engine with an in-memory stub.
pub trait MatterSource {
    /// Resolve file numbers to matter records, keyed by `MatterFile`.
    /// Implementations chunk internally; a missing file is simply absent
    /// from the map (the engine turns that into `Incomplete`).
    fn resolve_by_files(
        &self,
        files: &[String],
    ) -> Result<HashMap<String, MatterRecord>, LegistarError>;

    /// Sponsor roster for a matter, ascending by sequence.
    fn sponsors(&self, matter_id: &str) -> Result<Vec<SponsorRecord>, LegistarError>;

    /// All matters sharing exactly the given name.
    fn matters_by_name(&self, name: &str) -> Result<Vec<MatterRecord>, LegistarError>;
}

impl MatterSource for LegistarClient {
    fn resolve_by_files(
        &self,
        files: &[String],
    ) -> Result<HashMap<String, MatterRecord>, LegistarError> {
        LegistarClient::resolve_by_files(self, files)
    }

    fn sponsors(&self, matter_id: &str) -> Result<Vec<SponsorRecord>, LegistarError> {
        LegistarClient::sponsors(self, matter_id)
    }

    fn matters_by_name(&self, name: &str) -> Result<Vec<MatterRecord>, LegistarError> {
        LegistarClient::matters_by_name(self, name)
    }
}
