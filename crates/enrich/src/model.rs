use std::collections::BTreeSet;

use billsync_legistar::MatterRecord;

/// A matter record augmented with derived sponsorship and related-bill data.
///
/// Invariants upheld by the pipeline:
/// - `sponsors_remaining_needed` is never negative (it is unsigned and
///   floored at zero during computation).
/// - `related_bills` never contains the matter's own file number.
/// - A resolved batch contains exactly one enriched record per input file
///   number, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMatter {
    pub matter: MatterRecord,
    /// Name of the sequence-0 sponsor; `None` when upstream data has no
    /// prime entry (tolerated with a warning, never a failure).
    pub prime_sponsor: Option<String>,
    /// Distinct sponsorship slots: the number of distinct raw sequence
    /// values, prime included. Counts slots, not people.
    pub sponsor_count: usize,
    /// Distinct co-sponsor names, prime excluded. BTreeSet for stable
    /// iteration order in output and tests.
    pub sponsor_names: BTreeSet<String>,
    /// Co-sponsors still needed to reach the quorum threshold, floored at 0.
    pub sponsors_remaining_needed: usize,
    /// File numbers of other matters sharing this matter's exact name,
    /// upstream order preserved.
    pub related_bills: Vec<String>,
}

impl EnrichedMatter {
    pub fn file(&self) -> &str {
        self.matter.matter_file().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.matter.matter_name().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.matter.summary().unwrap_or_default()
    }
}
