//! Per-matter derivation: prime sponsor, sponsorship arithmetic, related bills.

use std::collections::BTreeSet;

use billsync_legistar::{MatterRecord, SponsorRecord};

use crate::model::EnrichedMatter;

/// Seats on the council; a simple majority of these is the quorum default.
pub const COUNCIL_SEATS: usize = 51;

/// Co-sponsors needed before a matter counts as having sufficient support.
pub const QUORUM_THRESHOLD: usize = 26;

/// Combine a matter with its sponsor roster and same-name file numbers.
///
/// Sequence values are compared as the raw wire strings: the prime slot is
/// exactly `"0"`, and duplicate sequence values collapse to one slot.
/// `related` keeps upstream order; the matter's own file number is removed.
pub fn enrich(
    matter: MatterRecord,
    sponsors: &[SponsorRecord],
    related: Vec<String>,
    quorum: usize,
) -> EnrichedMatter {
    let prime_sponsor = sponsors
        .iter()
        .find(|s| s.is_prime())
        .and_then(|s| s.name())
        .map(str::to_string);

    let sponsor_count = sponsors
        .iter()
        .map(|s| s.sequence_raw().unwrap_or_default())
        .collect::<BTreeSet<_>>()
        .len();

    let sponsor_names: BTreeSet<String> = sponsors
        .iter()
        .filter(|s| !s.is_prime())
        .filter_map(|s| s.name())
        .map(str::to_string)
        .collect();

    let own_file = matter.matter_file().unwrap_or_default().to_string();
    let related_bills: Vec<String> =
        related.into_iter().filter(|file| *file != own_file).collect();

    EnrichedMatter {
        matter,
        prime_sponsor,
        sponsor_count,
        sponsor_names,
        sponsors_remaining_needed: quorum.saturating_sub(sponsor_count),
        related_bills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn matter(file: &str, name: &str) -> MatterRecord {
        let mut fields = HashMap::new();
        fields.insert("MatterId".to_string(), "123".to_string());
        fields.insert("MatterFile".to_string(), file.to_string());
        fields.insert("MatterName".to_string(), name.to_string());
        MatterRecord::new(fields)
    }

    fn sponsor(name: &str, seq: &str) -> SponsorRecord {
        let mut fields = HashMap::new();
        fields.insert("MatterSponsorName".to_string(), name.to_string());
        fields.insert("MatterSponsorSequence".to_string(), seq.to_string());
        SponsorRecord::new(fields)
    }

    #[test]
    fn test_reference_scenario() {
        // Int 0026-2024: sponsors 0:A, 1:B, 1:C; related Int 0026-2023.
        let enriched = enrich(
            matter("Int 0026-2024", "Air Quality Act"),
            &[sponsor("A", "0"), sponsor("B", "1"), sponsor("C", "1")],
            vec!["Int 0026-2023".to_string()],
            QUORUM_THRESHOLD,
        );

        assert_eq!(enriched.prime_sponsor.as_deref(), Some("A"));
        assert_eq!(enriched.sponsor_count, 2); // slots {0, 1}
        assert_eq!(
            enriched.sponsor_names,
            ["B", "C"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(enriched.sponsors_remaining_needed, 24);
        assert_eq!(enriched.related_bills, vec!["Int 0026-2023"]);
    }

    #[test]
    fn test_no_prime_sponsor_is_tolerated() {
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &[sponsor("B", "1"), sponsor("C", "2")],
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.prime_sponsor, None);
        assert_eq!(enriched.sponsor_count, 2);
    }

    #[test]
    fn test_prime_excluded_from_names() {
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &[sponsor("A", "0"), sponsor("B", "1")],
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert!(!enriched.sponsor_names.contains("A"));
        assert!(enriched.sponsor_names.contains("B"));
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let sponsors: Vec<SponsorRecord> = (0..30)
            .map(|i| sponsor(&format!("S{i}"), &i.to_string()))
            .collect();
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &sponsors,
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.sponsor_count, 30);
        assert_eq!(enriched.sponsors_remaining_needed, 0);
    }

    #[test]
    fn test_remaining_exact_quorum() {
        let sponsors: Vec<SponsorRecord> = (0..QUORUM_THRESHOLD)
            .map(|i| sponsor(&format!("S{i}"), &i.to_string()))
            .collect();
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &sponsors,
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.sponsors_remaining_needed, 0);
    }

    #[test]
    fn test_own_file_removed_from_related() {
        let enriched = enrich(
            matter("Int 0026-2024", "Act"),
            &[],
            vec![
                "Int 0026-2023".to_string(),
                "Int 0026-2024".to_string(),
                "Int 0026-2022".to_string(),
            ],
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.related_bills, vec!["Int 0026-2023", "Int 0026-2022"]);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &[sponsor("B", "1"), sponsor("B", "2")],
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.sponsor_count, 2);
        assert_eq!(enriched.sponsor_names.len(), 1);
    }

    #[test]
    fn test_missing_sequence_counts_as_one_slot() {
        // Two sponsors with no sequence at all collapse into one "" slot.
        let no_seq = |name: &str| {
            let mut fields = HashMap::new();
            fields.insert("MatterSponsorName".to_string(), name.to_string());
            SponsorRecord::new(fields)
        };
        let enriched = enrich(
            matter("Int 0001-2024", "Act"),
            &[no_seq("B"), no_seq("C")],
            Vec::new(),
            QUORUM_THRESHOLD,
        );
        assert_eq!(enriched.sponsor_count, 1);
        assert_eq!(enriched.sponsor_names.len(), 2);
    }
}
