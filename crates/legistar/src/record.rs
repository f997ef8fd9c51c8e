//! Wire records returned by the Legistar API.
//!
//! Legistar matters carry dozens of fields and the set varies by body, so
//! records are generic field-name → value maps built from the XML payload,
//! with typed accessors for the handful of fields the pipeline reads.

use std::collections::HashMap;

/// Sort key for sponsors whose sequence is missing or non-numeric.
/// Larger than any real sequence, so malformed entries sort last.
pub const SEQUENCE_SENTINEL: i64 = i64::MAX;

/// One matter (bill/resolution) as returned by the matters endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MatterRecord {
    pub fields: HashMap<String, String>,
}

impl MatterRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Internal numeric key, used for sub-resource fetches.
    pub fn matter_id(&self) -> Option<&str> {
        self.get("MatterId")
    }

    /// Human-readable file number (e.g. "Int 0026-2024").
    pub fn matter_file(&self) -> Option<&str> {
        self.get("MatterFile")
    }

    pub fn matter_name(&self) -> Option<&str> {
        self.get("MatterName")
    }

    /// Original summary text (Legistar stores it in extension field 5).
    pub fn summary(&self) -> Option<&str> {
        self.get("MatterEXText5")
    }
}

/// One sponsor of a matter, ordered by sequence. Sequence 0 is the prime
/// sponsor; sequence values are not guaranteed unique upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct SponsorRecord {
    pub fields: HashMap<String, String>,
}

impl SponsorRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("MatterSponsorName").map(String::as_str)
    }

    /// Raw sequence value as it arrived on the wire.
    pub fn sequence_raw(&self) -> Option<&str> {
        self.fields.get("MatterSponsorSequence").map(String::as_str)
    }

    /// Numeric sequence for sorting; missing or non-numeric values map to
    /// [`SEQUENCE_SENTINEL`].
    pub fn sequence(&self) -> i64 {
        self.sequence_raw()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(SEQUENCE_SENTINEL)
    }

    /// Prime-sponsor check is a string comparison: the wire value is text
    /// and `"00"` is not the same slot as `"0"`.
    pub fn is_prime(&self) -> bool {
        self.sequence_raw() == Some("0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sponsor(pairs: &[(&str, &str)]) -> SponsorRecord {
        SponsorRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_sequence_parses_numeric() {
        let s = sponsor(&[("MatterSponsorSequence", "3")]);
        assert_eq!(s.sequence(), 3);
        assert!(!s.is_prime());
    }

    #[test]
    fn test_sequence_missing_sorts_last() {
        let s = sponsor(&[("MatterSponsorName", "X")]);
        assert_eq!(s.sequence(), SEQUENCE_SENTINEL);
    }

    #[test]
    fn test_sequence_non_numeric_sorts_last() {
        let s = sponsor(&[("MatterSponsorSequence", "n/a")]);
        assert_eq!(s.sequence(), SEQUENCE_SENTINEL);
    }

    #[test]
    fn test_prime_is_string_comparison() {
        assert!(sponsor(&[("MatterSponsorSequence", "0")]).is_prime());
        assert!(!sponsor(&[("MatterSponsorSequence", "00")]).is_prime());
        assert!(!sponsor(&[("MatterSponsorSequence", "")]).is_prime());
    }
}
