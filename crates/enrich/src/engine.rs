//! Ordered resolution: file list in, enriched matters out, all-or-nothing.

use crate::enricher::enrich;
use crate::error::EnrichError;
use crate::model::EnrichedMatter;
use crate::source::MatterSource;

/// Resolve and enrich every file number, preserving input order.
///
/// Fails closed: a file with no upstream record, or any sponsor/related
/// lookup failure, aborts the whole run with no partial output. The result
/// has exactly one entry per input file, in input order — the upstream API
/// neither promises request order nor deduplication, so the result map is
/// re-projected through the input list.
pub fn resolve<S: MatterSource>(
    source: &S,
    files: &[String],
    quorum: usize,
) -> Result<Vec<EnrichedMatter>, EnrichError> {
    let mut by_file = source.resolve_by_files(files)?;

    let missing: Vec<String> = files
        .iter()
        .filter(|file| !by_file.contains_key(*file))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(EnrichError::Incomplete(missing));
    }

    let mut enriched = Vec::with_capacity(files.len());
    for file in files {
        // Present: the missing check above covers every input file.
        let matter = by_file
            .remove(file)
            .ok_or_else(|| EnrichError::Incomplete(vec![file.clone()]))?;

        let matter_id = matter
            .matter_id()
            .ok_or_else(|| EnrichError::MissingField { file: file.clone(), field: "MatterId" })?
            .to_string();
        let name = matter
            .matter_name()
            .ok_or_else(|| EnrichError::MissingField { file: file.clone(), field: "MatterName" })?
            .to_string();

        let sponsors = source.sponsors(&matter_id)?;
        if !sponsors.iter().any(|s| s.is_prime()) {
            eprintln!("warning: no prime sponsor found for {}", file);
        }

        let related: Vec<String> = source
            .matters_by_name(&name)?
            .iter()
            .filter_map(|m| m.matter_file())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        enriched.push(enrich(matter, &sponsors, related, quorum));
    }

    Ok(enriched)
}
