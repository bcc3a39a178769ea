//! Priority classification and ordering of collected files.
//!
//! Every file lands in exactly one [`PriorityTier`]. Root-doc name matches win
//! over extension matches; the remainder bucket holds whitelisted files that
//! no tier claims.

use crate::domain::rules::{
    is_root_doc_name, CONFIG_TIER_EXTENSIONS, DOCS_TIER_EXTENSIONS, FRONTEND_TIER_EXTENSIONS,
    SOURCE_TIER_EXTENSIONS,
};
use crate::domain::{FileRef, PriorityTier};
use std::cmp::Ordering;

/// Tier for a single file.
pub fn classify_tier(file: &FileRef) -> PriorityTier {
    if is_root_doc_name(file.file_name()) {
        return PriorityTier::RootDoc;
    }

    let ext = file.extension_key();
    let ext = ext.as_str();
    if SOURCE_TIER_EXTENSIONS.contains(&ext) {
        PriorityTier::Source
    } else if CONFIG_TIER_EXTENSIONS.contains(&ext) {
        PriorityTier::Config
    } else if DOCS_TIER_EXTENSIONS.contains(&ext) {
        PriorityTier::Docs
    } else if FRONTEND_TIER_EXTENSIONS.contains(&ext) {
        PriorityTier::Frontend
    } else {
        PriorityTier::Unranked
    }
}

/// Ordering inside one tier.
///
/// Root docs sort by file name; every other tier by `(depth, file name)`.
/// The relative path breaks remaining ties so the order is total.
fn compare_within_tier(tier: PriorityTier, a: &FileRef, b: &FileRef) -> Ordering {
    let primary = match tier {
        PriorityTier::RootDoc => a.file_name().cmp(b.file_name()),
        _ => a.depth().cmp(&b.depth()).then_with(|| a.file_name().cmp(b.file_name())),
    };
    primary.then_with(|| a.relative_path.cmp(&b.relative_path))
}

/// Order files for corpus emission: by tier, then by the in-tier rule.
///
/// The result does not depend on the input order.
pub fn prioritize_files(files: Vec<FileRef>) -> Vec<FileRef> {
    let mut tiered: Vec<(PriorityTier, FileRef)> =
        files.into_iter().map(|file| (classify_tier(&file), file)).collect();
    tiered.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_a.cmp(tier_b).then_with(|| compare_within_tier(*tier_a, a, b))
    });
    tiered.into_iter().map(|(_, file)| file).collect()
}

/// Number of files per tier, in tier order, omitting empty tiers.
pub fn tier_counts(files: &[FileRef]) -> Vec<(PriorityTier, usize)> {
    PriorityTier::ALL
        .iter()
        .map(|tier| (*tier, files.iter().filter(|f| classify_tier(f) == *tier).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
