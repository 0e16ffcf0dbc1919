//! In-memory symbol index for fast prefix lookups

use std::collections::btree_map::{BTreeMap, Entry};
use std::ops::Range;
use tracing::{debug, info, warn};

use super::error::{MalformedReason, SymbolError};
use super::normalize::{fold_key, normalize_raw_key};
use super::types::{IndexFragment, SymbolEntry};

/// Summary counters for a built index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of fragments that were merged
    pub fragments: usize,
    /// Number of distinct normalized keys
    pub entries: usize,
    /// Total number of locators across all entries
    pub targets: usize,
    /// Number of entries skipped as malformed
    pub rejected: usize,
}

/// Merged, read-only index over every loaded fragment.
///
/// Keys are kept in a sorted array parallel to the merged entries, so a
/// prefix query is two binary searches followed by a slice.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    /// Sorted normalized keys
    keys: Vec<String>,
    /// Merged entries, `entries[i].key == keys[i]`
    entries: Vec<SymbolEntry>,
    stats: IndexStats,
}

impl SymbolIndex {
    /// Create an index with no entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the merged index from fragments in load order.
    ///
    /// Malformed entries are skipped with a warning.
    pub fn load(fragments: &[IndexFragment]) -> Self {
        Self::load_with_report(fragments).0
    }

    /// Build the merged index and return the rejected entries alongside it.
    pub fn load_with_report(fragments: &[IndexFragment]) -> (Self, Vec<SymbolError>) {
        let mut merged: BTreeMap<String, SymbolEntry> = BTreeMap::new();
        let mut rejected = Vec::new();

        for fragment in fragments {
            debug!(
                "Merging fragment '{}' ({} entries)",
                fragment.name,
                fragment.entries.len()
            );

            for entry in &fragment.entries {
                let key = match validate_entry(&fragment.name, entry) {
                    Ok(key) => key,
                    Err(err) => {
                        warn!("Skipping entry: {}", err);
                        rejected.push(err);
                        continue;
                    }
                };

                match merged.entry(key) {
                    Entry::Vacant(slot) => {
                        let mut merged_entry =
                            SymbolEntry::new(slot.key().clone(), entry.label.clone(), Vec::new());
                        union_targets(&mut merged_entry, entry);
                        slot.insert(merged_entry);
                    }
                    Entry::Occupied(mut slot) => {
                        union_targets(slot.get_mut(), entry);
                    }
                }
            }
        }

        let (keys, entries): (Vec<String>, Vec<SymbolEntry>) = merged.into_iter().unzip();
        let stats = IndexStats {
            fragments: fragments.len(),
            entries: entries.len(),
            targets: entries.iter().map(|e| e.targets.len()).sum(),
            rejected: rejected.len(),
        };

        info!(
            "Built symbol index with {} symbols ({} targets) from {} fragments",
            stats.entries, stats.targets, stats.fragments
        );

        (
            Self {
                keys,
                entries,
                stats,
            },
            rejected,
        )
    }

    /// Entries whose key starts with the normalized `text`, in key order.
    ///
    /// `limit` of `None` returns every match; a negative limit is rejected.
    pub fn query(&self, text: &str, limit: Option<i64>) -> Result<Vec<&SymbolEntry>, SymbolError> {
        let limit = match limit {
            Some(limit) if limit < 0 => return Err(SymbolError::InvalidQuery { limit }),
            Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
            None => usize::MAX,
        };

        let (prefix, range) = self.lookup_range(text);

        debug!(
            "Query '{}' matched {} entries (limit {})",
            prefix,
            range.len(),
            limit
        );

        Ok(self.entries[range].iter().take(limit).collect())
    }

    /// Number of entries a query for `text` would match without a limit
    pub fn match_count(&self, text: &str) -> usize {
        self.lookup_range(text).1.len()
    }

    /// Merged entry for an exact key, if any
    ///
    /// Accepts either a stored key or its escaped form (`image_5fadd`).
    pub fn exact_match(&self, key: &str) -> Option<&SymbolEntry> {
        let folded = fold_key(key);
        self.position(&folded)
            .or_else(|| {
                let decoded = normalize_raw_key(key);
                (decoded != folded).then(|| self.position(&decoded)).flatten()
            })
            .map(|idx| &self.entries[idx])
    }

    /// All entries in key order
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }

    /// Number of merged entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters collected while building the index
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Match `text` case-folded; if nothing matches, retry with `_XX`
    /// escapes decoded.
    fn lookup_range(&self, text: &str) -> (String, Range<usize>) {
        let folded = fold_key(text);
        let range = self.prefix_range(&folded);
        if !range.is_empty() {
            return (folded, range);
        }

        let decoded = normalize_raw_key(text);
        if decoded == folded {
            return (folded, range);
        }
        let range = self.prefix_range(&decoded);
        (decoded, range)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.binary_search_by(|k| k.as_str().cmp(key)).ok()
    }

    fn prefix_range(&self, prefix: &str) -> Range<usize> {
        let start = self.keys.partition_point(|key| key.as_str() < prefix);
        let len = self.keys[start..].partition_point(|key| key.starts_with(prefix));
        start..start + len
    }
}

fn validate_entry(fragment: &str, entry: &SymbolEntry) -> Result<String, SymbolError> {
    let key = normalize_raw_key(entry.key.trim());

    let reason = if key.is_empty() {
        MalformedReason::EmptyKey
    } else if entry.targets.is_empty() {
        MalformedReason::NoTargets
    } else {
        return Ok(key);
    };

    Err(SymbolError::MalformedFragment {
        fragment: fragment.to_string(),
        key: entry.key.clone(),
        reason,
    })
}

/// Append targets not already present, keeping first-seen order.
fn union_targets(into: &mut SymbolEntry, from: &SymbolEntry) {
    for target in &from.targets {
        if !into.targets.contains(target) {
            into.targets.push(target.clone());
        }
    }
}
