//! Merge & dedup engine.
//!
//! Two passes: a command-identity merge in which primary entries win ties,
//! then a name-identity dedup that never keeps two entries for what is
//! recognizably the same product. The name pass groups all variants per
//! normalized name before choosing, so the outcome does not depend on the
//! order entries arrive in: a stable release wins over its prerelease
//! variant wherever it sits in the input.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::data::{CatalogEntry, EntryKind};

/// Merge two entry lists, primary entries winning command-identity ties,
/// then dedup by normalized name.
#[must_use]
pub fn merge(primary: Vec<CatalogEntry>, secondary: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    dedup_by_name(merge_by_command(primary, secondary))
}

/// Command-identity merge: all primary entries, then those secondary entries
/// whose install command is not already present. Relative order within each
/// list is preserved.
#[must_use]
pub fn merge_by_command(
    primary: Vec<CatalogEntry>,
    secondary: Vec<CatalogEntry>,
) -> Vec<CatalogEntry> {
    let mut seen: HashSet<String> = HashSet::with_capacity(primary.len());
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());

    for entry in primary {
        if seen.insert(entry.install_command.clone()) {
            merged.push(entry);
        }
    }
    for entry in secondary {
        if seen.insert(entry.install_command.clone()) {
            merged.push(entry);
        } else {
            trace!("Dropping '{}': command already present", entry.id);
        }
    }
    merged
}

/// Name-identity dedup: at most one entry per normalized name survives.
///
/// Within a name group the best variant wins: stable over prerelease, then
/// curated over remote, then whichever came first. Survivors keep the
/// position where their group first appeared.
#[must_use]
pub fn dedup_by_name(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    // group index in `kept` per normalized name
    let mut slot: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    let mut kept: Vec<CatalogEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        let key = entry.normalized_name();
        match slot.get(&key) {
            None => {
                slot.insert(key, kept.len());
                kept.push(entry);
            }
            Some(&idx) => {
                if beats(&entry, &kept[idx]) {
                    trace!("'{}' replaces '{}' in name group", entry.id, kept[idx].id);
                    kept[idx] = entry;
                }
            }
        }
    }
    kept
}

/// Whether `challenger` should replace the already-kept `incumbent` within a
/// normalized-name group.
fn beats(challenger: &CatalogEntry, incumbent: &CatalogEntry) -> bool {
    match (challenger.is_prerelease(), incumbent.is_prerelease()) {
        (false, true) => true,
        (true, false) => false,
        // equal prerelease status: curated wins over remote; an equal-rank
        // challenger loses to the earlier entry
        _ => {
            challenger.kind == EntryKind::Curated && incumbent.kind != EntryKind::Curated
        }
    }
}
