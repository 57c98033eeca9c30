//! Static tool enhancement: backfill curated metadata from the registry.
//!
//! Pure function over already-normalized data; no network access and no
//! caching of its own.

use std::collections::HashMap;

use tracing::trace;

use crate::data::CatalogEntry;

/// Backfill missing metadata on curated entries from the normalized remote
/// catalog.
///
/// Remote entries are indexed by install command and by lowercase name; a
/// curated entry lacking a homepage is resolved by command first, then by
/// name. Only empty curated fields are filled; existing curated text always
/// wins. Curated entries with no remote counterpart pass through untouched.
#[must_use]
pub fn enhance(curated: Vec<CatalogEntry>, remote: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let by_command: HashMap<&str, &CatalogEntry> = remote
        .iter()
        .map(|e| (e.install_command.as_str(), e))
        .collect();
    let by_name: HashMap<String, &CatalogEntry> = remote
        .iter()
        .map(|e| (e.name.to_lowercase(), e))
        .collect();

    curated
        .into_iter()
        .map(|mut entry| {
            if entry.homepage.as_deref().map_or(true, |h| h.trim().is_empty()) {
                let found = by_command
                    .get(entry.install_command.as_str())
                    .or_else(|| by_name.get(&entry.name.to_lowercase()));
                if let Some(remote_entry) = found {
                    trace!("Enhancing '{}' from '{}'", entry.id, remote_entry.id);
                    entry.homepage = remote_entry.homepage.clone();
                    if entry.description.trim().is_empty()
                        || entry.description == crate::normalize::NO_DESCRIPTION
                    {
                        entry.description = remote_entry.description.clone();
                    }
                    if entry.version.as_deref().map_or(true, |v| v.trim().is_empty()) {
                        entry.version = remote_entry.version.clone();
                    }
                }
            }
            entry
        })
        .collect()
}
