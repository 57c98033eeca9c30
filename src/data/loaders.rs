// Curated-list loading: bundled data compiled into the binary plus an
// optional user-supplied overlay, merged by entry id.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::data::{CatalogEntry, EntryKind};
use crate::errors::Result;

/// Curated tool list compiled into the binary.
const BUNDLED_TOOLS: &str = include_str!("../../data/curated_tools.json");

/// Load the bundled curated tool list.
///
/// The bundled data is validated by tests, so a parse failure here is a bug;
/// individual malformed records are still dropped with a warning rather than
/// aborting the load.
#[must_use]
pub fn load_bundled_tools() -> Vec<CatalogEntry> {
    let entries = parse_entries(BUNDLED_TOOLS, "bundled");
    debug!("Loaded {} bundled curated tools", entries.len());
    entries
}

/// Load a user curated-tools file (same JSON shape as the bundled list).
pub fn load_user_tools(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read curated tools file: {}", path.display()))?;
    let entries = parse_entries(&content, "user");
    info!(
        "Loaded {} curated tools from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Merge the bundled list with a user overlay.
///
/// User entries override bundled entries with the same id; new ids are
/// appended after the bundled ones.
#[must_use]
pub fn merge_curated(
    bundled: Vec<CatalogEntry>,
    user: Vec<CatalogEntry>,
) -> Vec<CatalogEntry> {
    let mut merged = bundled;
    for entry in user {
        if let Some(existing) = merged.iter_mut().find(|e| e.id == entry.id) {
            debug!("User curated entry '{}' overrides bundled", entry.id);
            *existing = entry;
        } else {
            merged.push(entry);
        }
    }
    merged
}

/// Parse a JSON array of curated entries, dropping malformed records.
///
/// Every surviving entry is forced to [`EntryKind::Curated`] and given a
/// placeholder description if blank, so downstream code can rely on the
/// normalization invariants regardless of what the file said.
fn parse_entries(content: &str, origin: &str) -> Vec<CatalogEntry> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(content) {
        Ok(values) => values,
        Err(e) => {
            warn!("Failed to parse {} curated list: {}", origin, e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(|value| {
            let label = value
                .get("id")
                .and_then(|id| id.as_str())
                .unwrap_or("<missing id>")
                .to_string();
            match serde_json::from_value::<CatalogEntry>(value) {
                Ok(mut entry) => {
                    entry.kind = EntryKind::Curated;
                    if entry.description.trim().is_empty() {
                        entry.description = crate::normalize::NO_DESCRIPTION.to_string();
                    }
                    Some(entry)
                }
                Err(e) => {
                    warn!("Dropping {} curated record '{}': {}", origin, label, e);
                    None
                }
            }
        })
        .collect()
}
