//! Package normalization: raw registry records into [`CatalogEntry`] values.
//!
//! Deprecated and disabled records are filtered out before normalization, so
//! callers never see them. Individual malformed records are dropped from the
//! batch with a warning rather than failing the whole response.

use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::data::schemas::{InstallAnalytics, RawCask, RawFormula};
use crate::data::{Category, CatalogEntry, EntryKind};

/// Placeholder used when a record carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// 30-day install count above which an entry is considered popular.
pub const POPULARITY_INSTALL_CUTOFF: u64 = 1000;

/// Allow-list of well-known identifiers that are always flagged popular,
/// independent of install analytics.
pub const POPULAR_TOOLS: &[&str] = &[
    "git",
    "docker",
    "visual-studio-code",
    "google-chrome",
    "firefox",
    "slack",
    "zoom",
    "notion",
    "figma",
    "spotify",
    "vlc",
    "iterm2",
    "rectangle",
    "raycast",
    "1password",
    "node",
    "python",
    "go",
    "rust",
    "wget",
    "curl",
    "jq",
    "ripgrep",
    "fzf",
    "bat",
    "fd",
    "htop",
    "tmux",
    "neovim",
    "kubectl",
    "terraform",
    "postgresql",
    "mysql",
    "redis",
    "mongodb",
    "openssl",
    "ffmpeg",
    "imagemagick",
    "awscli",
    "gh",
];

/// Parse a formula JSON array and normalize it.
///
/// The array is parsed record by record so one malformed element cannot
/// poison the batch.
#[must_use]
pub fn formulae_from_json(body: &str) -> Vec<CatalogEntry> {
    parse_records::<RawFormula>(body, "formula")
        .into_iter()
        .filter(|raw| !raw.deprecated && !raw.disabled)
        .map(normalize_formula)
        .collect()
}

/// Parse a cask JSON array and normalize it.
#[must_use]
pub fn casks_from_json(body: &str) -> Vec<CatalogEntry> {
    parse_records::<RawCask>(body, "cask")
        .into_iter()
        .filter(|raw| !raw.deprecated && !raw.disabled)
        .map(normalize_cask)
        .collect()
}

/// Normalize one formula record.
#[must_use]
pub fn normalize_formula(raw: RawFormula) -> CatalogEntry {
    let description = clean_description(raw.desc.as_deref());
    let category = classify(&raw.name, &description, EntryKind::Formula);
    let popular = is_popular(&raw.name, raw.analytics.as_ref());
    CatalogEntry {
        id: format!("formula-{}", raw.name),
        install_command: format!("brew install {}", raw.name),
        name: raw.name,
        description,
        category,
        kind: EntryKind::Formula,
        popular,
        version: raw.versions.stable,
        homepage: raw.homepage,
        dev_pick: false,
    }
}

/// Normalize one cask record.
#[must_use]
pub fn normalize_cask(raw: RawCask) -> CatalogEntry {
    let name = raw.display_name().to_string();
    let description = clean_description(raw.desc.as_deref());
    let category = classify(&name, &description, EntryKind::Cask);
    let popular = is_popular(&raw.token, raw.analytics.as_ref());
    CatalogEntry {
        id: format!("cask-{}", raw.token),
        install_command: format!("brew install --cask {}", raw.token),
        name,
        description,
        category,
        kind: EntryKind::Cask,
        popular,
        version: raw.version,
        homepage: raw.homepage,
        dev_pick: false,
    }
}

/// Whether an identifier is popular: on the allow-list, or recent installs
/// above the cutoff. Missing or malformed analytics never make this fail.
#[must_use]
pub fn is_popular(ident: &str, analytics: Option<&InstallAnalytics>) -> bool {
    let lower = ident.to_lowercase();
    if POPULAR_TOOLS.contains(&lower.as_str()) {
        return true;
    }
    analytics
        .and_then(|a| a.recent_installs(ident))
        .map_or(false, |count| count > POPULARITY_INSTALL_CUTOFF)
}

fn clean_description(desc: Option<&str>) -> String {
    match desc {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// Parse a JSON array element-wise, dropping records that fail to parse.
fn parse_records<T: serde::de::DeserializeOwned>(body: &str, kind: &str) -> Vec<T> {
    let values: Vec<Value> = match serde_json::from_str(body) {
        Ok(values) => values,
        Err(e) => {
            warn!("Failed to parse {} response as a JSON array: {}", kind, e);
            return Vec::new();
        }
    };

    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping malformed {} record: {}", kind, e);
                None
            }
        })
        .collect();
    debug!("Parsed {}/{} {} records", records.len(), total, kind);
    records
}
