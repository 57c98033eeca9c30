//! Core data model for the catalog engine.
//!
//! Everything downstream of the registry fetcher operates on [`CatalogEntry`],
//! the normalized unit of the catalog. Raw registry records live in
//! [`schemas`]; the bundled curated list is loaded by [`loaders`].

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub mod loaders;
pub mod schemas;

/// Fixed category set used for catalog browsing.
///
/// Serialized kebab-case so curated JSON reads naturally
/// (`"dev-tools"`, `"cli-tools"`, ...).
#[derive(Serialize_enum_str, Deserialize_enum_str, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Browsers,
    DevTools,
    DesignTools,
    Communication,
    Productivity,
    Languages,
    Devops,
    Databases,
    Terminal,
    CliTools,
    Media,
    Security,
    Utilities,
    Custom,
}

impl Category {
    /// All categories, in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Browsers,
            Category::DevTools,
            Category::DesignTools,
            Category::Communication,
            Category::Productivity,
            Category::Languages,
            Category::Devops,
            Category::Databases,
            Category::Terminal,
            Category::CliTools,
            Category::Media,
            Category::Security,
            Category::Utilities,
            Category::Custom,
        ]
    }
}

/// Origin discriminator for a catalog entry.
#[derive(
    Serialize_enum_str, Deserialize_enum_str, Debug, Clone, Copy, Eq, PartialEq, Hash, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Hand-authored entry bundled with the application (or user-supplied)
    #[default]
    Curated,
    /// Command-line package record from the remote registry
    Formula,
    /// GUI-application package record from the remote registry
    Cask,
}

/// The normalized unit of the catalog engine.
///
/// Two entries with identical `install_command` describe the same real-world
/// package and must collapse to one in any merged result.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Stable identifier, namespaced by origin (`formula-<name>` / `cask-<token>`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free text, always non-empty after normalization.
    pub description: String,
    /// The exact command string; primary identity key for deduplication.
    pub install_command: String,
    pub category: Category,
    #[serde(default)]
    #[builder(default)]
    pub kind: EntryKind,
    /// On the fixed allow-list of well-known tools, or recent installs above
    /// the popularity cutoff.
    #[serde(default)]
    #[builder(default)]
    pub popular: bool,
    #[serde(default)]
    #[builder(default)]
    pub version: Option<String>,
    #[serde(default)]
    #[builder(default)]
    pub homepage: Option<String>,
    /// Curated entries only: member of the cross-category "editor's picks" view.
    #[serde(default)]
    #[builder(default)]
    pub dev_pick: bool,
}

impl CatalogEntry {
    /// Name identity key: lowercased, spaces and hyphens stripped.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// True if the install identifier indicates a beta/nightly/dev build.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        is_prerelease_command(&self.install_command)
    }
}

impl std::fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.install_command)
    }
}

/// Lowercase a display name and strip spaces and hyphens.
///
/// "Google Chrome", "google-chrome" and "GoogleChrome" all map to the same
/// key, which is what the name-identity dedup pass keys on.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Install-identifier suffixes that mark a prerelease variant.
const PRERELEASE_MARKERS: &[&str] = &[
    "beta", "nightly", "dev", "preview", "alpha", "rc", "canary",
];

/// True if `command` contains a `-<marker>` word for any prerelease marker.
///
/// The marker must be delimited: `firefox-nightly` matches, while
/// `docker-developer` does not (`-dev` is followed by a letter).
#[must_use]
pub fn is_prerelease_command(command: &str) -> bool {
    let lower = command.to_lowercase();
    PRERELEASE_MARKERS.iter().any(|marker| {
        let needle = format!("-{marker}");
        lower.match_indices(&needle).any(|(idx, _)| {
            lower[idx + needle.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, command: &str) -> CatalogEntry {
        CatalogEntryBuilder::default()
            .id(format!("curated-{name}"))
            .name(name)
            .description("A tool")
            .install_command(command)
            .category(Category::Utilities)
            .build()
            .unwrap()
    }

    #[test]
    fn test_normalized_name_strips_spaces_and_hyphens() {
        assert_eq!(normalize_name("Google Chrome"), "googlechrome");
        assert_eq!(normalize_name("google-chrome"), "googlechrome");
        assert_eq!(normalize_name("GoogleChrome"), "googlechrome");
    }

    #[test]
    fn test_prerelease_detection() {
        assert!(is_prerelease_command("brew install --cask firefox-nightly"));
        assert!(is_prerelease_command(
            "brew install --cask visual-studio-code-beta"
        ));
        assert!(is_prerelease_command("brew install node-rc"));
        assert!(!is_prerelease_command("brew install --cask docker"));
        // Marker followed by a letter is part of a longer word, not a variant
        assert!(!is_prerelease_command("brew install docker-developer"));
    }

    #[test]
    fn test_category_serialization_is_kebab_case() {
        assert_eq!(Category::DevTools.to_string(), "dev-tools");
        assert_eq!(Category::CliTools.to_string(), "cli-tools");
        assert_eq!(
            "design-tools".parse::<Category>().unwrap(),
            Category::DesignTools
        );
    }

    #[test]
    fn test_entry_kind_default_is_curated() {
        assert_eq!(EntryKind::default(), EntryKind::Curated);
    }

    #[test]
    fn test_entry_roundtrip() {
        let e = entry("Docker", "brew install --cask docker");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("installCommand"));
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }

    #[test]
    fn test_builder_defaults() {
        let e = entry("Docker", "brew install --cask docker");
        assert_eq!(e.kind, EntryKind::Curated);
        assert!(!e.popular);
        assert!(!e.dev_pick);
        assert!(e.homepage.is_none());
    }
}
