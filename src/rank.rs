//! Ranking engine.
//!
//! Two mutually exclusive modes per query. With an active search string the
//! whole candidate set is fuzzy-matched and re-sorted by match quality; with
//! no search the set is sorted popular-first and truncated to a windowed
//! showcase view unless the caller asked for everything.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::debug;

use crate::data::CatalogEntry;
use crate::merge::dedup_by_name;

/// Shortest trimmed search string that engages fuzzy matching.
pub const MIN_QUERY_LEN: usize = 2;

/// Score floor per query character. Skim awards roughly 16 points per
/// matched character before bonuses, so this admits loose matches while
/// rejecting coincidental scattered subsequences.
const MIN_SCORE_PER_CHAR: i64 = 8;

const NAME_WEIGHT: i64 = 2;
const DESC_WEIGHT: i64 = 1;

/// Window sizes for the default (no-search) view.
#[derive(Debug, Clone, Copy)]
pub struct WindowPolicy {
    /// Popular count at which the view narrows to popular entries only.
    pub popular_floor: usize,
    /// Cap on the popular-only view.
    pub popular_cap: usize,
    /// Size of the fallback window when too few entries are popular.
    pub default_window: usize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            popular_floor: 10,
            popular_cap: 50,
            default_window: 30,
        }
    }
}

/// Rank a deduplicated candidate set for display.
///
/// A trimmed search string of at least [`MIN_QUERY_LEN`] characters selects
/// fuzzy ranking; anything shorter (including whitespace-only input) is
/// treated as no search at all.
#[must_use]
pub fn rank(
    entries: Vec<CatalogEntry>,
    search: &str,
    show_all: bool,
    windows: &WindowPolicy,
) -> Vec<CatalogEntry> {
    let query = search.trim();
    if query.chars().count() >= MIN_QUERY_LEN {
        fuzzy_rank(entries, query)
    } else {
        windowed(entries, show_all, windows)
    }
}

/// Weighted fuzzy ranking over name and description.
#[must_use]
pub fn fuzzy_rank(entries: Vec<CatalogEntry>, query: &str) -> Vec<CatalogEntry> {
    let matcher = SkimMatcherV2::default().smart_case();
    let min_score = MIN_SCORE_PER_CHAR * query.chars().count() as i64;

    let mut matched: Vec<CatalogEntry> = entries
        .into_iter()
        .filter(|entry| {
            let name_score = matcher.fuzzy_match(&entry.name, query).unwrap_or(0) * NAME_WEIGHT;
            let desc_score =
                matcher.fuzzy_match(&entry.description, query).unwrap_or(0) * DESC_WEIGHT;
            name_score.max(desc_score) >= min_score
        })
        .collect();
    debug!("Fuzzy query '{}' matched {} entries", query, matched.len());

    let query_lower = query.to_lowercase();
    matched.sort_by_cached_key(|entry| {
        let name_lower = entry.name.to_lowercase();
        (
            name_lower != query_lower,
            !starts_with_query(&name_lower, &query_lower),
            !entry.popular,
            name_lower,
        )
    });
    matched
}

/// Whether the name, or any word of it, starts with the query. Both
/// arguments are expected lowercased.
fn starts_with_query(name: &str, query: &str) -> bool {
    name.starts_with(query) || name.split_whitespace().any(|word| word.starts_with(query))
}

/// Popular-first alphabetical ordering, truncated to the showcase window
/// unless `show_all`.
#[must_use]
pub fn windowed(
    mut entries: Vec<CatalogEntry>,
    show_all: bool,
    windows: &WindowPolicy,
) -> Vec<CatalogEntry> {
    entries.sort_by_cached_key(|entry| (!entry.popular, entry.name.to_lowercase()));
    if show_all {
        return entries;
    }

    let popular_count = entries.iter().filter(|e| e.popular).count();
    if popular_count >= windows.popular_floor {
        entries.retain(|e| e.popular);
        entries.truncate(windows.popular_cap);
    } else {
        entries.truncate(windows.default_window);
    }
    entries
}

/// Cross-cutting editor's picks view over the curated list.
#[must_use]
pub fn editors_picks(
    curated: &[CatalogEntry],
    show_all: bool,
    windows: &WindowPolicy,
) -> Vec<CatalogEntry> {
    let picks: Vec<CatalogEntry> = curated.iter().filter(|e| e.dev_pick).cloned().collect();
    windowed(dedup_by_name(picks), show_all, windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, CatalogEntryBuilder, EntryKind};

    fn entry(name: &str, description: &str, popular: bool) -> CatalogEntry {
        CatalogEntryBuilder::default()
            .id(name.to_lowercase().replace(' ', "-"))
            .name(name)
            .description(description)
            .install_command(format!(
                "brew install {}",
                name.to_lowercase().replace(' ', "-")
            ))
            .category(Category::Utilities)
            .kind(EntryKind::Formula)
            .popular(popular)
            .build()
            .unwrap()
    }

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_starts_with_beats_plain_fuzzy() {
        let catalog = vec![
            entry("Chroma Render", "Color grading suite with Chrome key effects", false),
            entry("Google Chrome", "Web browser", true),
            entry("Chromium", "Open-source base of the Chrome browser", true),
            entry("bat", "Cat clone with wings", true),
        ];

        let ranked = fuzzy_rank(catalog, "chrome");
        assert_eq!(
            names(&ranked),
            vec!["Google Chrome", "Chromium", "Chroma Render"]
        );
    }

    #[test]
    fn test_exact_name_match_first() {
        let catalog = vec![
            entry("GitHub Desktop", "GitHub client", true),
            entry("Gitui", "Terminal UI for git", false),
            entry("git", "Version control system", true),
        ];

        let ranked = fuzzy_rank(catalog, "git");
        assert_eq!(ranked[0].name, "git");
    }

    #[test]
    fn test_unrelated_entries_rejected() {
        let catalog = vec![
            entry("Firefox", "Web browser", true),
            entry("htop", "Process viewer", false),
        ];
        let ranked = fuzzy_rank(catalog, "firefox");
        assert_eq!(names(&ranked), vec!["Firefox"]);
    }

    #[test]
    fn test_short_query_falls_back_to_windowed() {
        let catalog = vec![
            entry("zoxide", "Smarter cd", false),
            entry("bat", "Cat clone", true),
        ];
        let ranked = rank(catalog, " g ", false, &WindowPolicy::default());
        assert_eq!(names(&ranked), vec!["bat", "zoxide"]);
    }

    #[test]
    fn test_sparse_popularity_keeps_first_thirty() {
        let mut catalog: Vec<CatalogEntry> = (1..=40)
            .map(|i| entry(&format!("tool-{:02}", i), "A tool", i <= 3))
            .collect();
        catalog.reverse();

        let ranked = windowed(catalog, false, &WindowPolicy::default());
        assert_eq!(ranked.len(), 30);
        assert_eq!(names(&ranked[..4]), vec!["tool-01", "tool-02", "tool-03", "tool-04"]);
    }

    #[test]
    fn test_dense_popularity_keeps_popular_only() {
        let catalog: Vec<CatalogEntry> = (1..=60)
            .map(|i| entry(&format!("tool-{:02}", i), "A tool", i <= 12))
            .collect();

        let ranked = windowed(catalog, false, &WindowPolicy::default());
        assert_eq!(ranked.len(), 12);
        assert!(ranked.iter().all(|e| e.popular));
    }

    #[test]
    fn test_popular_cap_applies() {
        let catalog: Vec<CatalogEntry> = (1..=55)
            .map(|i| entry(&format!("tool-{:02}", i), "A tool", true))
            .collect();

        let ranked = windowed(catalog, false, &WindowPolicy::default());
        assert_eq!(ranked.len(), 50);
    }

    #[test]
    fn test_show_all_bypasses_window() {
        let catalog: Vec<CatalogEntry> = (1..=40)
            .map(|i| entry(&format!("tool-{:02}", i), "A tool", false))
            .collect();
        assert_eq!(windowed(catalog, true, &WindowPolicy::default()).len(), 40);
    }

    #[test]
    fn test_editors_picks_filters_and_dedups() {
        let mut pick = entry("Raycast", "Launcher", true);
        pick.kind = EntryKind::Curated;
        pick.dev_pick = true;
        let mut pick_dup = entry("raycast", "Launcher again", false);
        pick_dup.kind = EntryKind::Curated;
        pick_dup.dev_pick = true;
        pick_dup.install_command = "brew install --cask raycast-v2".into();
        let plain = entry("wget", "Downloader", true);

        let picks = editors_picks(&[pick.clone(), pick_dup, plain], false, &WindowPolicy::default());
        assert_eq!(picks, vec![pick]);
    }
}
