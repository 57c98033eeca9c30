//! Property-based tests for the merge and dedup engine.
//!
//! Random entry lists are generated and the structural invariants of the
//! merged catalog are checked: no duplicate install commands, no duplicate
//! normalized names, stable releases winning over prerelease variants.

use proptest::prelude::*;

use brewdeck::data::{normalize_name, CatalogEntry, CatalogEntryBuilder, Category, EntryKind};
use brewdeck::merge::{dedup_by_name, merge, merge_by_command};

fn arb_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::Curated),
        Just(EntryKind::Formula),
        Just(EntryKind::Cask),
    ]
}

fn arb_entry() -> impl Strategy<Value = CatalogEntry> {
    // small name/token alphabets force frequent collisions
    (
        "[a-d]{1,3}",
        prop::bool::ANY,
        prop::bool::ANY,
        arb_kind(),
    )
        .prop_map(|(token, prerelease, popular, kind)| {
            let command = if prerelease {
                format!("brew install {}-beta", token)
            } else {
                format!("brew install {}", token)
            };
            CatalogEntryBuilder::default()
                .id(format!("{}-{}", kind_label(kind), command.replace(' ', "-")))
                .name(token.to_uppercase())
                .description("A tool")
                .install_command(command)
                .category(Category::Utilities)
                .kind(kind)
                .popular(popular)
                .build()
                .unwrap()
        })
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Curated => "curated",
        EntryKind::Formula => "formula",
        EntryKind::Cask => "cask",
    }
}

proptest! {
    #[test]
    fn merged_commands_are_unique(
        primary in prop::collection::vec(arb_entry(), 0..12),
        secondary in prop::collection::vec(arb_entry(), 0..12),
    ) {
        let merged = merge(primary, secondary);
        let mut commands: Vec<_> = merged.iter().map(|e| e.install_command.clone()).collect();
        commands.sort();
        let before = commands.len();
        commands.dedup();
        prop_assert_eq!(commands.len(), before);
    }

    #[test]
    fn merged_names_are_unique(
        primary in prop::collection::vec(arb_entry(), 0..12),
        secondary in prop::collection::vec(arb_entry(), 0..12),
    ) {
        let merged = merge(primary, secondary);
        let mut names: Vec<_> = merged.iter().map(|e| e.normalized_name()).collect();
        names.sort();
        let before = names.len();
        names.dedup();
        prop_assert_eq!(names.len(), before);
    }

    #[test]
    fn stable_always_beats_prerelease(
        entries in prop::collection::vec(arb_entry(), 0..16),
    ) {
        let had_stable: std::collections::HashSet<String> = entries
            .iter()
            .filter(|e| !e.is_prerelease())
            .map(|e| e.normalized_name())
            .collect();

        for survivor in dedup_by_name(entries) {
            if had_stable.contains(&survivor.normalized_name()) {
                prop_assert!(!survivor.is_prerelease());
            }
        }
    }

    #[test]
    fn merge_with_empty_secondary_is_dedup(
        primary in prop::collection::vec(arb_entry(), 0..16),
    ) {
        let merged = merge(primary.clone(), Vec::new());
        let deduped = dedup_by_name(merge_by_command(primary, Vec::new()));
        prop_assert_eq!(merged, deduped);
    }

    #[test]
    fn dedup_is_order_independent_on_disjoint_commands(
        entries in prop::collection::vec(arb_entry(), 0..10),
    ) {
        // survivors are position-dependent but the surviving SET of
        // normalized names must not depend on input order
        let forward: std::collections::BTreeSet<String> = dedup_by_name(entries.clone())
            .iter()
            .map(|e| e.normalized_name())
            .collect();
        let mut reversed_input = entries;
        reversed_input.reverse();
        let reversed: std::collections::BTreeSet<String> = dedup_by_name(reversed_input)
            .iter()
            .map(|e| e.normalized_name())
            .collect();
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn normalized_names_strip_spacing_variants(name in "[A-Za-z][A-Za-z -]{0,20}") {
        let spaced = normalize_name(&name);
        let hyphened = normalize_name(&name.replace(' ', "-"));
        prop_assert_eq!(spaced, hyphened);
    }
}
