//! Heuristic category classifier.
//!
//! Categories are assigned by an ordered table of pattern rules evaluated in
//! sequence; the first rule with a pattern found in the entry's name or
//! description wins. The table form keeps the heuristics testable and easy to
//! extend compared with a branch ladder.

use crate::data::{Category, EntryKind};

/// One classification rule: if any pattern occurs in the lowercased name or
/// description, the entry belongs to `category`.
pub struct ClassifyRule {
    pub category: Category,
    pub patterns: &'static [&'static str],
}

/// Ordered rule table. Earlier rules win, so the more specific categories
/// come before the catch-all ones (a "database browser" is a database tool,
/// not a browser, so the browser patterns name concrete products).
pub const RULES: &[ClassifyRule] = &[
    ClassifyRule {
        category: Category::Browsers,
        patterns: &[
            "web browser", "chrome", "chromium", "firefox", "safari", "vivaldi", "brave",
            "opera",
        ],
    },
    ClassifyRule {
        category: Category::DevTools,
        patterns: &[
            "editor", " ide ", " git ", "debug", "develop", "code review", "api client",
            "language server",
        ],
    },
    ClassifyRule {
        category: Category::DesignTools,
        patterns: &[
            "design", "sketch", "vector", "illustrat", "photo edit", "prototyp", "wireframe",
            "color picker",
        ],
    },
    ClassifyRule {
        category: Category::Communication,
        patterns: &[
            "chat", "messag", "video call", "conferenc", "meeting", "email", "mail client",
            "voip",
        ],
    },
    ClassifyRule {
        category: Category::Productivity,
        patterns: &[
            "notes", "note-taking", "task", "todo", "calendar", "productivity", "workspace",
            "launcher", "time track",
        ],
    },
    ClassifyRule {
        category: Category::Languages,
        patterns: &[
            "programming language", "language runtime", "interpreter", "compiler",
            "javascript runtime", "toolchain",
        ],
    },
    ClassifyRule {
        category: Category::Devops,
        patterns: &[
            "kubernetes", "container", "docker", "deploy", "infrastructure", "provision",
            "orchestrat", "cloud platform", "ci/cd",
        ],
    },
    ClassifyRule {
        category: Category::Databases,
        patterns: &[
            "database", "sql", "postgres", "mysql", "redis", "mongo", "key-value store",
        ],
    },
    ClassifyRule {
        category: Category::Terminal,
        patterns: &["terminal", "shell", "multiplexer", "console", "prompt"],
    },
    ClassifyRule {
        category: Category::CliTools,
        patterns: &["command-line", "command line", " cli "],
    },
    ClassifyRule {
        category: Category::Media,
        patterns: &[
            "media player", "video", "audio", "music", "podcast", "stream", "screenshot",
            "screen record", "image",
        ],
    },
    ClassifyRule {
        category: Category::Security,
        patterns: &[
            "password", "security", "encrypt", "vpn", "firewall", "antivirus", "authenticat",
            "secrets",
        ],
    },
    ClassifyRule {
        category: Category::Utilities,
        patterns: &[
            "utility", "menu bar", "monitor", "cleaner", "uninstall", "backup", "archive",
            "compress", "clipboard",
        ],
    },
];

/// Classify an entry by name and description.
///
/// Falls back by origin when no rule matches: formulae are command-line tools,
/// casks are general utilities.
#[must_use]
pub fn classify(name: &str, description: &str, kind: EntryKind) -> Category {
    // Padded so word-delimited patterns like " git " match at either end.
    let haystack = format!(" {} {} ", name.to_lowercase(), description.to_lowercase());
    for rule in RULES {
        if rule.patterns.iter().any(|p| haystack.contains(p)) {
            return rule.category;
        }
    }
    match kind {
        EntryKind::Formula => Category::CliTools,
        EntryKind::Cask => Category::Utilities,
        EntryKind::Curated => Category::Custom,
    }
}
