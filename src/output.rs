//! Output formatting: colored message helpers and catalog result tables.

use colored::Colorize;
use tabular::{Row, Table};

use crate::data::CatalogEntry;

/// Print a success message in green with a checkmark.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message in red with an X mark.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message in yellow with a warning sign.
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an info message in blue with an info icon.
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Format a package name with emphasis.
#[must_use]
pub fn package_name(name: &str) -> String {
    name.cyan().to_string()
}

/// Format a count with emphasis.
#[must_use]
pub fn count(n: usize) -> String {
    n.to_string().bold().to_string()
}

/// Build a result table: popularity marker, name, category, install command.
#[must_use]
pub fn entry_table(entries: &[CatalogEntry]) -> Table {
    let mut table = Table::new("{:<} {:<}  {:<}  {:<}");
    for entry in entries {
        let marker = if entry.popular { "★" } else { " " };
        table.add_row(
            Row::new()
                .with_cell(marker)
                .with_cell(&entry.name)
                .with_cell(entry.category.to_string())
                .with_cell(&entry.install_command),
        );
    }
    table
}

/// Multi-line detail block for a single entry.
#[must_use]
pub fn entry_detail(entry: &CatalogEntry) -> String {
    let mut lines = vec![
        format!("{}", entry.name.cyan().bold()),
        format!("  {}", entry.description),
        format!("  Category: {}", entry.category),
        format!("  Install:  {}", entry.install_command),
    ];
    if let Some(version) = &entry.version {
        lines.push(format!("  Version:  {}", version));
    }
    if let Some(homepage) = &entry.homepage {
        lines.push(format!("  Homepage: {}", homepage));
    }
    if entry.popular {
        lines.push(format!("  {}", "Popular".yellow()));
    }
    if entry.dev_pick {
        lines.push(format!("  {}", "Editor's pick".green()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, CatalogEntryBuilder, EntryKind};

    fn sample() -> CatalogEntry {
        CatalogEntryBuilder::default()
            .id("formula-ripgrep")
            .name("ripgrep")
            .description("Line-oriented search tool")
            .install_command("brew install ripgrep")
            .category(Category::CliTools)
            .kind(EntryKind::Formula)
            .popular(true)
            .version(Some("14.1.0".to_string()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_entry_table_lists_rows() {
        let rendered = entry_table(&[sample()]).to_string();
        assert!(rendered.contains("ripgrep"));
        assert!(rendered.contains("brew install ripgrep"));
    }

    #[test]
    fn test_entry_detail_includes_version() {
        let detail = entry_detail(&sample());
        assert!(detail.contains("Line-oriented search tool"));
        assert!(detail.contains("14.1.0"));
    }

    #[test]
    fn test_package_name_format() {
        assert!(package_name("fzf").contains("fzf"));
    }

    #[test]
    fn test_count_format() {
        assert!(count(42).contains("42"));
    }
}
