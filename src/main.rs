use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use brewdeck::data::{CatalogEntry, Category};
use brewdeck::output;
use brewdeck::query::CatalogQuery;
use brewdeck::registry::HttpTransport;
use brewdeck::script_generator::{ScriptFormat, ScriptGenerator};
use brewdeck::Settings;

/// Browse and search a merged catalog of curated developer tools and the
/// Homebrew registries.
#[derive(Parser)]
#[clap(author, version = clap::crate_version!(), max_term_width = 100, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Increase logging level (-v: info, -vv: debug, -vvv: trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit results as JSON instead of a table
    #[clap(long, global = true)]
    json: bool,

    /// Path to custom config file
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy-search the whole catalog
    Search {
        /// Search text (two characters minimum for fuzzy matching)
        query: String,

        /// Restrict the search to one category
        #[clap(short = 'C', long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Browse a category
    Browse {
        /// Category to list
        #[clap(value_parser = parse_category)]
        category: Category,

        /// List everything instead of the popularity window
        #[clap(short, long)]
        all: bool,
    },
    /// List the most popular tools across the catalog
    Popular {
        /// Maximum number of entries
        #[clap(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List the editor's picks from the curated list
    Picks {
        /// List everything instead of the popularity window
        #[clap(short, long)]
        all: bool,
    },
    /// Show details for one catalog entry
    Info {
        /// Entry id (e.g. `formula-ripgrep`) or display name
        entry: String,
    },
    /// Invalidate the registry cache and re-fetch
    Refresh,
    /// Generate a reviewable install script for selected entries
    Script {
        /// Entry ids or display names to include
        entries: Vec<String>,

        /// Script format (auto-detects based on platform)
        #[clap(long, value_enum, default_value = "auto")]
        format: ScriptFormatOption,

        /// Output directory for the generated script
        #[clap(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Script format options for the CLI
#[derive(Clone, ValueEnum, Debug)]
enum ScriptFormatOption {
    /// Auto-detect based on platform (PowerShell on Windows, Shell elsewhere)
    Auto,
    /// Force shell script (.sh)
    Shell,
    /// Force PowerShell script (.ps1)
    PowerShell,
}

impl ScriptFormatOption {
    fn to_script_format(&self) -> ScriptFormat {
        match self {
            ScriptFormatOption::Auto => ScriptFormat::auto_detect(),
            ScriptFormatOption::Shell => ScriptFormat::Shell,
            ScriptFormatOption::PowerShell => ScriptFormat::PowerShell,
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|_| {
        let known: Vec<String> = Category::all().iter().map(|c| c.to_string()).collect();
        format!("unknown category '{}' (known: {})", s, known.join(", "))
    })
}

fn print_entries(entries: &[CatalogEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else if entries.is_empty() {
        output::info("No matching entries");
    } else {
        print!("{}", output::entry_table(entries));
        println!("{} entries", output::count(entries.len()));
    }
    Ok(())
}

fn warn_if_degraded(catalog: &CatalogQuery<HttpTransport>) {
    if let Some(message) = catalog.last_error() {
        output::warning(&format!(
            "Registry unavailable ({message}); showing cached or curated data"
        ));
    }
}

async fn find_entry(
    catalog: &CatalogQuery<HttpTransport>,
    needle: &str,
) -> Option<CatalogEntry> {
    let merged = catalog.query("", None, true).await;
    merged
        .iter()
        .find(|e| e.id == needle)
        .or_else(|| {
            merged
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(needle))
        })
        .cloned()
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Settings::load().context("Failed to load settings")?,
    };
    debug!("Settings loaded");

    let catalog = CatalogQuery::from_settings(&settings)?;

    match &cli.command {
        Commands::Search { query, category } => {
            let results = catalog.query(query, *category, false).await;
            warn_if_degraded(&catalog);
            print_entries(&results, cli.json)?;
        }
        Commands::Browse { category, all } => {
            let results = catalog.query("", Some(*category), *all).await;
            warn_if_degraded(&catalog);
            print_entries(&results, cli.json)?;
        }
        Commands::Popular { limit } => {
            let results = catalog.popular_packages(*limit).await;
            warn_if_degraded(&catalog);
            print_entries(&results, cli.json)?;
        }
        Commands::Picks { all } => {
            let results = catalog.picks(*all).await;
            print_entries(&results, cli.json)?;
        }
        Commands::Info { entry } => match find_entry(&catalog, entry).await {
            Some(found) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&found)?);
                } else {
                    println!("{}", output::entry_detail(&found));
                }
            }
            None => bail!("No catalog entry matches '{entry}'"),
        },
        Commands::Refresh => {
            catalog.refresh().await;
            match catalog.last_error() {
                Some(message) => bail!("Refresh failed: {message}"),
                None => {
                    let total = catalog.all_packages().await.len();
                    output::success(&format!(
                        "Catalog refreshed: {} registry entries",
                        output::count(total)
                    ));
                }
            }
        }
        Commands::Script {
            entries,
            format,
            output_dir,
        } => {
            if entries.is_empty() {
                bail!("No entries specified. Usage: brewdeck script <entry1> [entry2 ...]");
            }
            let mut selected = Vec::with_capacity(entries.len());
            for needle in entries {
                match find_entry(&catalog, needle).await {
                    Some(found) => selected.push(found),
                    None => bail!("No catalog entry matches '{needle}'"),
                }
            }

            let script_format = format.to_script_format();
            let generator = ScriptGenerator::new()?;
            let script = generator.install_script(&selected, script_format)?;

            let dir = match output_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().context("Failed to get current directory")?,
            };
            let path = dir.join(ScriptGenerator::filename("brewdeck_install", script_format));
            std::fs::write(&path, script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Wrote install script to {}", path.display()));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
