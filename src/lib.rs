//! Brewdeck - a package catalog aggregation and search engine
//!
//! Brewdeck merges a curated list of developer tools with the live Homebrew
//! formula and cask registries into one deduplicated, ranked catalog. It
//! powers fuzzy full-catalog search, category browsing with popularity-aware
//! result windows, and reviewable install-script generation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use brewdeck::{CatalogQuery, Settings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let catalog = CatalogQuery::from_settings(&settings)?;
//!
//! // Fuzzy search across the whole merged catalog
//! for entry in catalog.query("chrome", None, false).await {
//!     println!("{}  {}", entry.name, entry.install_command);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The pipeline runs fetch → normalize → enhance → merge → dedup → rank:
//!
//! - [`RegistryCache`]: TTL cache over the registry endpoints with request
//!   coalescing and stale-on-error degradation
//! - [`normalize`]: raw registry records into [`CatalogEntry`] values
//! - [`enhance()`]: backfills curated entries from registry metadata
//! - [`merge`]: command-identity merge plus order-independent name dedup
//! - [`rank`]: fuzzy ranking and popularity-windowed category views
//! - [`CatalogQuery`]: the façade tying the stages together
//!
//! # Error Handling
//!
//! Library operations return [`Result<T>`] with [`CatalogError`]. The query
//! path itself never fails: registry outages degrade to stale or
//! curated-only results, surfaced only through
//! [`CatalogQuery::last_error`].

pub mod classify;
pub mod configuration;
pub mod data;
pub mod enhance;
pub mod errors;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod query;
pub mod rank;
pub mod registry;
pub mod script_generator;

// Re-export commonly used types
pub use configuration::Settings;
pub use data::{CatalogEntry, Category, EntryKind};
pub use enhance::enhance;
pub use errors::{CatalogError, Result};
pub use query::{CatalogQuery, SearchDebouncer};
pub use rank::WindowPolicy;
pub use registry::{HttpTransport, RegistryCache, RegistrySource, RegistryTransport};
pub use script_generator::{ScriptFormat, ScriptGenerator};
