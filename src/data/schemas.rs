//! Serde schemas for the raw registry records.
//!
//! These mirror the registry's JSON shape closely enough to pull out the
//! fields the catalog consumes; everything else is ignored. Records are
//! immutable once fetched, never mutated downstream.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A command-line package record as returned by the formula endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormula {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub versions: FormulaVersions,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub analytics: Option<InstallAnalytics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormulaVersions {
    #[serde(default)]
    pub stable: Option<String>,
}

/// A GUI-application package record as returned by the cask endpoint.
///
/// The registry reports cask display names as an array; the first element is
/// the preferred one.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCask {
    pub token: String,
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub analytics: Option<InstallAnalytics>,
}

impl RawCask {
    /// Preferred display name, falling back to the token.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.first().map(String::as_str).unwrap_or(&self.token)
    }
}

/// Install-count analytics attached to a registry record.
///
/// Buckets are keyed by period (`"30d"`, `"90d"`, `"365d"`); each bucket maps
/// an identifier to a count that may arrive as a JSON number or as a
/// comma-grouped string ("12,345"). Anything malformed simply reads as no
/// data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallAnalytics {
    #[serde(default)]
    pub install: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl InstallAnalytics {
    /// Install count for `ident` in the most recent 30-day bucket.
    ///
    /// Falls back to the bucket's sole value when the identifier key does not
    /// match (some records key the bucket by a variant spelling).
    #[must_use]
    pub fn recent_installs(&self, ident: &str) -> Option<u64> {
        let bucket = self.install.get("30d")?;
        let value = bucket
            .get(ident)
            .or_else(|| if bucket.len() == 1 { bucket.values().next() } else { None })?;
        parse_count(value)
    }
}

/// Parse a count that may be a JSON number or a comma-grouped string.
fn parse_count(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}
