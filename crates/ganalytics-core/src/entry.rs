//! Account and report entries.
//!
//! Entries are immutable property bags built once by the feed mapper. Names
//! are stored without the `ga:` prefix. Lookups go through [`resolve`], which
//! lowercases the first character of the requested name (so `Pageviews` and
//! `pageviews` are the same accessor) and falls back to an ASCII
//! case-insensitive match.

use crate::error::AccessorError;
use crate::value::{Value, ValueMap};
use serde::Serialize;
use std::fmt;

/// Turn a requested accessor name into its canonical form.
///
/// The canonical form has a lowercase first character: `PageViews` becomes
/// `pageViews`.
pub fn canonical_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip the `get` prefix from a method-style accessor and canonicalize it.
///
/// `getPageviews` becomes `pageviews`. Anything not starting with `get`
/// is rejected.
pub fn accessor_name(method: &str) -> Result<String, AccessorError> {
    method
        .strip_prefix("get")
        .map(canonical_name)
        .ok_or_else(|| AccessorError::NoSuchFunction(method.to_string()))
}

/// Resolve a requested name against a map.
///
/// Tries the canonical form first, then any key equal ignoring ASCII case.
pub fn resolve<'a>(map: &'a ValueMap, name: &str) -> Option<&'a Value> {
    let canonical = canonical_name(name);
    map.get(&canonical).or_else(|| map.get_ignore_case(&canonical))
}

/// An entry from the account feed.
///
/// Holds every `dxp:property` of the entry plus the entry's `title` and
/// `updated` fields. All values are strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountEntry {
    properties: ValueMap,
}

impl AccountEntry {
    /// Create an entry from its property map.
    pub const fn new(properties: ValueMap) -> Self {
        Self { properties }
    }

    /// All properties of the account.
    pub const fn properties(&self) -> &ValueMap {
        &self.properties
    }

    /// The account title, if the feed supplied one.
    pub fn title(&self) -> Option<&str> {
        self.properties.get("title").and_then(Value::as_str)
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Result<&Value, AccessorError> {
        resolve(&self.properties, name)
            .ok_or_else(|| AccessorError::unknown("property", canonical_name(name)))
    }

    /// Look up a property through a `get`-prefixed accessor name.
    pub fn call(&self, method: &str) -> Result<&Value, AccessorError> {
        let name = accessor_name(method)?;
        self.get(&name)
    }
}

impl fmt::Display for AccountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title().unwrap_or_default())
    }
}

/// A row of a report feed.
///
/// Metrics and dimensions are kept in separate maps. A name is present in at
/// most one of them; lookups check metrics first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportEntry {
    metrics: ValueMap,
    dimensions: ValueMap,
}

impl ReportEntry {
    /// Create a report entry.
    ///
    /// Dimensions sharing a name with a metric are dropped, since the metric
    /// would shadow them on every lookup anyway.
    pub fn new(metrics: ValueMap, mut dimensions: ValueMap) -> Self {
        let shadowed: Vec<String> = dimensions
            .keys()
            .filter(|k| metrics.contains_key(k))
            .map(ToString::to_string)
            .collect();
        for name in shadowed {
            dimensions.remove(&name);
        }
        Self {
            metrics,
            dimensions,
        }
    }

    /// Numeric metric values of this row.
    pub const fn metrics(&self) -> &ValueMap {
        &self.metrics
    }

    /// String dimension values of this row.
    pub const fn dimensions(&self) -> &ValueMap {
        &self.dimensions
    }

    /// Look up a metric, then a dimension, by name.
    pub fn get(&self, name: &str) -> Result<&Value, AccessorError> {
        resolve(&self.metrics, name)
            .or_else(|| resolve(&self.dimensions, name))
            .ok_or_else(|| AccessorError::unknown("metric or dimension", canonical_name(name)))
    }

    /// Look up a metric or dimension through a `get`-prefixed accessor name.
    pub fn call(&self, method: &str) -> Result<&Value, AccessorError> {
        let name = accessor_name(method)?;
        self.get(&name)
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.dimensions.values().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
