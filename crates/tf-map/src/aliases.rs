//! Ordered alias lists per canonical field.

use std::collections::BTreeMap;
use std::path::Path;

use tf_model::CanonicalField;
use tracing::debug;

use crate::error::{MapError, Result};

/// Alias lists keyed by canonical field, each in priority order.
///
/// Aliases are stored lower-case; header matching lower-cases headers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<CanonicalField, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// The built-in table from [`CanonicalField::default_aliases`].
    pub fn builtin() -> Self {
        let entries = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let aliases = field
                    .default_aliases()
                    .iter()
                    .map(|alias| (*alias).to_string())
                    .collect();
                (field, aliases)
            })
            .collect();
        Self { entries }
    }

    /// A table with no aliases at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Aliases for `field` in priority order.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the alias list of `field`.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, field: CanonicalField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.remove(&field);
        self.extend(field, aliases);
        self
    }

    /// Appends aliases to `field`, lower-casing them and skipping duplicates.
    pub fn extend<I, S>(&mut self, field: CanonicalField, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = self.entries.entry(field).or_default();
        for alias in aliases {
            let alias = alias.as_ref().trim().to_lowercase();
            if alias.is_empty() || list.contains(&alias) {
                continue;
            }
            list.push(alias);
        }
    }

    /// Merges a JSON overlay of the form `{"price": ["cost", "tarif"]}`.
    ///
    /// Extra aliases go after the existing ones for that field.
    pub fn merge_json(&mut self, json: &str) -> Result<()> {
        let overlay: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|source| MapError::AliasParse { source })?;
        for (name, aliases) in overlay {
            let field = CanonicalField::from_name(&name.trim().to_lowercase())
                .ok_or_else(|| MapError::UnknownField {
                    field: name.clone(),
                })?;
            debug!(field = %field, added = aliases.len(), "merging custom aliases");
            self.extend(field, aliases);
        }
        Ok(())
    }

    /// Builds the built-in table extended by the overlay file at `path`.
    pub fn load_overlay(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| MapError::AliasFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut table = Self::builtin();
        table.merge_json(&contents)?;
        Ok(table)
    }
}
