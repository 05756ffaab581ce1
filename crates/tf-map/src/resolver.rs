//! Header to canonical field resolution.

use std::collections::{BTreeSet, HashMap};

use tf_model::{CanonicalField, ColumnMapping};
use tracing::debug;

use crate::aliases::AliasTable;

/// Result of resolving one dataset's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub mapping: ColumnMapping,
    /// Headers that back no canonical field, in original order.
    pub unmapped_headers: Vec<String>,
}

/// Resolves headers against an [`AliasTable`].
#[derive(Debug, Clone, Default)]
pub struct ColumnResolver {
    table: AliasTable,
}

impl ColumnResolver {
    pub fn new(table: AliasTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Maps each canonical field to at most one header.
    ///
    /// Headers are compared lower-cased; when two headers share a lower-case
    /// form the later one wins. Fields claim headers in enumeration order and
    /// a header already claimed by an earlier field is skipped.
    pub fn resolve(&self, headers: &[String]) -> ColumnResolution {
        let mut lookup: HashMap<String, &str> = HashMap::with_capacity(headers.len());
        for header in headers {
            lookup.insert(header.to_lowercase(), header.as_str());
        }

        let mut mapping = ColumnMapping::new();
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        for field in CanonicalField::ALL {
            for alias in self.table.aliases(field) {
                let Some(&header) = lookup.get(alias) else {
                    continue;
                };
                if claimed.contains(header) {
                    debug!(
                        field = %field,
                        alias = %alias,
                        header = %header,
                        "header already claimed by an earlier field"
                    );
                    continue;
                }
                debug!(field = %field, header = %header, "resolved column");
                mapping.insert(field, header);
                claimed.insert(header);
                break;
            }
        }

        let unmapped_headers = headers
            .iter()
            .filter(|header| !claimed.contains(header.as_str()))
            .cloned()
            .collect();
        ColumnResolution {
            mapping,
            unmapped_headers,
        }
    }
}

/// Resolves headers with the built-in alias table.
pub fn resolve_columns(headers: &[String]) -> ColumnMapping {
    ColumnResolver::default().resolve(headers).mapping
}
