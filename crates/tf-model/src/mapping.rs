use std::collections::BTreeMap;

use crate::field::CanonicalField;

/// Resolved association from canonical fields to dataset headers.
///
/// Built once per dataset by the column resolver and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnMapping {
    fields: BTreeMap<CanonicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `header` as the source of `field`, replacing any earlier entry.
    pub fn insert(&mut self, field: CanonicalField, header: impl Into<String>) {
        self.fields.insert(field, header.into());
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_resolved(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Resolved pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.fields.iter().map(|(field, header)| (*field, header.as_str()))
    }

    /// Fields with no matching header, in enumeration order.
    pub fn unresolved(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.is_resolved(*field))
            .collect()
    }

    /// Mapped headers in enumeration order, first occurrence kept.
    pub fn resolved_headers(&self) -> Vec<&str> {
        let mut headers: Vec<&str> = Vec::new();
        for (_, header) in self.iter() {
            if !headers.contains(&header) {
                headers.push(header);
            }
        }
        headers
    }

    /// The first field (in enumeration order) backed by `header`.
    pub fn field_for_header(&self, header: &str) -> Option<CanonicalField> {
        self.iter()
            .find(|(_, mapped)| *mapped == header)
            .map(|(field, _)| field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
