//! Output column ordering.

use tf_model::ColumnMapping;

/// Resolved canonical headers first (enumeration order, deduplicated), then
/// every other header in its original position order.
pub fn output_column_order(headers: &[String], mapping: &ColumnMapping) -> Vec<String> {
    let mut order: Vec<String> = Vec::with_capacity(headers.len());
    for header in mapping.resolved_headers() {
        if headers.iter().any(|h| h == header) && !order.iter().any(|h| h == header) {
            order.push(header.to_string());
        }
    }
    for header in headers {
        if !order.contains(header) {
            order.push(header.clone());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_model::CanonicalField;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn canonical_columns_lead() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::City, "City");
        mapping.insert(CanonicalField::Price, "Price");
        assert_eq!(
            output_column_order(&headers(&["Bio", "City", "Price"]), &mapping),
            headers(&["City", "Price", "Bio"])
        );
    }

    #[test]
    fn leftovers_keep_relative_order() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::Name, "Provider");
        assert_eq!(
            output_column_order(&headers(&["Zeta", "Provider", "Alpha", "Mid"]), &mapping),
            headers(&["Provider", "Zeta", "Alpha", "Mid"])
        );
    }

    #[test]
    fn stale_mapping_headers_are_ignored() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::City, "Town");
        assert_eq!(
            output_column_order(&headers(&["B", "A"]), &mapping),
            headers(&["B", "A"])
        );
    }
}
