//! Header normalization shared by the CSV and workbook readers.

use std::collections::BTreeSet;

/// Trims whitespace and a leading byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Makes every header non-empty and unique.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ...
/// appended in order of appearance.
pub fn dedupe_headers(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let base = normalize_header(value);
        let base = if base.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            base
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  City  "), "City");
        assert_eq!(normalize_header("\u{feff}Name"), "Name");
    }

    #[test]
    fn test_dedupe_headers() {
        assert_eq!(
            dedupe_headers(&strings(&["Name", "Price", "Name", "", "Name"])),
            strings(&["Name", "Price", "Name.1", "Unnamed: 3", "Name.2"])
        );
    }

    #[test]
    fn test_dedupe_keeps_case_variants() {
        assert_eq!(
            dedupe_headers(&strings(&["City", "CITY"])),
            strings(&["City", "CITY"])
        );
    }
}
