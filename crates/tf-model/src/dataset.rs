use crate::cell::CellValue;

/// One row, stored positionally against its dataset's header list.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Returns the cell at `index`, or `Missing` past the end of the row.
    pub fn get(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&CellValue::Missing)
    }
}

/// Ordered rows sharing a single header list.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding with `Missing` or truncating to the header width.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.headers.len(), CellValue::Missing);
        self.rows.push(Record::new(cells));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header equal to `header` (case-sensitive).
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Looks up a cell by header name.
    pub fn value<'a>(&self, row: &'a Record, header: &str) -> Option<&'a CellValue> {
        self.column_index(header).map(|idx| row.get(idx))
    }

    /// Returns the cells of one column in row order.
    pub fn column(&self, header: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(header)?;
        Some(self.rows.iter().map(|row| row.get(idx)).collect())
    }

    /// Builds a new dataset with the columns rearranged to `order`.
    ///
    /// Headers in `order` that do not exist are skipped.
    pub fn select_columns(&self, order: &[String]) -> Dataset {
        let indices: Vec<usize> = order
            .iter()
            .filter_map(|header| self.column_index(header))
            .collect();
        let headers = indices.iter().map(|&idx| self.headers[idx].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| Record::new(indices.iter().map(|&idx| row.get(idx).clone()).collect()))
            .collect();
        Dataset { headers, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new(vec!["Bio".into(), "City".into(), "Price".into()]);
        dataset.push_row(vec!["Calm".into(), "Vancouver".into(), 100.0.into()]);
        dataset.push_row(vec!["Firm".into()]);
        dataset
    }

    #[test]
    fn short_rows_are_padded() {
        let dataset = sample();
        assert_eq!(dataset.rows[1].cells.len(), 3);
        assert!(dataset.rows[1].get(2).is_missing());
    }

    #[test]
    fn value_looks_up_by_header() {
        let dataset = sample();
        let row = &dataset.rows[0];
        assert_eq!(dataset.value(row, "City"), Some(&CellValue::from("Vancouver")));
        assert_eq!(dataset.value(row, "city"), None);
    }

    #[test]
    fn select_columns_reorders_cells() {
        let dataset = sample();
        let reordered = dataset.select_columns(&["City".into(), "Price".into(), "Bio".into()]);
        assert_eq!(reordered.headers, vec!["City", "Price", "Bio"]);
        assert_eq!(reordered.rows[0].get(1), &CellValue::Number(100.0));
        assert_eq!(reordered.rows[0].get(2), &CellValue::from("Calm"));
    }
}
