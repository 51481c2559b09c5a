//! Table - Named numeric columns with a row index
//!
//! A small column-oriented table used to report per-region measurements.
//! Each column is a named `Vec<f64>`; all columns share one row count. Rows
//! additionally carry an index value, which measurement code uses to keep
//! the label id of each region until the table is finalized with
//! [`Table::reset_index`].
//!
//! # Examples
//!
//! ```
//! use spotfishing_core::Table;
//!
//! let mut table = Table::new();
//! table.push_column("label", vec![3.0, 7.0]).unwrap();
//! table.push_column("area", vec![12.0, 5.0]).unwrap();
//! table.set_index(vec![3, 7]).unwrap();
//!
//! table.drop_columns(&["label"], false).unwrap();
//! table.reset_index();
//! assert_eq!(table.column_names(), ["area"]);
//! assert_eq!(table.index(), &[0, 1]);
//! ```

use crate::error::{Error, Result};
use crate::record::Record;

/// Column-oriented table of `f64` values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Row index labels
    index: Vec<usize>,
    /// Column names, in order
    names: Vec<String>,
    /// Column data, parallel to `names`
    columns: Vec<Vec<f64>>,
}

impl Table {
    /// Create an empty table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns and no rows
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateColumn` if a name repeats.
    pub fn with_columns(names: &[&str]) -> Result<Self> {
        let mut table = Self::new();
        for name in names {
            table.push_column(*name, Vec::new())?;
        }
        Ok(table)
    }

    /// Append a column
    ///
    /// The first column of a table fixes the row count and creates a
    /// default `0..n` index. Later columns must match that row count.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateColumn` if the name is taken, or
    /// `Error::ColumnLength` if the length is wrong.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(Error::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.index = (0..values.len()).collect();
        } else if values.len() != self.n_rows() {
            return Err(Error::ColumnLength {
                name,
                expected: self.n_rows(),
                actual: values.len(),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Replace the row index
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the length differs from the
    /// row count.
    pub fn set_index(&mut self, index: Vec<usize>) -> Result<()> {
        if index.len() != self.n_rows() {
            return Err(Error::InvalidParameter(format!(
                "index length {} doesn't match row count {}",
                index.len(),
                self.n_rows()
            )));
        }
        self.index = index;
        Ok(())
    }

    /// Number of rows
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row index labels
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Column names, in order
    pub fn column_names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Values of a column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.columns[i].as_slice())
    }

    /// Remove columns by name
    ///
    /// With `ignore_missing`, names that are not present are skipped;
    /// otherwise they are an error and the table is left unchanged.
    pub fn drop_columns(&mut self, names: &[&str], ignore_missing: bool) -> Result<()> {
        if !ignore_missing {
            if let Some(missing) = names.iter().find(|n| !self.has_column(n)) {
                return Err(Error::ColumnNotFound((*missing).to_string()));
            }
        }
        for name in names {
            if let Some(i) = self.position(name) {
                self.names.remove(i);
                self.columns.remove(i);
            }
        }
        Ok(())
    }

    /// Rename columns according to `(from, to)` pairs
    ///
    /// Pairs whose source column does not exist are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateColumn` if a rename would collide with an
    /// existing column; the table is left unchanged.
    pub fn rename_columns(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        let renamed: Vec<String> = self
            .names
            .iter()
            .map(|name| {
                mapping
                    .iter()
                    .find(|(from, _)| *from == name.as_str())
                    .map_or_else(|| name.clone(), |(_, to)| (*to).to_string())
            })
            .collect();
        for (i, name) in renamed.iter().enumerate() {
            if renamed[..i].contains(name) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }
        self.names = renamed;
        Ok(())
    }

    /// Reset the row index to `0..n_rows`
    pub fn reset_index(&mut self) {
        self.index = (0..self.n_rows()).collect();
    }

    /// New table containing only the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut out = Table::new();
        for name in names {
            let values = self
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound((*name).to_string()))?;
            out.push_column(*name, values.to_vec())?;
        }
        out.index = self.index.clone();
        Ok(out)
    }

    /// Row at a position
    pub fn row(&self, position: usize) -> Option<TableRow<'_>> {
        (position < self.n_rows()).then_some(TableRow {
            table: self,
            position,
        })
    }

    /// Row at a position, as an error if out of range
    pub fn try_row(&self, position: usize) -> Result<TableRow<'_>> {
        self.row(position).ok_or(Error::RowOutOfBounds {
            index: position,
            len: self.n_rows(),
        })
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> + '_ {
        (0..self.n_rows()).map(move |position| TableRow {
            table: self,
            position,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// A borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    table: &'a Table,
    position: usize,
}

impl<'a> TableRow<'a> {
    /// Index label of this row
    pub fn index(&self) -> usize {
        self.table.index[self.position]
    }

    /// Value in the named column
    pub fn get(&self, name: &str) -> Option<f64> {
        self.table
            .position(name)
            .map(|i| self.table.columns[i][self.position])
    }

    /// All values of the row, in column order
    pub fn values(&self) -> Vec<f64> {
        self.table
            .columns
            .iter()
            .map(|c| c[self.position])
            .collect()
    }
}

impl Record for TableRow<'_> {
    fn field(&self, key: &str) -> Option<f64> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new();
        t.push_column("label", vec![2.0, 5.0, 9.0]).unwrap();
        t.push_column("centroid-0", vec![0.5, 1.5, 2.5]).unwrap();
        t.push_column("area", vec![4.0, 6.0, 1.0]).unwrap();
        t.set_index(vec![2, 5, 9]).unwrap();
        t
    }

    #[test]
    fn test_with_columns_is_empty() {
        let t = Table::with_columns(&["a", "b"]).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.column_names(), ["a", "b"]);
        assert_eq!(t.column("a"), Some(&[][..]));
    }

    #[test]
    fn test_duplicate_column() {
        assert!(matches!(
            Table::with_columns(&["a", "a"]),
            Err(Error::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_column_length_mismatch() {
        let mut t = sample();
        let err = t.push_column("extra", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnLength {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_drop_rename_reset() {
        let mut t = sample();
        t.drop_columns(&["label", "missing"], true).unwrap();
        t.rename_columns(&[("centroid-0", "zc"), ("nope", "x")])
            .unwrap();
        t.reset_index();
        assert_eq!(t.column_names(), ["zc", "area"]);
        assert_eq!(t.index(), &[0, 1, 2]);
        assert_eq!(t.column("zc"), Some(&[0.5, 1.5, 2.5][..]));
    }

    #[test]
    fn test_drop_missing_is_error_without_ignore() {
        let mut t = sample();
        assert!(matches!(
            t.drop_columns(&["label", "missing"], false),
            Err(Error::ColumnNotFound(_))
        ));
        assert_eq!(t.n_columns(), 3);
    }

    #[test]
    fn test_rename_collision() {
        let mut t = sample();
        assert!(t.rename_columns(&[("label", "area")]).is_err());
        assert_eq!(t.column_names(), ["label", "centroid-0", "area"]);
    }

    #[test]
    fn test_rows_and_record() {
        let t = sample();
        let row = t.row(1).unwrap();
        assert_eq!(row.index(), 5);
        assert_eq!(row.field("area"), Some(6.0));
        assert_eq!(row.values(), vec![5.0, 1.5, 6.0]);
        assert!(t.row(3).is_none());
        assert!(t.try_row(3).is_err());
        assert_eq!(t.rows().count(), 3);
    }

    #[test]
    fn test_select() {
        let t = sample();
        let s = t.select(&["area", "label"]).unwrap();
        assert_eq!(s.column_names(), ["area", "label"]);
        assert_eq!(s.index(), t.index());
        assert!(t.select(&["zc"]).is_err());
    }
}
