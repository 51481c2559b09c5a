//! Regression test parameters and operations

use crate::regout_dir;
use spotfishing_core::{LabelMap, Table, Volume};
use std::fs;

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index and recorded failures.
pub struct RegParams {
    /// Name of the test (e.g., "detect")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs the test logger and creates the output directory.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares within delta, unless both sides are NaN
        if diff > delta || (diff.is_nan() && !(expected.is_nan() && actual.is_nan())) {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two volumes voxel by voxel
    ///
    /// # Returns
    ///
    /// `true` if the shapes agree and no voxel differs by more than
    /// `delta`.
    pub fn compare_volumes(&mut self, expected: &Volume, actual: &Volume, delta: f64) -> bool {
        self.index += 1;

        if expected.dim() != actual.dim() {
            let msg = format!(
                "Failure in {}_reg: volume comparison for index {} - shape {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dim(),
                actual.dim()
            );
            return self.fail(msg);
        }

        let mismatch = expected
            .indexed_iter()
            .zip(actual.iter())
            .map(|((pos, &e), &a)| (pos, (e - a).abs()))
            .find(|(_, diff)| !(*diff <= delta));
        if let Some((pos, diff)) = mismatch {
            let msg = format!(
                "Failure in {}_reg: volume comparison for index {} - voxel {:?} differs by {} \
                 (allowed delta = {})",
                self.test_name, self.index, pos, diff, delta
            );
            return self.fail(msg);
        }
        true
    }

    /// Compare two label maps for exact equality
    pub fn compare_labels(&mut self, expected: &LabelMap, actual: &LabelMap) -> bool {
        self.index += 1;

        if expected.dim() != actual.dim() {
            let msg = format!(
                "Failure in {}_reg: label comparison for index {} - shape {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dim(),
                actual.dim()
            );
            return self.fail(msg);
        }

        let mismatch = expected
            .indexed_iter()
            .zip(actual.iter())
            .find(|((_, e), a)| *e != *a);
        if let Some(((pos, &e), &a)) = mismatch {
            let msg = format!(
                "Failure in {}_reg: label comparison for index {} - label mismatch at {:?}: \
                 {} vs {}",
                self.test_name, self.index, pos, e, a
            );
            return self.fail(msg);
        }
        true
    }

    /// Compare two tables: column names, row index and values
    ///
    /// Values may differ by up to `delta`.
    pub fn compare_tables(&mut self, expected: &Table, actual: &Table, delta: f64) -> bool {
        self.index += 1;

        if expected.column_names() != actual.column_names() {
            let msg = format!(
                "Failure in {}_reg: table comparison for index {} - columns {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.column_names(),
                actual.column_names()
            );
            return self.fail(msg);
        }
        if expected.index() != actual.index() {
            let msg = format!(
                "Failure in {}_reg: table comparison for index {} - {} vs {} rows",
                self.test_name,
                self.index,
                expected.n_rows(),
                actual.n_rows()
            );
            return self.fail(msg);
        }

        for name in expected.column_names() {
            let (Some(e), Some(a)) = (expected.column(name), actual.column(name)) else {
                continue;
            };
            let bad = e
                .iter()
                .zip(a)
                .position(|(x, y)| !((x - y).abs() <= delta) && !(x.is_nan() && y.is_nan()));
            if let Some(row) = bad {
                let msg = format!(
                    "Failure in {}_reg: table comparison for index {} - column '{}' row {}: \
                     {} vs {}",
                    self.test_name, self.index, name, row, e[row], a[row]
                );
                return self.fail(msg);
            }
        }
        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_values_nan() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(f64::NAN, f64::NAN, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 10.0));
    }

    #[test]
    fn test_compare_volumes() {
        let mut rp = RegParams::new("test");
        let a = Array3::<f64>::zeros((2, 2, 2));
        let mut b = a.clone();
        b[[1, 1, 1]] = 0.25;
        assert!(rp.compare_volumes(&a, &b, 0.5));
        assert!(!rp.compare_volumes(&a, &b, 0.1));
        assert!(!rp.compare_volumes(&a, &Array3::zeros((2, 2, 3)), 1.0));
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_compare_labels_and_tables() {
        let mut rp = RegParams::new("test");
        let labels = Array3::<u32>::ones((1, 2, 2));
        assert!(rp.compare_labels(&labels, &labels.clone()));
        assert!(!rp.compare_labels(&labels, &Array3::zeros((1, 2, 2))));

        let mut t1 = Table::new();
        t1.push_column("area", vec![1.0, 2.0]).unwrap();
        let mut t2 = t1.clone();
        assert!(rp.compare_tables(&t1, &t2, 0.0));
        t2.rename_columns(&[("area", "zc")]).unwrap();
        assert!(!rp.compare_tables(&t1, &t2, 0.0));
    }

    #[test]
    fn test_new_creates_output_dir() {
        let rp = RegParams::new("test");
        assert!(std::path::Path::new(&regout_dir()).is_dir());
        assert_eq!(rp.index(), 0);
        assert!(rp.failures().is_empty());
        assert!(rp.cleanup());
    }
}
