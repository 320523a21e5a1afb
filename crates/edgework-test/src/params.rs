//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use edgework_core::Raster;
use std::fmt::Debug;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed results with expectations (default)
    #[default]
    Compare,
    /// Also write result rasters to `tests/regout` for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, a running comparison index and every failure so
/// that a test reports all mismatches at once from [`RegParams::cleanup`].
pub struct RegParams {
    /// Name of the test (e.g., "canny")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ))
        } else {
            true
        }
    }

    /// Compare two rasters for identical dimensions and samples
    pub fn compare_rasters(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            return self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            ));
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        if let Some(idx) = mismatch {
            let (x, y) = (idx % width, idx / width);
            return self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - sample mismatch at ({}, {}): {} vs {}",
                self.test_name,
                self.index,
                x,
                y,
                expected.data()[idx],
                actual.data()[idx]
            ));
        }

        true
    }

    /// Compare two sequences element by element
    pub fn compare_sequences<T: PartialEq + Debug>(&mut self, expected: &[T], actual: &[T]) -> bool {
        self.index += 1;

        if expected != actual {
            self.fail(format!(
                "Failure in {}_reg: sequence comparison for index {}\n\
                 expected = {:?}\n\
                 actual   = {:?}",
                self.test_name, self.index, expected, actual
            ))
        } else {
            true
        }
    }

    /// Write a raster as PGM under `tests/regout` when in display mode
    ///
    /// Does nothing in compare mode.
    pub fn write_raster(&mut self, raster: &Raster, label: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }

        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        let path = format!(
            "{}/{}.{:02}.{}.pgm",
            dir,
            self.test_name,
            self.index,
            label
        );
        edgework_io::write_image(raster, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if every comparison passed.
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

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
