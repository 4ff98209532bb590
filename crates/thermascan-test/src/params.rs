//! Regression test parameters and comparisons

use thermascan_core::Canvas;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and fail on mismatch (default)
    #[default]
    Compare,
    /// Run without failing, for visual inspection of the output
    Display,
}

impl RegTestMode {
    /// Parse the mode from the `REGTEST_MODE` environment variable
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

/// Comparison recorder for one regression test
///
/// Tracks the test name, a running comparison index and the recorded
/// failures; [`cleanup`](RegParams::cleanup) reports the outcome.
pub struct RegParams {
    /// Name of the test (e.g. "locator")
    pub test_name: String,
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create regression test parameters for the named test
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!();
        eprintln!("==== {}_reg (mode: {:?}) ====", test_name, mode);

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

    /// Compare two integer values exactly
    pub fn compare_values(&mut self, expected: i64, actual: i64) -> bool {
        self.index += 1;
        if expected != actual {
            let msg = format!(
                "failure in {}_reg, comparison {}: expected {}, actual {}",
                self.test_name, self.index, expected, actual
            );
            self.record(msg);
            false
        } else {
            true
        }
    }

    /// Compare two canvases pixel by pixel
    pub fn compare_canvas(&mut self, expected: &Canvas, actual: &Canvas) -> bool {
        self.index += 1;

        if expected.width() != actual.width() || expected.height() != actual.height() {
            let msg = format!(
                "failure in {}_reg, comparison {}: canvas {}x{} vs {}x{}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            self.record(msg);
            return false;
        }

        for y in 0..expected.height() {
            for x in 0..expected.width() {
                if expected.pixel(x, y) != actual.pixel(x, y) {
                    let msg = format!(
                        "failure in {}_reg, comparison {}: pixel mismatch at ({}, {}): \
                         {:#06x} vs {:#06x}",
                        self.test_name,
                        self.index,
                        x,
                        y,
                        expected.pixel(x, y).raw(),
                        actual.pixel(x, y).raw()
                    );
                    self.record(msg);
                    return false;
                }
            }
        }
        true
    }

    /// Compare two strings
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if expected != actual {
            let msg = format!(
                "failure in {}_reg, comparison {}: expected {:?}, actual {:?}",
                self.test_name, self.index, expected, actual
            );
            self.record(msg);
            false
        } else {
            true
        }
    }

    fn record(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Report the outcome.
    ///
    /// Returns `true` if every comparison passed (or the mode is
    /// [`RegTestMode::Display`]).
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

        self.success || self.mode == RegTestMode::Display
    }

    /// Check whether every comparison so far has passed
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the recorded failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_values(42, 42));
        assert!(!rp.compare_values(42, 43));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_canvas() {
        let mut rp = RegParams::new("params_canvas");
        let a = Canvas::new(3, 3).unwrap();
        let mut b = Canvas::new(3, 3).unwrap();
        assert!(rp.compare_canvas(&a, &b));

        b.set_pixel(1, 1, thermascan_core::Color::WHITE);
        assert!(!rp.compare_canvas(&a, &b));
        assert_eq!(rp.failures().len(), 1);
    }
}
