//! Result sets produced by the timers.

use crate::timing::TimingSample;

/// One uncontended sample per backend, in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRunResults {
    names: Vec<String>,
    samples: Vec<TimingSample>,
}

impl SingleRunResults {
    /// Empty result set sized for `names`.
    #[must_use]
    pub fn with_backends(names: Vec<String>) -> Self {
        let samples = Vec::with_capacity(names.len());
        Self { names, samples }
    }

    /// Append the sample for the next backend in order.
    ///
    /// # Panics
    ///
    /// Panics if every backend already has a sample.
    pub fn push(&mut self, sample: TimingSample) {
        assert!(
            self.samples.len() < self.names.len(),
            "single-run results already complete"
        );
        self.samples.push(sample);
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    /// Sample for a backend by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TimingSample> {
        let i = self.names.iter().position(|n| n == name)?;
        self.samples.get(i).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One sample per backend.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.samples.len() == self.names.len()
    }

    /// Samples formatted for display.
    #[must_use]
    pub fn formatted(&self) -> Vec<String> {
        self.samples.iter().map(ToString::to_string).collect()
    }
}

/// N×N grid of pair samples, rows keyed by driver, columns by partner.
///
/// Rows and columns both follow backend order, diagonal included.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    names: Vec<String>,
    rows: Vec<Vec<TimingSample>>,
}

impl PairwiseMatrix {
    /// Empty grid with one pre-sized row per backend.
    #[must_use]
    pub fn with_backends(names: Vec<String>) -> Self {
        let rows = names
            .iter()
            .map(|_| Vec::with_capacity(names.len()))
            .collect();
        Self { names, rows }
    }

    /// Append the next partner sample to `driver`'s row.
    ///
    /// # Panics
    ///
    /// Panics if `driver` is out of range or its row is already full.
    pub fn push(&mut self, driver: usize, sample: TimingSample) {
        let width = self.names.len();
        let row = &mut self.rows[driver];
        assert!(row.len() < width, "row '{}' already complete", self.names[driver]);
        row.push(sample);
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row for a driver backend.
    #[must_use]
    pub fn row(&self, driver: &str) -> Option<&[TimingSample]> {
        let i = self.names.iter().position(|n| n == driver)?;
        Some(&self.rows[i])
    }

    /// Sample for one (driver, partner) pair.
    #[must_use]
    pub fn get(&self, driver: &str, partner: &str) -> Option<TimingSample> {
        let j = self.names.iter().position(|n| n == partner)?;
        self.row(driver)?.get(j).copied()
    }

    /// Rows in driver order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[TimingSample])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Number of driver rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row holds one sample per backend.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.names.len())
    }
}

/// Everything one benchmark run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    /// Fibonacci index used for every timed call.
    pub n: u64,
    pub single: SingleRunResults,
    pub pairwise: PairwiseMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["a".into(), "b".into()]
    }

    fn ms(v: f64) -> TimingSample {
        TimingSample::from_millis(v)
    }

    #[test]
    fn single_results_fill_in_order() {
        let mut single = SingleRunResults::with_backends(names());
        assert!(single.is_empty());
        single.push(ms(1.0));
        assert!(!single.is_complete());
        single.push(ms(2.5));
        assert!(single.is_complete());
        assert_eq!(single.get("b"), Some(ms(2.5)));
        assert_eq!(single.get("c"), None);
        assert_eq!(single.formatted(), ["1.0ms", "2.5ms"]);
    }

    #[test]
    #[should_panic(expected = "already complete")]
    fn single_results_reject_overflow() {
        let mut single = SingleRunResults::with_backends(names());
        single.push(ms(1.0));
        single.push(ms(1.0));
        single.push(ms(1.0));
    }

    #[test]
    fn matrix_rows_keyed_by_driver() {
        let mut m = PairwiseMatrix::with_backends(names());
        m.push(0, ms(1.0));
        m.push(0, ms(2.0));
        m.push(1, ms(3.0));
        assert!(!m.is_complete());
        m.push(1, ms(4.0));
        assert!(m.is_complete());

        assert_eq!(m.get("a", "b"), Some(ms(2.0)));
        assert_eq!(m.get("b", "a"), Some(ms(3.0)));
        assert_eq!(m.row("b").unwrap(), &[ms(3.0), ms(4.0)]);
        assert_eq!(m.get("a", "z"), None);

        let order: Vec<&str> = m.rows().map(|(name, _)| name).collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn empty_matrix_is_complete() {
        let m = PairwiseMatrix::with_backends(Vec::new());
        assert!(m.is_empty());
        assert!(m.is_complete());
    }
}
