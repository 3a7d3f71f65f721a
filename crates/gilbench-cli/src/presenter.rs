//! CLI result presenter.

use std::io::Write;

use gilbench_orchestration::interfaces::ResultPresenter;
use gilbench_orchestration::results::{BenchReport, PairwiseMatrix, SingleRunResults};

use crate::table::TextTable;

/// Prints the single-run table, then the pairwise matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct CLIResultPresenter;

impl CLIResultPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present(&self, report: &BenchReport, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", single_run_table(&report.single).draw())?;
        writeln!(out, "{}", pairwise_table(&report.pairwise).draw())?;
        out.flush()
    }
}

/// Backend names over one row of uncontended samples.
#[must_use]
pub fn single_run_table(single: &SingleRunResults) -> TextTable {
    let mut table = TextTable::new();
    table.header(single.names().iter().cloned());
    table.add_row(single.formatted());
    table
}

/// Driver per row, partner per column.
#[must_use]
pub fn pairwise_table(matrix: &PairwiseMatrix) -> TextTable {
    let mut table = TextTable::new();
    table.header(std::iter::once(String::new()).chain(matrix.names().iter().cloned()));
    for (driver, samples) in matrix.rows() {
        table.add_row(
            std::iter::once(driver.to_string()).chain(samples.iter().map(ToString::to_string)),
        );
    }
    table
}
