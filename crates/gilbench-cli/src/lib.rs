//! # gilbench-cli
//!
//! Text tables, the result presenter and the progress bar.

pub mod output;
pub mod presenter;
pub mod progress;
pub mod table;

pub use presenter::CLIResultPresenter;
pub use progress::CLIProgressObserver;
pub use table::TextTable;
