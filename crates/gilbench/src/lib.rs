//! gilbench library — configuration and wiring for the benchmark binary.

pub mod app;
pub mod config;
