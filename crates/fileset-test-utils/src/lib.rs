//! Shared test utilities for the fileset workspace.
//!
//! This crate provides standardised module-tree fixtures so crate test
//! suites do not each hand-roll directory setup. It is a dev-dependency
//! only, never published.
//!
//! # Modules
//!
//! - [`modules`]: [`TestModules`] builder for `<root>/<module>/<fileset>/` trees
//! - [`fixtures`]: path to the checked-in sample modules under `test-fixtures/`
//! - [`logging`]: routes `tracing` output through the test harness

pub mod fixtures;
pub mod logging;
pub mod modules;

pub use modules::TestModules;
