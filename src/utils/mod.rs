//! Bootstrap helpers shared by the wunderpass binaries.

pub mod bootstrap;
