#![forbid(unsafe_code)]

//! Command-line support for loading and saving user graphs.
//!
//! The `contagion` binary is a thin caller of the library: it reads a graph
//! description through this module, runs one rollout, and reports the result.

/// JSON graph import and export.
pub mod import_export;
