//! Prelude module for the bikram crate.
//!
//! Re-exports the derive macros shared by the error and enum types.

pub use derive_more::Display;
