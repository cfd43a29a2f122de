//! Prelude module for fluent_calendar crate.
//!
//! Re-exports the derive_more macros the crate's types lean on.

pub use derive_more::Display;
