//! Metric computations over classified syntax trees.
//!
//! Each metric consumes the generic node surface through a
//! [`crate::classify::NodeClassifier`] and records non-fatal conditions on
//! a [`crate::diagnostics::DiagnosticSink`]; none of them perform I/O.

pub mod cognitive;
pub mod duplicates;
pub mod lines;
