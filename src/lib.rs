//! cogscan computes source metrics across languages: per-function
//! cognitive complexity, per-file line classification and cross-file
//! exact duplicate function detection.
//!
//! The crate is a library with no I/O surface: callers hand the
//! [`engine::Engine`] a set of [`engine::SourceFile`]s (path label plus
//! source text) and get back one serializable
//! [`results::AnalysisReport`]. Per-language knowledge lives entirely in
//! the [`classify`] tables; the metrics in [`metrics`] are
//! language-agnostic.
//!
//! ```
//! use cogscan::{Engine, SourceFile};
//!
//! let files = vec![SourceFile::new(
//!     "fib.go",
//!     r#"
//! package main
//!
//! func fib(n int) int {
//!     if n == 0 {
//!         return 0
//!     } else if n == 1 {
//!         return 1
//!     } else {
//!         return fib(n-1) + fib(n-2)
//!     }
//! }
//! "#,
//! )];
//!
//! let report = Engine::new().analyze_files(&files);
//! assert_eq!(report.function("fib").unwrap().score.total, 5);
//! ```

pub mod classify;
pub mod diagnostics;
pub mod engine;
pub mod metrics;
pub mod parse;
pub mod results;

pub use classify::{
    classifier_for_extension, classifier_for_language, supported_languages, BooleanOp,
    CommentKind, CommentSpan, DecisionKind, NodeClassifier, SemanticRole,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, EngineError, Severity};
pub use engine::{Engine, SourceFile};
pub use results::{
    AnalysisReport, ComplexityScore, DuplicateGroup, FileLines, FunctionRecord, FunctionRef,
    Increment, LineKind, LineRecord, Span,
};
