//! Non-fatal analysis diagnostics and the crate's typed error.
//!
//! Analysis never aborts a run: parse failures, malformed functions and
//! classification gaps are recorded as [`Diagnostic`] values on the report
//! and the remaining files and functions are still analyzed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, at the granularity report consumers filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The parser produced no usable tree for the file. The file is skipped.
    ParseFailure,
    /// A node kind classified `Other` but its kind string carries a
    /// decision-bearing word segment, suggesting a table gap.
    UnclassifiedNodeKind,
    /// A block comment is opened but never closed before end of file.
    UnterminatedCommentSpan,
    /// A call matches the enclosing function's name but its receiver is
    /// neither absent nor the self keyword, so it is not counted as
    /// recursion.
    UnresolvedRecursionTarget,
    /// A function subtree contains parse errors; it is skipped, the rest of
    /// the file is not.
    MalformedFunction,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseFailure => "parse_failure",
            DiagnosticKind::UnclassifiedNodeKind => "unclassified_node_kind",
            DiagnosticKind::UnterminatedCommentSpan => "unterminated_comment_span",
            DiagnosticKind::UnresolvedRecursionTarget => "unresolved_recursion_target",
            DiagnosticKind::MalformedFunction => "malformed_function",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ParseFailure | DiagnosticKind::MalformedFunction => Severity::Error,
            DiagnosticKind::UnclassifiedNodeKind
            | DiagnosticKind::UnterminatedCommentSpan
            | DiagnosticKind::UnresolvedRecursionTarget => Severity::Warning,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One recorded analysis event, attributed to a file and optionally a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub path: String,
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: &str, line: Option<usize>, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            path: path.to_string(),
            line,
            message,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}: {}:{}: {}",
                self.severity, self.path, line, self.message
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.path, self.message),
        }
    }
}

/// Per-file diagnostic collector.
///
/// Keeps discovery order and deduplicates `UnclassifiedNodeKind` per node
/// kind, so one suspicious grammar kind does not flood the report.
#[derive(Debug)]
pub struct DiagnosticSink {
    path: String,
    items: Vec<Diagnostic>,
    warned_kinds: HashSet<String>,
}

impl DiagnosticSink {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            items: Vec::new(),
            warned_kinds: HashSet::new(),
        }
    }

    pub fn push(&mut self, kind: DiagnosticKind, line: Option<usize>, message: String) {
        self.items
            .push(Diagnostic::new(kind, &self.path, line, message));
    }

    /// Record an unclassified decision-bearing node kind, once per kind.
    pub fn warn_unmapped(&mut self, kind: &str, line: usize) {
        if self.warned_kinds.insert(kind.to_string()) {
            tracing::debug!(path = %self.path, kind, line, "node kind not in classification table");
            self.push(
                DiagnosticKind::UnclassifiedNodeKind,
                Some(line),
                format!("node kind `{kind}` looks decision-bearing but is not classified"),
            );
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Typed errors for the parser adapter. Everything downstream of a
/// successful parse reports through [`Diagnostic`] instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to load `{language}` grammar: {message}")]
    Grammar { language: String, message: String },

    #[error("parser produced no tree for {path}")]
    Parse { path: String },
}
