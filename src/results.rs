//! Result records produced by one analysis run.
//!
//! Everything here is a derived, read-only value: created while a file is
//! analyzed, merged into the final [`AnalysisReport`], and never persisted
//! across runs. All types carry serde derives so downstream report
//! formatters (text, JSON, SARIF) can serialize them without adapters.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// One scoring event recorded by the complexity scorer.
///
/// `fundamental` is the flat charge for the construct being present;
/// `nesting` is the extra charge proportional to how deeply it sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Increment {
    /// Node kind that triggered the increment.
    pub kind: String,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (1-indexed).
    pub column: usize,
    pub fundamental: u32,
    pub nesting: u32,
}

/// Cognitive complexity of a single function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityScore {
    /// Sum of all fundamental and nesting increments. Never negative;
    /// straight-line code scores exactly 0.
    pub total: u32,
    /// Ordered increment list, for diagnostics and testing.
    pub increments: Vec<Increment>,
}

impl ComplexityScore {
    pub fn from_increments(increments: Vec<Increment>) -> Self {
        let total = increments.iter().map(|i| i.fundamental + i.nesting).sum();
        Self { total, increments }
    }
}

/// Per-function complexity entry in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// File path label supplied by the caller.
    pub path: String,
    /// Function name, or a synthesized `<lambda@line N>` for anonymous
    /// definitions.
    pub name: String,
    pub span: Span,
    pub score: ComplexityScore,
}

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Code,
    Comment,
    Blank,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Code => write!(f, "code"),
            LineKind::Comment => write!(f, "comment"),
            LineKind::Blank => write!(f, "blank"),
        }
    }
}

/// One physical line and its classification. Every line of a file gets
/// exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line number (1-indexed).
    pub line: usize,
    pub kind: LineKind,
    /// Byte range of the physical line, terminator included.
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Per-file line classification aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLines {
    pub path: String,
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
    pub records: Vec<LineRecord>,
}

/// Identity of a function inside a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    pub path: String,
    pub name: String,
    pub start_line: usize,
}

/// Functions sharing one structural fingerprint. Only emitted for groups
/// with at least two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Hex-encoded structural fingerprint shared by all members.
    pub fingerprint: String,
    pub members: Vec<FunctionRef>,
}

/// Merged output of one analysis run over a set of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub functions: Vec<FunctionRecord>,
    pub files: Vec<FileLines>,
    pub duplicates: Vec<DuplicateGroup>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// Find a scored function by name, across all files.
    pub fn function(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find the line aggregate for a file path.
    pub fn file_lines(&self, path: &str) -> Option<&FileLines> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_totals_increments() {
        let score = ComplexityScore::from_increments(vec![
            Increment {
                kind: "if_statement".to_string(),
                line: 1,
                column: 1,
                fundamental: 1,
                nesting: 0,
            },
            Increment {
                kind: "if_statement".to_string(),
                line: 2,
                column: 5,
                fundamental: 1,
                nesting: 1,
            },
        ]);
        assert_eq!(score.total, 3);
    }

    #[test]
    fn test_empty_score_is_zero() {
        let score = ComplexityScore::from_increments(vec![]);
        assert_eq!(score.total, 0);
    }
}
