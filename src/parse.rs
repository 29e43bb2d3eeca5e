//! Parser adapter: source text in, syntax tree out.
//!
//! The metrics consume only the generic node surface (kind, span, ordered
//! children). This module is the single place a tree-sitter `Parser` is
//! constructed; it performs no file-system I/O, callers supply the path
//! purely as a label.

use tree_sitter::{Parser, Tree};

use crate::classify::NodeClassifier;
use crate::diagnostics::EngineError;

/// Parse source text with the classifier's grammar.
pub fn parse_source(
    classifier: &dyn NodeClassifier,
    path: &str,
    source: &str,
) -> Result<Tree, EngineError> {
    let mut parser = Parser::new();
    parser
        .set_language(&classifier.grammar())
        .map_err(|e| EngineError::Grammar {
            language: classifier.language_id().to_string(),
            message: e.to_string(),
        })?;
    parser.parse(source, None).ok_or_else(|| EngineError::Parse {
        path: path.to_string(),
    })
}

/// Whether a damaged tree still has analyzable top-level content. A tree
/// that is nothing but ERROR nodes is treated as a parse failure; a tree
/// with localized errors is analyzed function by function.
pub(crate) fn is_salvageable(root: tree_sitter::Node) -> bool {
    let mut cursor = root.walk();
    let salvageable = root
        .named_children(&mut cursor)
        .any(|child| child.kind() != "ERROR");
    salvageable
}
