//! Python node classification.
//!
//! Python has no block comments; docstrings are string expressions and
//! stay out of the comment role on purpose. The `else_clause` role also
//! covers for-else and try-else, which charge the same flat increment an
//! if-else does.

use phf::phf_map;
use tree_sitter::{Language, Node};

use super::{node_text, BooleanOp, CommentKind, DecisionKind, NodeClassifier, SemanticRole};

static ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "if_statement" => SemanticRole::Decision(DecisionKind::If),
    "elif_clause" => SemanticRole::Decision(DecisionKind::ElseIf),
    "else_clause" => SemanticRole::Decision(DecisionKind::Else),
    "conditional_expression" => SemanticRole::Decision(DecisionKind::Ternary),
    "except_clause" => SemanticRole::Decision(DecisionKind::Catch),
    "match_statement" => SemanticRole::SwitchLike,
    "case_clause" => SemanticRole::CaseClause,
    "for_statement" => SemanticRole::Loop,
    "while_statement" => SemanticRole::Loop,
    "call" => SemanticRole::CallExpression,
    "function_definition" => SemanticRole::FunctionDeclaration,
    "lambda" => SemanticRole::FunctionDeclaration,
    "comment" => SemanticRole::CommentSpan(CommentKind::Line),
    "and" => SemanticRole::BooleanOperator(BooleanOp::And),
    "or" => SemanticRole::BooleanOperator(BooleanOp::Or),
};

pub struct PythonClassifier {
    language: Language,
}

impl PythonClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for PythonClassifier {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn grammar(&self) -> Language {
        self.language.clone()
    }

    fn roles(&self) -> &'static phf::Map<&'static str, SemanticRole> {
        &ROLES
    }

    fn comment_query(&self) -> &'static str {
        "(comment) @comment"
    }

    fn self_keyword(&self) -> Option<&'static str> {
        Some("self")
    }

    fn block_comment_markers(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        match node.child_by_field_name("function") {
            Some(function) if function.kind() == "identifier" => {
                (None, Some(node_text(&function, source).to_string()))
            }
            Some(function) if function.kind() == "attribute" => {
                let receiver = function
                    .child_by_field_name("object")
                    .map(|n| node_text(&n, source).to_string());
                let name = function
                    .child_by_field_name("attribute")
                    .map(|n| node_text(&n, source).to_string());
                (receiver, name)
            }
            _ => (None, None),
        }
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // Pattern node inside an already-counted case clause.
        kind == "case_pattern"
    }
}
