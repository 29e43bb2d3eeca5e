//! Rust node classification.
//!
//! `else if` in Rust parses as an `if_expression` wrapped by an
//! `else_clause`, so the chain increment is charged on the clause node and
//! the wrapped if is treated as a continuation by the scorer.

use phf::phf_map;
use tree_sitter::{Language, Node};

use super::{node_text, BooleanOp, CommentKind, DecisionKind, NodeClassifier, SemanticRole};

static ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "if_expression" => SemanticRole::Decision(DecisionKind::If),
    "else_clause" => SemanticRole::Decision(DecisionKind::Else),
    "match_expression" => SemanticRole::SwitchLike,
    "match_arm" => SemanticRole::CaseClause,
    "for_expression" => SemanticRole::Loop,
    "while_expression" => SemanticRole::Loop,
    "loop_expression" => SemanticRole::Loop,
    "break_expression" => SemanticRole::JumpWithLabel,
    "continue_expression" => SemanticRole::JumpWithLabel,
    "call_expression" => SemanticRole::CallExpression,
    "function_item" => SemanticRole::FunctionDeclaration,
    "closure_expression" => SemanticRole::FunctionDeclaration,
    "line_comment" => SemanticRole::CommentSpan(CommentKind::Line),
    "block_comment" => SemanticRole::CommentSpan(CommentKind::Block),
    "&&" => SemanticRole::BooleanOperator(BooleanOp::And),
    "||" => SemanticRole::BooleanOperator(BooleanOp::Or),
};

pub struct RustClassifier {
    language: Language,
}

impl RustClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_rust::LANGUAGE.into(),
        }
    }
}

impl Default for RustClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for RustClassifier {
    fn language_id(&self) -> &'static str {
        "rust"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn grammar(&self) -> Language {
        self.language.clone()
    }

    fn roles(&self) -> &'static phf::Map<&'static str, SemanticRole> {
        &ROLES
    }

    fn comment_query(&self) -> &'static str {
        "[(line_comment) (block_comment)] @comment"
    }

    fn self_keyword(&self) -> Option<&'static str> {
        Some("self")
    }

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        match node.child_by_field_name("function") {
            Some(function) if function.kind() == "identifier" => {
                (None, Some(node_text(&function, source).to_string()))
            }
            Some(function) if function.kind() == "field_expression" => {
                let receiver = function
                    .child_by_field_name("value")
                    .map(|n| node_text(&n, source).to_string());
                let name = function
                    .child_by_field_name("field")
                    .map(|n| node_text(&n, source).to_string());
                (receiver, name)
            }
            Some(function) if function.kind() == "scoped_identifier" => {
                let receiver = function
                    .child_by_field_name("path")
                    .map(|n| node_text(&n, source).to_string());
                let name = function
                    .child_by_field_name("name")
                    .map(|n| node_text(&n, source).to_string());
                (receiver, name)
            }
            _ => (None, None),
        }
    }

    fn is_jump_label(&self, node: &Node) -> bool {
        node.kind() == "loop_label"
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // Structural parts of match expressions and loop labels; the
        // construct that carries the score is already classified.
        matches!(kind, "match_pattern" | "match_block" | "loop_label")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::function_nodes;
    use crate::parse::parse_source;

    #[test]
    fn test_role_table() {
        let c = RustClassifier::new();
        assert_eq!(
            c.classify("if_expression"),
            SemanticRole::Decision(DecisionKind::If)
        );
        assert_eq!(
            c.classify("else_clause"),
            SemanticRole::Decision(DecisionKind::Else)
        );
        assert_eq!(c.classify("match_expression"), SemanticRole::SwitchLike);
        assert_eq!(c.classify("match_arm"), SemanticRole::CaseClause);
        assert_eq!(c.classify("loop_expression"), SemanticRole::Loop);
        assert_eq!(
            c.classify("closure_expression"),
            SemanticRole::FunctionDeclaration
        );
    }

    #[test]
    fn test_method_call_identifiers() {
        let c = RustClassifier::new();
        let source = "fn run(&self) { self.step(); helper(); }\n";
        let tree = parse_source(&c, "calls.rs", source).unwrap();
        let function = function_nodes(&c, tree.root_node())[0];

        let mut calls = Vec::new();
        let mut work = vec![function];
        while let Some(node) = work.pop() {
            if node.kind() == "call_expression" {
                calls.push(c.call_identifiers(&node, source));
            }
            for i in (0..node.named_child_count()).rev() {
                work.push(node.named_child(i).unwrap());
            }
        }

        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            (Some("self".to_string()), Some("step".to_string()))
        );
        assert_eq!(calls[1], (None, Some("helper".to_string())));
    }

    #[test]
    fn test_boolean_operator_via_operator_field() {
        let c = RustClassifier::new();
        let source = "fn f(a: bool, b: bool) -> bool { a && b }\n";
        let tree = parse_source(&c, "bool.rs", source).unwrap();

        let mut found = None;
        let mut work = vec![tree.root_node()];
        while let Some(node) = work.pop() {
            if node.kind() == "binary_expression" {
                found = c.boolean_operator(&node, source);
            }
            for i in (0..node.named_child_count()).rev() {
                work.push(node.named_child(i).unwrap());
            }
        }
        assert_eq!(found, Some(BooleanOp::And));
    }
}
