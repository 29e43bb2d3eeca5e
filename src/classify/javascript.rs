//! JavaScript node classification.

use phf::phf_map;
use tree_sitter::{Language, Node};

use super::{node_text, BooleanOp, CommentKind, DecisionKind, NodeClassifier, SemanticRole};

pub(super) static ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "if_statement" => SemanticRole::Decision(DecisionKind::If),
    "else_clause" => SemanticRole::Decision(DecisionKind::Else),
    "ternary_expression" => SemanticRole::Decision(DecisionKind::Ternary),
    "catch_clause" => SemanticRole::Decision(DecisionKind::Catch),
    "switch_statement" => SemanticRole::SwitchLike,
    "switch_case" => SemanticRole::CaseClause,
    "switch_default" => SemanticRole::CaseClause,
    "for_statement" => SemanticRole::Loop,
    "for_in_statement" => SemanticRole::Loop,
    "while_statement" => SemanticRole::Loop,
    "do_statement" => SemanticRole::Loop,
    "break_statement" => SemanticRole::JumpWithLabel,
    "continue_statement" => SemanticRole::JumpWithLabel,
    "call_expression" => SemanticRole::CallExpression,
    "function_declaration" => SemanticRole::FunctionDeclaration,
    "function_expression" => SemanticRole::FunctionDeclaration,
    "generator_function_declaration" => SemanticRole::FunctionDeclaration,
    "generator_function" => SemanticRole::FunctionDeclaration,
    "method_definition" => SemanticRole::FunctionDeclaration,
    "arrow_function" => SemanticRole::FunctionDeclaration,
    "comment" => SemanticRole::CommentSpan(CommentKind::Line),
    "&&" => SemanticRole::BooleanOperator(BooleanOp::And),
    "||" => SemanticRole::BooleanOperator(BooleanOp::Or),
};

/// `(receiver, callee name)` for a `call_expression`; shared with the
/// TypeScript classifier, whose expression grammar is the same.
pub(super) fn call_identifiers(node: &Node, source: &str) -> (Option<String>, Option<String>) {
    match node.child_by_field_name("function") {
        Some(function) if function.kind() == "identifier" => {
            (None, Some(node_text(&function, source).to_string()))
        }
        Some(function) if function.kind() == "member_expression" => {
            let receiver = function
                .child_by_field_name("object")
                .map(|n| node_text(&n, source).to_string());
            let name = function
                .child_by_field_name("property")
                .map(|n| node_text(&n, source).to_string());
            (receiver, name)
        }
        _ => (None, None),
    }
}

pub struct JavaScriptClassifier {
    language: Language,
}

impl JavaScriptClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JavaScriptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for JavaScriptClassifier {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
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
        Some("this")
    }

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        call_identifiers(node, source)
    }

    fn is_jump_label(&self, node: &Node) -> bool {
        node.kind() == "statement_identifier"
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // The braces block of a switch; the statement itself is counted.
        kind == "switch_body"
    }
}
