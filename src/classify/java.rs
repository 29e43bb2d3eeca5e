//! Java node classification.
//!
//! Java's grammar puts the else branch directly in the `alternative` field
//! of `if_statement` with no wrapper clause node, so chain handling runs
//! entirely on the field check. Both classic `switch_block_statement_group`
//! cases and arrow `switch_rule` cases are case clauses.

use phf::phf_map;
use tree_sitter::{Language, Node};

use super::{node_text, BooleanOp, CommentKind, DecisionKind, NodeClassifier, SemanticRole};

static ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "if_statement" => SemanticRole::Decision(DecisionKind::If),
    "ternary_expression" => SemanticRole::Decision(DecisionKind::Ternary),
    "catch_clause" => SemanticRole::Decision(DecisionKind::Catch),
    "switch_expression" => SemanticRole::SwitchLike,
    "switch_block_statement_group" => SemanticRole::CaseClause,
    "switch_rule" => SemanticRole::CaseClause,
    "for_statement" => SemanticRole::Loop,
    "enhanced_for_statement" => SemanticRole::Loop,
    "while_statement" => SemanticRole::Loop,
    "do_statement" => SemanticRole::Loop,
    "break_statement" => SemanticRole::JumpWithLabel,
    "continue_statement" => SemanticRole::JumpWithLabel,
    "method_invocation" => SemanticRole::CallExpression,
    "method_declaration" => SemanticRole::FunctionDeclaration,
    "constructor_declaration" => SemanticRole::FunctionDeclaration,
    "lambda_expression" => SemanticRole::FunctionDeclaration,
    "line_comment" => SemanticRole::CommentSpan(CommentKind::Line),
    "block_comment" => SemanticRole::CommentSpan(CommentKind::Block),
    "&&" => SemanticRole::BooleanOperator(BooleanOp::And),
    "||" => SemanticRole::BooleanOperator(BooleanOp::Or),
};

pub struct JavaClassifier {
    language: Language,
}

impl JavaClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for JavaClassifier {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
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
        Some("this")
    }

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        let receiver = node
            .child_by_field_name("object")
            .map(|n| node_text(&n, source).to_string());
        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string());
        (receiver, name)
    }

    fn is_jump_label(&self, node: &Node) -> bool {
        // The only named child a break/continue can carry is its label.
        node.kind() == "identifier"
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // Braces block and case labels of an already-counted switch.
        matches!(kind, "switch_block" | "switch_label")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::function_nodes;
    use crate::parse::parse_source;

    #[test]
    fn test_role_table() {
        let c = JavaClassifier::new();
        assert_eq!(
            c.classify("if_statement"),
            SemanticRole::Decision(DecisionKind::If)
        );
        assert_eq!(c.classify("switch_expression"), SemanticRole::SwitchLike);
        assert_eq!(
            c.classify("switch_block_statement_group"),
            SemanticRole::CaseClause
        );
        assert_eq!(c.classify("enhanced_for_statement"), SemanticRole::Loop);
        assert_eq!(
            c.classify("lambda_expression"),
            SemanticRole::FunctionDeclaration
        );
        assert_eq!(c.classify("method_invocation"), SemanticRole::CallExpression);
    }

    #[test]
    fn test_call_identifiers() {
        let c = JavaClassifier::new();
        let source = "class T { void f() { g(); this.f(); } }\n";
        let tree = parse_source(&c, "T.java", source).unwrap();
        let function = function_nodes(&c, tree.root_node())[0];

        let mut calls = Vec::new();
        let mut work = vec![function];
        while let Some(node) = work.pop() {
            if node.kind() == "method_invocation" {
                calls.push(c.call_identifiers(&node, source));
            }
            for i in (0..node.named_child_count()).rev() {
                work.push(node.named_child(i).unwrap());
            }
        }
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (None, Some("g".to_string())));
        assert_eq!(
            calls[1],
            (Some("this".to_string()), Some("f".to_string()))
        );
    }

    #[test]
    fn test_method_names() {
        let c = JavaClassifier::new();
        let source = "class T { T() {} void run() {} }\n";
        let tree = parse_source(&c, "T.java", source).unwrap();
        let functions = function_nodes(&c, tree.root_node());
        assert_eq!(functions.len(), 2);
        assert_eq!(c.function_name(&functions[0], source), Some("T".to_string()));
        assert_eq!(
            c.function_name(&functions[1], source),
            Some("run".to_string())
        );
    }
}
