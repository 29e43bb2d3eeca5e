//! Go node classification.

use phf::phf_map;
use tree_sitter::{Language, Node};

use super::{node_text, BooleanOp, CommentKind, DecisionKind, NodeClassifier, SemanticRole};

static ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "if_statement" => SemanticRole::Decision(DecisionKind::If),
    "expression_switch_statement" => SemanticRole::SwitchLike,
    "type_switch_statement" => SemanticRole::SwitchLike,
    "select_statement" => SemanticRole::SwitchLike,
    "expression_case" => SemanticRole::CaseClause,
    "type_case" => SemanticRole::CaseClause,
    "communication_case" => SemanticRole::CaseClause,
    "default_case" => SemanticRole::CaseClause,
    "for_statement" => SemanticRole::Loop,
    "break_statement" => SemanticRole::JumpWithLabel,
    "continue_statement" => SemanticRole::JumpWithLabel,
    "goto_statement" => SemanticRole::JumpWithLabel,
    "fallthrough_statement" => SemanticRole::JumpWithLabel,
    "call_expression" => SemanticRole::CallExpression,
    "function_declaration" => SemanticRole::FunctionDeclaration,
    "method_declaration" => SemanticRole::FunctionDeclaration,
    "func_literal" => SemanticRole::FunctionDeclaration,
    "comment" => SemanticRole::CommentSpan(CommentKind::Line),
    "&&" => SemanticRole::BooleanOperator(BooleanOp::And),
    "||" => SemanticRole::BooleanOperator(BooleanOp::Or),
};

pub struct GoClassifier {
    language: Language,
}

impl GoClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for GoClassifier {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
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

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        match node.child_by_field_name("function") {
            Some(function) if function.kind() == "identifier" => {
                (None, Some(node_text(&function, source).to_string()))
            }
            Some(function) if function.kind() == "selector_expression" => {
                let receiver = function
                    .child_by_field_name("operand")
                    .map(|n| node_text(&n, source).to_string());
                let name = function
                    .child_by_field_name("field")
                    .map(|n| node_text(&n, source).to_string());
                (receiver, name)
            }
            _ => (None, None),
        }
    }

    fn is_jump_label(&self, node: &Node) -> bool {
        node.kind() == "label_name"
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // Clause node inside an already-counted for statement.
        kind == "for_clause"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::function_nodes;
    use crate::parse::parse_source;

    #[test]
    fn test_role_table() {
        let c = GoClassifier::new();
        assert_eq!(
            c.classify("if_statement"),
            SemanticRole::Decision(DecisionKind::If)
        );
        assert_eq!(c.classify("select_statement"), SemanticRole::SwitchLike);
        assert_eq!(c.classify("communication_case"), SemanticRole::CaseClause);
        assert_eq!(c.classify("for_statement"), SemanticRole::Loop);
        assert_eq!(
            c.classify("&&"),
            SemanticRole::BooleanOperator(BooleanOp::And)
        );
        assert_eq!(c.classify("binary_expression"), SemanticRole::Other);
    }

    #[test]
    fn test_call_identifiers() {
        let c = GoClassifier::new();
        let source = "package main\nfunc f() { g(); obj.h() }\n";
        let tree = parse_source(&c, "calls.go", source).unwrap();
        let function = function_nodes(&c, tree.root_node())[0];
        let body = function.child_by_field_name("body").unwrap();

        let mut calls = Vec::new();
        let mut work = vec![body];
        while let Some(node) = work.pop() {
            if node.kind() == "call_expression" {
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
            (Some("obj".to_string()), Some("h".to_string()))
        );
    }

    #[test]
    fn test_function_names() {
        let c = GoClassifier::new();
        let source = "package main\nfunc named() {}\nvar f = func() {}\n";
        let tree = parse_source(&c, "names.go", source).unwrap();
        let functions = function_nodes(&c, tree.root_node());
        assert_eq!(functions.len(), 2);
        assert_eq!(
            c.function_name(&functions[0], source),
            Some("named".to_string())
        );
        assert_eq!(c.function_name(&functions[1], source), None);
    }
}
