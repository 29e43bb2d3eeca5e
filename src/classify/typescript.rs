//! TypeScript node classification.
//!
//! The statement and expression grammar is shared with JavaScript, so the
//! role table and call-identifier logic come from that module. Only the
//! grammar, extensions and the type-level kinds differ.

use tree_sitter::{Language, Node};

use super::{javascript, NodeClassifier, SemanticRole};

pub struct TypeScriptClassifier {
    language: Language,
}

impl TypeScriptClassifier {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}

impl Default for TypeScriptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClassifier for TypeScriptClassifier {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["ts", "mts", "cts"]
    }

    fn grammar(&self) -> Language {
        self.language.clone()
    }

    fn roles(&self) -> &'static phf::Map<&'static str, SemanticRole> {
        &javascript::ROLES
    }

    fn comment_query(&self) -> &'static str {
        "(comment) @comment"
    }

    fn self_keyword(&self) -> Option<&'static str> {
        Some("this")
    }

    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>) {
        javascript::call_identifiers(node, source)
    }

    fn is_jump_label(&self, node: &Node) -> bool {
        node.kind() == "statement_identifier"
    }

    fn benign_unmapped(&self, kind: &str) -> bool {
        // conditional_type is a type-level construct, not control flow.
        matches!(kind, "switch_body" | "conditional_type")
    }
}
