//! Node classification: per-language tables mapping grammar node kinds to
//! the semantic roles the metrics operate on.
//!
//! The metrics never branch on raw node kind strings. Each supported
//! language implements [`NodeClassifier`], which is mostly a static `phf`
//! table plus a handful of hooks for the places grammars disagree on shape
//! (call receivers, jump labels, comment markers). Adding a language means
//! adding one table module here and registering it below; the scorers do
//! not change.

use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

mod go;
mod java;
mod javascript;
mod python;
mod rust_lang;
mod typescript;

pub use go::GoClassifier;
pub use java::JavaClassifier;
pub use javascript::JavaScriptClassifier;
pub use python::PythonClassifier;
pub use rust_lang::RustClassifier;
pub use typescript::TypeScriptClassifier;

/// Flavor of a decision construct. Else/ElseIf get chain treatment in the
/// scorer; the rest behave as plain decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    If,
    ElseIf,
    Else,
    Ternary,
    Catch,
}

/// Boolean operator kind, for sequence counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Semantic role of a node kind. Unknown kinds classify [`SemanticRole::Other`]
/// and never score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticRole {
    Decision(DecisionKind),
    Loop,
    /// switch / match / select style multi-way branch. Counts once; its
    /// case clauses are free but their bodies nest one level deeper.
    SwitchLike,
    CaseClause,
    /// Applied to operator token kinds (`&&`, `||`, `and`, `or`).
    BooleanOperator(BooleanOp),
    FunctionDeclaration,
    CallExpression,
    JumpWithLabel,
    CommentSpan(CommentKind),
    Other,
}

/// One comment in the source, as an ordered byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    pub start_byte: usize,
    pub end_byte: usize,
    /// Start line (1-indexed), for diagnostics.
    pub start_line: usize,
    pub kind: CommentKind,
    /// False when a block comment's close marker is missing before EOF.
    pub terminated: bool,
}

/// Per-language classification surface consumed by the metrics.
pub trait NodeClassifier: Send + Sync {
    fn language_id(&self) -> &'static str;

    fn file_extensions(&self) -> &'static [&'static str];

    fn grammar(&self) -> Language;

    /// Static kind-to-role table.
    fn roles(&self) -> &'static phf::Map<&'static str, SemanticRole>;

    /// Pure lookup; unknown kinds are `Other`.
    fn classify(&self, kind: &str) -> SemanticRole {
        self.roles()
            .get(kind)
            .copied()
            .unwrap_or(SemanticRole::Other)
    }

    /// Tree-sitter query capturing every comment node.
    fn comment_query(&self) -> &'static str;

    /// The receiver keyword that still means "this function's owner" in a
    /// recursive method call, if the language has one.
    fn self_keyword(&self) -> Option<&'static str> {
        None
    }

    /// Open/close markers for block comments, if the language has them.
    fn block_comment_markers(&self) -> Option<(&'static str, &'static str)> {
        Some(("/*", "*/"))
    }

    /// The boolean operator of a binary boolean expression node, resolved
    /// through the role table of its `operator` field child.
    fn boolean_operator(&self, node: &Node, _source: &str) -> Option<BooleanOp> {
        let op = node.child_by_field_name("operator")?;
        match self.classify(op.kind()) {
            SemanticRole::BooleanOperator(kind) => Some(kind),
            _ => None,
        }
    }

    /// `(receiver, callee name)` of a call node. `(None, None)` when the
    /// callee is not a plain or receiver-qualified name.
    fn call_identifiers(&self, node: &Node, source: &str) -> (Option<String>, Option<String>);

    /// Declared name of a function node; `None` for anonymous definitions.
    fn function_name(&self, node: &Node, source: &str) -> Option<String> {
        node.child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string())
    }

    /// Whether a child of a jump node is a target label.
    fn is_jump_label(&self, _node: &Node) -> bool {
        false
    }

    /// Literal-valued kinds, erased to a placeholder by the fingerprinter.
    fn is_literal(&self, kind: &str) -> bool {
        matches!(
            kind,
            "string"
                | "string_literal"
                | "raw_string_literal"
                | "interpreted_string_literal"
                | "template_string"
                | "char_literal"
                | "rune_literal"
                | "int_literal"
                | "integer"
                | "float"
                | "float_literal"
                | "imaginary_literal"
                | "decimal_integer_literal"
                | "hex_integer_literal"
                | "binary_integer_literal"
                | "octal_integer_literal"
                | "decimal_floating_point_literal"
                | "number"
                | "true"
                | "false"
                | "none"
                | "nil"
                | "null"
                | "null_literal"
        )
    }

    /// Kinds whose names trip the decision-word heuristic but are known
    /// structural parts of already-counted constructs.
    fn benign_unmapped(&self, _kind: &str) -> bool {
        false
    }
}

/// Extract the text of a node, or empty string on encoding failure.
pub(crate) fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Display name for a function node: its declared name, or a synthesized
/// `<lambda@line N>` for anonymous definitions.
pub fn display_name(classifier: &dyn NodeClassifier, node: &Node, source: &str) -> String {
    classifier
        .function_name(node, source)
        .unwrap_or_else(|| format!("<lambda@line {}>", node.start_position().row + 1))
}

/// Collect all comment spans of a tree, ordered by start byte.
pub fn comment_spans(
    classifier: &dyn NodeClassifier,
    root: Node,
    source: &str,
) -> anyhow::Result<Vec<CommentSpan>> {
    let query = Query::new(&classifier.grammar(), classifier.comment_query())?;
    let mut cursor = QueryCursor::new();
    let mut spans = Vec::new();

    let mut matches = cursor.matches(&query, root, source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let text = node_text(&node, source);
            let (kind, terminated) = match classifier.block_comment_markers() {
                Some((open, close)) if text.starts_with(open) => {
                    let closed =
                        text.len() >= open.len() + close.len() && text.ends_with(close);
                    (CommentKind::Block, closed)
                }
                _ => (CommentKind::Line, true),
            };
            spans.push(CommentSpan {
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
                start_line: node.start_position().row + 1,
                kind,
                terminated,
            });
        }
    }

    spans.sort_by_key(|s| s.start_byte);
    spans.dedup_by_key(|s| s.start_byte);
    Ok(spans)
}

/// Collect every function-declaration node in pre-order, nested definitions
/// included.
pub fn function_nodes<'tree>(
    classifier: &dyn NodeClassifier,
    root: Node<'tree>,
) -> Vec<Node<'tree>> {
    let mut functions = Vec::new();
    let mut work = vec![root];
    while let Some(node) = work.pop() {
        if matches!(
            classifier.classify(node.kind()),
            SemanticRole::FunctionDeclaration
        ) {
            functions.push(node);
        }
        for i in (0..node.named_child_count()).rev() {
            if let Some(child) = node.named_child(i) {
                work.push(child);
            }
        }
    }
    functions
}

static GO: OnceCell<GoClassifier> = OnceCell::new();
static RUST: OnceCell<RustClassifier> = OnceCell::new();
static PYTHON: OnceCell<PythonClassifier> = OnceCell::new();
static JAVASCRIPT: OnceCell<JavaScriptClassifier> = OnceCell::new();
static TYPESCRIPT: OnceCell<TypeScriptClassifier> = OnceCell::new();
static JAVA: OnceCell<JavaClassifier> = OnceCell::new();

/// Look up a classifier by file extension (without the leading dot).
pub fn classifier_for_extension(extension: &str) -> Option<&'static dyn NodeClassifier> {
    match extension {
        "go" => Some(GO.get_or_init(GoClassifier::new)),
        "rs" => Some(RUST.get_or_init(RustClassifier::new)),
        "py" => Some(PYTHON.get_or_init(PythonClassifier::new)),
        "js" | "jsx" | "mjs" | "cjs" => Some(JAVASCRIPT.get_or_init(JavaScriptClassifier::new)),
        "ts" | "mts" | "cts" => Some(TYPESCRIPT.get_or_init(TypeScriptClassifier::new)),
        "java" => Some(JAVA.get_or_init(JavaClassifier::new)),
        _ => None,
    }
}

/// Look up a classifier by language identifier.
pub fn classifier_for_language(language: &str) -> Option<&'static dyn NodeClassifier> {
    match language {
        "go" => Some(GO.get_or_init(GoClassifier::new)),
        "rust" => Some(RUST.get_or_init(RustClassifier::new)),
        "python" => Some(PYTHON.get_or_init(PythonClassifier::new)),
        "javascript" => Some(JAVASCRIPT.get_or_init(JavaScriptClassifier::new)),
        "typescript" => Some(TYPESCRIPT.get_or_init(TypeScriptClassifier::new)),
        "java" => Some(JAVA.get_or_init(JavaClassifier::new)),
        _ => None,
    }
}

pub fn supported_languages() -> &'static [&'static str] {
    &["go", "rust", "python", "javascript", "typescript", "java"]
}
