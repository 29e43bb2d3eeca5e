//! Cognitive complexity scoring.
//!
//! One function subtree in, one [`ComplexityScore`] out. Control constructs
//! charge a fundamental increment plus the current nesting depth and open a
//! nesting frame for their children. else/else-if continuations, boolean
//! operator sequences, labeled jumps and direct self-recursion charge flat
//! increments with no frame. Traversal uses an explicit work stack, so
//! pathological nesting depth cannot overflow the call stack.

use tree_sitter::Node;

use crate::classify::{display_name, BooleanOp, DecisionKind, NodeClassifier, SemanticRole};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::results::{ComplexityScore, Increment};

const PAREN_KIND: &str = "parenthesized_expression";

/// Kind-string segments that suggest an unclassified kind sits in a
/// decision-bearing position. Matched on whole underscore-separated
/// segments; substring matching would flag every `identifier`.
const DECISION_SEGMENTS: &[&str] = &[
    "if",
    "elif",
    "else",
    "for",
    "while",
    "loop",
    "switch",
    "match",
    "case",
    "catch",
    "except",
    "when",
    "conditional",
    "ternary",
];

/// Score one function subtree. The node must be free of parse errors;
/// the engine filters malformed functions before calling this.
pub fn score_function(
    classifier: &dyn NodeClassifier,
    function: Node,
    source: &str,
    sink: &mut DiagnosticSink,
) -> ComplexityScore {
    let scorer = Scorer {
        classifier,
        source,
        sink,
        increments: Vec::new(),
        depth: 0,
        names: Vec::new(),
        root_id: function.id(),
    };
    scorer.run(function)
}

enum Step<'t> {
    Enter(Node<'t>),
    /// Close the nesting frame opened by a control construct.
    PopFrame,
    /// Leave a nested function's name scope.
    PopName,
}

struct Scorer<'a> {
    classifier: &'a dyn NodeClassifier,
    source: &'a str,
    sink: &'a mut DiagnosticSink,
    increments: Vec<Increment>,
    depth: u32,
    /// Innermost-last stack of enclosing function names, for recursion
    /// detection.
    names: Vec<String>,
    root_id: usize,
}

impl<'a> Scorer<'a> {
    fn run(mut self, function: Node) -> ComplexityScore {
        self.names
            .push(display_name(self.classifier, &function, self.source));

        let mut work = vec![Step::Enter(function)];
        while let Some(step) = work.pop() {
            match step {
                Step::Enter(node) => self.enter(node, &mut work),
                Step::PopFrame => self.depth -= 1,
                Step::PopName => {
                    self.names.pop();
                }
            }
        }

        debug_assert_eq!(self.depth, 0);
        ComplexityScore::from_increments(self.increments)
    }

    fn enter<'t>(&mut self, node: Node<'t>, work: &mut Vec<Step<'t>>) {
        match self.classifier.classify(node.kind()) {
            SemanticRole::Decision(DecisionKind::If) => {
                if self.is_chain_continuation(&node) {
                    // `else if` already paid for by its wrapping clause.
                    self.schedule_children(node, work);
                } else if self.is_alternative_child(&node) {
                    // `else if` hanging directly off the previous if.
                    self.add(&node, 1, 0);
                    self.schedule_children(node, work);
                } else {
                    self.control(node, work);
                }
            }
            SemanticRole::Decision(DecisionKind::ElseIf | DecisionKind::Else) => {
                self.add(&node, 1, 0);
                self.schedule_children(node, work);
            }
            SemanticRole::Decision(_) | SemanticRole::Loop | SemanticRole::SwitchLike => {
                // A braceless `else while`/`else switch` sits directly in
                // the alternative field and still owes the chain's flat +1
                // on top of its own increments.
                if self.is_alternative_child(&node) {
                    self.add(&node, 1, 0);
                }
                self.control(node, work);
            }
            SemanticRole::CaseClause | SemanticRole::BooleanOperator(_) => {
                self.schedule_children(node, work);
            }
            SemanticRole::FunctionDeclaration => {
                if node.id() == self.root_id {
                    self.schedule_children(node, work);
                } else {
                    // Nested definition: flat definition cost, plus one
                    // nesting level for everything inside it. The nested
                    // function is also scored on its own by the engine.
                    self.add(&node, 1, 0);
                    self.names
                        .push(display_name(self.classifier, &node, self.source));
                    self.depth += 1;
                    work.push(Step::PopName);
                    work.push(Step::PopFrame);
                    self.schedule_children(node, work);
                }
            }
            SemanticRole::CallExpression => {
                self.check_recursion(&node);
                self.schedule_children(node, work);
            }
            SemanticRole::JumpWithLabel => {
                let mut cursor = node.walk();
                let labeled = node
                    .named_children(&mut cursor)
                    .any(|child| self.classifier.is_jump_label(&child));
                if labeled {
                    self.add(&node, 1, 0);
                }
                self.schedule_children(node, work);
            }
            SemanticRole::CommentSpan(_) => {}
            SemanticRole::Other => {
                let kind = node.kind();
                if self.is_alternative_child(&node) {
                    // Plain else branch (block in the alternative field).
                    self.add(&node, 1, 0);
                } else if self.classifier.boolean_operator(&node, self.source).is_some() {
                    if self.is_sequence_root(&node) {
                        self.scan_boolean_sequence(node);
                    }
                } else if looks_decision_bearing(kind) && !self.classifier.benign_unmapped(kind) {
                    self.sink
                        .warn_unmapped(kind, node.start_position().row + 1);
                }
                self.schedule_children(node, work);
            }
        }
    }

    /// Decision/loop/switch: fundamental + nesting, then one frame deeper
    /// for the children.
    fn control<'t>(&mut self, node: Node<'t>, work: &mut Vec<Step<'t>>) {
        self.add(&node, 1, self.depth);
        self.depth += 1;
        work.push(Step::PopFrame);
        self.schedule_children(node, work);
    }

    fn schedule_children<'t>(&self, node: Node<'t>, work: &mut Vec<Step<'t>>) {
        for i in (0..node.named_child_count()).rev() {
            if let Some(child) = node.named_child(i) {
                work.push(Step::Enter(child));
            }
        }
    }

    fn add(&mut self, node: &Node, fundamental: u32, nesting: u32) {
        let pos = node.start_position();
        self.increments.push(Increment {
            kind: node.kind().to_string(),
            line: pos.row + 1,
            column: pos.column + 1,
            fundamental,
            nesting,
        });
    }

    /// An if node wrapped by a dedicated else/elif clause; the clause
    /// already charged the chain increment.
    fn is_chain_continuation(&self, node: &Node) -> bool {
        node.parent().map_or(false, |parent| {
            matches!(
                self.classifier.classify(parent.kind()),
                SemanticRole::Decision(DecisionKind::Else | DecisionKind::ElseIf)
            )
        })
    }

    /// Whether the node sits in the `alternative` field of an if-kind
    /// parent (the grammars without a dedicated else clause node).
    fn is_alternative_child(&self, node: &Node) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        if !matches!(
            self.classifier.classify(parent.kind()),
            SemanticRole::Decision(DecisionKind::If)
        ) {
            return false;
        }
        let mut cursor = parent.walk();
        let in_alternative = parent
            .children_by_field_name("alternative", &mut cursor)
            .any(|child| child == *node);
        in_alternative
    }

    fn check_recursion(&mut self, node: &Node) {
        let (receiver, name) = self.classifier.call_identifiers(node, self.source);
        let Some(name) = name else {
            return;
        };
        if self.names.last().map(String::as_str) != Some(name.as_str()) {
            return;
        }
        match receiver.as_deref() {
            None => self.add(node, 1, 0),
            Some(r) if Some(r) == self.classifier.self_keyword() => self.add(node, 1, 0),
            Some(r) => self.sink.push(
                DiagnosticKind::UnresolvedRecursionTarget,
                Some(node.start_position().row + 1),
                format!("call to `{name}` through receiver `{r}` is not counted as self-recursion"),
            ),
        }
    }

    /// A boolean binary whose nearest non-parenthesis ancestor is not
    /// itself a boolean binary. The whole operator sequence is scanned
    /// once, from here.
    fn is_sequence_root(&self, node: &Node) -> bool {
        let mut parent = node.parent();
        while let Some(p) = parent {
            if p.kind() == PAREN_KIND {
                parent = p.parent();
            } else {
                return self.classifier.boolean_operator(&p, self.source).is_none();
            }
        }
        true
    }

    /// Flatten the operator sequence in source order, through parentheses,
    /// and charge +1 for the first operator and +1 per operator-kind
    /// change. `a && b && c` costs 1; `a && b || c` costs 2.
    fn scan_boolean_sequence(&mut self, root: Node) {
        enum Visit<'t> {
            Descend(Node<'t>),
            Record(Node<'t>),
        }

        let mut steps = vec![Visit::Descend(root)];
        let mut operators: Vec<(Node, BooleanOp)> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Visit::Record(node) => {
                    if let Some(op) = self.classifier.boolean_operator(&node, self.source) {
                        let site = node.child_by_field_name("operator").unwrap_or(node);
                        operators.push((site, op));
                    }
                }
                Visit::Descend(node) => {
                    // In-order: left subtree, this operator, right subtree.
                    if let Some(right) = node.child_by_field_name("right").map(unwrap_parens) {
                        if self.classifier.boolean_operator(&right, self.source).is_some() {
                            steps.push(Visit::Descend(right));
                        }
                    }
                    steps.push(Visit::Record(node));
                    if let Some(left) = node.child_by_field_name("left").map(unwrap_parens) {
                        if self.classifier.boolean_operator(&left, self.source).is_some() {
                            steps.push(Visit::Descend(left));
                        }
                    }
                }
            }
        }

        let mut previous: Option<BooleanOp> = None;
        for (site, op) in operators {
            if previous != Some(op) {
                self.add(&site, 1, 0);
            }
            previous = Some(op);
        }
    }
}

fn unwrap_parens(mut node: Node) -> Node {
    while node.kind() == PAREN_KIND {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn looks_decision_bearing(kind: &str) -> bool {
    kind.split('_').any(|segment| DECISION_SEGMENTS.contains(&segment))
}
