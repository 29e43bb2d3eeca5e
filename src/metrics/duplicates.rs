//! Exact structural duplicate detection.
//!
//! Each function subtree gets a blake3 fingerprint composed post-order
//! from node kinds alone. Identifier names and positions never feed the
//! hash, and literal-valued nodes collapse to one placeholder, so two
//! functions that differ only in naming and literal values collide.
//! Anonymous operator and keyword tokens do feed the hash, so swapping
//! `+` for `-` breaks equality. Comment nodes are excluded entirely.
//! Child order is the parser's source order, which is the canonical order.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::classify::{NodeClassifier, SemanticRole};
use crate::results::{DuplicateGroup, FunctionRef};

const LITERAL_PLACEHOLDER: &[u8] = b"<literal>";

/// Structural fingerprint of one function subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Compute the fingerprint and mass (node count) of a function subtree.
/// Post-order with an explicit frame stack; deep trees cannot overflow.
pub fn fingerprint(classifier: &dyn NodeClassifier, function: Node) -> (Fingerprint, usize) {
    struct Frame<'t> {
        node: Node<'t>,
        next_child: usize,
        child_hashes: Vec<blake3::Hash>,
    }

    let mut mass = 0usize;
    let mut result = blake3::hash(b"");
    let mut stack = vec![Frame {
        node: function,
        next_child: 0,
        child_hashes: Vec::new(),
    }];

    while let Some(top) = stack.last_mut() {
        let mut next = None;
        while top.next_child < top.node.child_count() {
            let index = top.next_child;
            top.next_child += 1;
            let Some(child) = top.node.child(index) else {
                continue;
            };
            if matches!(
                classifier.classify(child.kind()),
                SemanticRole::CommentSpan(_)
            ) {
                continue;
            }
            next = Some(child);
            break;
        }

        match next {
            Some(child) if classifier.is_literal(child.kind()) => {
                // Literal values are erased: one placeholder leaf, no
                // descent into string internals.
                mass += 1;
                top.child_hashes.push(blake3::hash(LITERAL_PLACEHOLDER));
            }
            Some(child) => stack.push(Frame {
                node: child,
                next_child: 0,
                child_hashes: Vec::new(),
            }),
            None => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(top.node.kind().as_bytes());
                hasher.update(&[0]);
                for hash in &top.child_hashes {
                    hasher.update(hash.as_bytes());
                }
                let hash = hasher.finalize();
                mass += 1;
                stack.pop();
                match stack.last_mut() {
                    Some(parent) => parent.child_hashes.push(hash),
                    None => result = hash,
                }
            }
        }
    }

    (Fingerprint(*result.as_bytes()), mass)
}

/// Sequential accumulator for the duplicate map.
///
/// Groups are reported in completion order: the order in which each
/// fingerprint reached its second member. Insertion order is the engine's
/// input order, so the output is deterministic.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    members: HashMap<Fingerprint, Vec<FunctionRef>>,
    completed: Vec<Fingerprint>,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fingerprint: Fingerprint, member: FunctionRef) {
        let members = self.members.entry(fingerprint).or_default();
        members.push(member);
        if members.len() == 2 {
            self.completed.push(fingerprint);
        }
    }

    pub fn into_groups(mut self) -> Vec<DuplicateGroup> {
        self.completed
            .iter()
            .map(|fingerprint| DuplicateGroup {
                fingerprint: fingerprint.to_hex(),
                members: self.members.remove(fingerprint).unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classifier_for_extension, function_nodes};
    use crate::parse::parse_source;

    fn prints(ext: &str, source: &str) -> Vec<(Fingerprint, usize)> {
        let classifier = classifier_for_extension(ext).unwrap();
        let tree = parse_source(classifier, &format!("test.{ext}"), source).unwrap();
        assert!(!tree.root_node().has_error());
        function_nodes(classifier, tree.root_node())
            .into_iter()
            .map(|f| fingerprint(classifier, f))
            .collect()
    }

    #[test]
    fn test_renamed_function_collides() {
        let prints = prints(
            "go",
            r#"
package main

func sumA(xs []int) int {
    total := 0
    for _, x := range xs {
        total += x
    }
    return total
}

func sumB(values []int) int {
    acc := 0
    for _, v := range values {
        acc += v
    }
    return acc
}
"#,
        );
        assert_eq!(prints[0].0, prints[1].0);
        assert_eq!(prints[0].1, prints[1].1);
    }

    #[test]
    fn test_literal_values_are_erased() {
        let prints = prints(
            "go",
            r#"
package main

func a() int { return 1 }

func b() int { return 42 }

func c() int {
    x := 1
    return x
}
"#,
        );
        // Literal values collapse to one placeholder.
        assert_eq!(prints[0].0, prints[1].0);
        // An extra statement is a structural difference.
        assert_ne!(prints[0].0, prints[2].0);
    }

    #[test]
    fn test_operator_change_breaks_equality() {
        let prints = prints(
            "go",
            r#"
package main

func plus(a, b int) int { return a + b }

func minus(a, b int) int { return a - b }
"#,
        );
        assert_ne!(prints[0].0, prints[1].0);
    }

    #[test]
    fn test_control_flow_change_breaks_equality() {
        let prints = prints(
            "rs",
            r#"
fn first(n: i32) -> i32 {
    if n > 0 {
        n
    } else {
        0
    }
}

fn second(n: i32) -> i32 {
    while n > 0 {
        return n;
    }
    0
}
"#,
        );
        assert_ne!(prints[0].0, prints[1].0);
    }

    #[test]
    fn test_comments_do_not_affect_fingerprint() {
        let prints = prints(
            "rs",
            r#"
fn one(n: i32) -> i32 {
    // doubles the input
    n * 2
}

fn two(m: i32) -> i32 {
    m * 2
}
"#,
        );
        assert_eq!(prints[0].0, prints[1].0);
    }

    #[test]
    fn test_groups_in_completion_order() {
        let fp = |byte: u8| Fingerprint([byte; 32]);
        let member = |name: &str| FunctionRef {
            path: "a.go".to_string(),
            name: name.to_string(),
            start_line: 1,
        };

        let mut detector = DuplicateDetector::new();
        detector.insert(fp(1), member("a"));
        detector.insert(fp(2), member("b"));
        detector.insert(fp(2), member("c")); // group 2 completes first
        detector.insert(fp(1), member("d"));
        detector.insert(fp(3), member("e")); // never completes
        detector.insert(fp(2), member("f"));

        let groups = detector.into_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].fingerprint, fp(2).to_hex());
        assert_eq!(groups[0].members.len(), 3);
        assert_eq!(groups[1].fingerprint, fp(1).to_hex());
        assert_eq!(
            groups[1].members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "d"]
        );
    }
}
