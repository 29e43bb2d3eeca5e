//! Batch analysis over a set of in-memory sources.
//!
//! Each file is analyzed in isolation: classifier lookup, parse, line
//! classification, function enumeration, scoring and fingerprinting. A
//! failure in one file becomes a diagnostic and never aborts the run.
//! The parallel path maps files with rayon and then reduces in input
//! order, so both paths produce bit-identical reports.

use std::path::Path;

use rayon::prelude::*;
use tree_sitter::Node;

use crate::classify::{
    classifier_for_extension, comment_spans, display_name, function_nodes, NodeClassifier,
};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::metrics::cognitive::score_function;
use crate::metrics::duplicates::{fingerprint, DuplicateDetector, Fingerprint};
use crate::metrics::lines::classify_file;
use crate::results::{AnalysisReport, FunctionRecord, FunctionRef, Span};

/// One unit of input: a path label and the source text. The engine never
/// touches the file system; reading sources is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Analysis runner. Holds only configuration; all state is per run.
#[derive(Debug, Clone)]
pub struct Engine {
    min_duplicate_mass: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

struct FileAnalysis {
    report: AnalysisReport,
    prints: Vec<(Fingerprint, FunctionRef)>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            min_duplicate_mass: 0,
        }
    }

    /// Node-count threshold below which functions are not fingerprinted.
    pub fn with_min_duplicate_mass(mut self, min_mass: usize) -> Self {
        self.min_duplicate_mass = min_mass;
        self
    }

    /// Analyze files one by one, in input order.
    pub fn analyze_files(&self, files: &[SourceFile]) -> AnalysisReport {
        let analyses: Vec<FileAnalysis> = files.iter().map(|f| self.analyze_file(f)).collect();
        merge(analyses)
    }

    /// Analyze files on the rayon pool. The reduce phase runs sequentially
    /// in input order, so the report equals the sequential one.
    pub fn analyze_files_parallel(&self, files: &[SourceFile]) -> AnalysisReport {
        let analyses: Vec<FileAnalysis> =
            files.par_iter().map(|f| self.analyze_file(f)).collect();
        merge(analyses)
    }

    fn analyze_file(&self, file: &SourceFile) -> FileAnalysis {
        let mut sink = DiagnosticSink::new(&file.path);
        let mut report = AnalysisReport::default();

        let extension = Path::new(&file.path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let Some(classifier) = classifier_for_extension(extension) else {
            tracing::debug!(path = %file.path, "no classifier for extension, skipping");
            report.diagnostics = sink.into_vec();
            return FileAnalysis {
                report,
                prints: Vec::new(),
            };
        };

        let tree = match crate::parse::parse_source(classifier, &file.path, &file.contents) {
            Ok(tree) => tree,
            Err(e) => {
                sink.push(DiagnosticKind::ParseFailure, None, e.to_string());
                report.diagnostics = sink.into_vec();
                return FileAnalysis {
                    report,
                    prints: Vec::new(),
                };
            }
        };
        let root = tree.root_node();
        if root.has_error() && !crate::parse::is_salvageable(root) {
            sink.push(
                DiagnosticKind::ParseFailure,
                None,
                "no analyzable content in parse tree".to_string(),
            );
            report.diagnostics = sink.into_vec();
            return FileAnalysis {
                report,
                prints: Vec::new(),
            };
        }

        let spans = match comment_spans(classifier, root, &file.contents) {
            Ok(spans) => spans,
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "comment query failed");
                Vec::new()
            }
        };
        report
            .files
            .push(classify_file(&file.path, &file.contents, spans, &mut sink));

        let mut prints = Vec::new();
        for function in function_nodes(classifier, root) {
            let name = display_name(classifier, &function, &file.contents);
            if function.has_error() {
                sink.push(
                    DiagnosticKind::MalformedFunction,
                    Some(function.start_position().row + 1),
                    format!("`{name}` contains parse errors and was skipped"),
                );
                continue;
            }

            let score = score_function(classifier, function, &file.contents, &mut sink);
            report.functions.push(FunctionRecord {
                path: file.path.clone(),
                name: name.clone(),
                span: Span::from_node(function),
                score,
            });

            if let Some(print) = self.fingerprint_function(classifier, function, &file.path, &name)
            {
                prints.push(print);
            }
        }

        report.diagnostics = sink.into_vec();
        FileAnalysis { report, prints }
    }

    fn fingerprint_function(
        &self,
        classifier: &'static dyn NodeClassifier,
        function: Node,
        path: &str,
        name: &str,
    ) -> Option<(Fingerprint, FunctionRef)> {
        let (print, mass) = fingerprint(classifier, function);
        if mass < self.min_duplicate_mass {
            return None;
        }
        Some((
            print,
            FunctionRef {
                path: path.to_string(),
                name: name.to_string(),
                start_line: function.start_position().row + 1,
            },
        ))
    }
}

fn merge(analyses: Vec<FileAnalysis>) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    let mut detector = DuplicateDetector::new();

    for analysis in analyses {
        report.functions.extend(analysis.report.functions);
        report.files.extend(analysis.report.files);
        report.diagnostics.extend(analysis.report.diagnostics);
        for (print, member) in analysis.prints {
            detector.insert(print, member);
        }
    }

    report.duplicates = detector.into_groups();
    report
}
