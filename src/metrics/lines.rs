//! Physical line classification: code, comment or blank.
//!
//! The classifier walks the file line by line with a cursor into the
//! ordered comment-span list, which encodes the usual two states (normal
//! text vs inside a block comment). Code wins: any non-whitespace byte
//! outside every comment span makes the line Code, so a trailing line
//! comment never reclassifies a code line. A line with comment overlap and
//! nothing else is Comment, blank interior lines of a block comment
//! included. Everything else is Blank.

use crate::classify::CommentSpan;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::results::{FileLines, LineKind, LineRecord};

/// Classify every physical line of a file.
pub fn classify_file(
    path: &str,
    source: &str,
    mut spans: Vec<CommentSpan>,
    sink: &mut DiagnosticSink,
) -> FileLines {
    for span in spans.iter_mut() {
        if !span.terminated {
            sink.push(
                DiagnosticKind::UnterminatedCommentSpan,
                Some(span.start_line),
                "block comment is never closed; remainder of file treated as comment".to_string(),
            );
            span.end_byte = source.len();
        }
    }

    let mut records = Vec::new();
    let mut code = 0;
    let mut comment = 0;
    let mut blank = 0;

    let mut span_idx = 0;
    let mut offset = 0;
    let mut line_no = 0;

    for raw in source.split_inclusive('\n') {
        line_no += 1;
        let start = offset;
        let end = offset + raw.len();
        offset = end;

        // Drop spans that ended before this line.
        while span_idx < spans.len() && spans[span_idx].end_byte <= start {
            span_idx += 1;
        }
        let line_spans: Vec<&CommentSpan> = spans[span_idx..]
            .iter()
            .take_while(|s| s.start_byte < end)
            .filter(|s| s.end_byte > start)
            .collect();

        let mut has_code = false;
        for (i, byte) in raw.bytes().enumerate() {
            if byte.is_ascii_whitespace() {
                continue;
            }
            let pos = start + i;
            let covered = line_spans
                .iter()
                .any(|s| s.start_byte <= pos && pos < s.end_byte);
            if !covered {
                has_code = true;
                break;
            }
        }

        let kind = if has_code {
            LineKind::Code
        } else if !line_spans.is_empty() {
            LineKind::Comment
        } else {
            LineKind::Blank
        };
        match kind {
            LineKind::Code => code += 1,
            LineKind::Comment => comment += 1,
            LineKind::Blank => blank += 1,
        }
        records.push(LineRecord {
            line: line_no,
            kind,
            start_byte: start,
            end_byte: end,
        });
    }

    let total = records.len();
    debug_assert_eq!(total, code + comment + blank);
    FileLines {
        path: path.to_string(),
        total,
        code,
        comment,
        blank,
        records,
    }
}
