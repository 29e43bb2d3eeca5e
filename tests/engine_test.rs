use cogscan::{DiagnosticKind, Engine, LineKind, SourceFile};

fn fixture_files() -> Vec<SourceFile> {
    vec![
        SourceFile::new(
            "fib.go",
            r#"
package main

func fib(n int) int {
    if n == 0 {
        return 0
    } else if n == 1 {
        return 1
    } else {
        return fib(n-1) + fib(n-2)
    }
}
"#,
        ),
        SourceFile::new(
            "pick.go",
            r#"
package main

func pick(a, b, c, d chan int) int {
    select {
    case v := <-a:
        if v > 0 {
            return v
        } else {
            return -v
        }
    case <-b:
        return 1
    case <-c:
        return 2
    case <-d:
        return 3
    }
}
"#,
        ),
        SourceFile::new(
            "bucket.py",
            r#"
def bucket(n):
    if n > 10:
        return 2
    elif n > 5:
        return 1
    else:
        return 0
"#,
        ),
    ]
}

#[test]
fn test_chain_with_recursion_scores_five() {
    let report = Engine::new().analyze_files(&fixture_files());
    let fib = report.function("fib").unwrap();
    // if +1, else-if +1, else +1, two recursive call sites +1 each.
    assert_eq!(fib.score.total, 5);
}

#[test]
fn test_select_with_nested_if_scores_four() {
    let report = Engine::new().analyze_files(&fixture_files());
    let pick = report.function("pick").unwrap();
    // select +1, four cases free, if in a case +2, its else +1.
    assert_eq!(pick.score.total, 4);
}

#[test]
fn test_nested_ifs_score_ten_and_pair_as_duplicates() {
    let files = vec![
        SourceFile::new(
            "deep_a.go",
            r#"
package main

func gateA(a, b, c, d bool) int {
    if a {
        if b {
            if c {
                if d {
                    return 1
                }
            }
        }
    }
    return 0
}
"#,
        ),
        SourceFile::new(
            "deep_b.go",
            r#"
package main

func gateB(w, x, y, z bool) int {
    if w {
        if x {
            if y {
                if z {
                    return 7
                }
            }
        }
    }
    return 0
}
"#,
        ),
    ];
    let report = Engine::new().analyze_files(&files);

    assert_eq!(report.function("gateA").unwrap().score.total, 10);
    assert_eq!(report.function("gateB").unwrap().score.total, 10);

    assert_eq!(report.duplicates.len(), 1);
    let group = &report.duplicates[0];
    assert_eq!(group.members.len(), 2);
    assert_eq!(group.members[0].name, "gateA");
    assert_eq!(group.members[1].name, "gateB");
}

#[test]
fn test_twelve_line_file_classification() {
    let source = "package main\n\n/* helper overview\nmore detail\n\neven more\n\n*/\nfunc short() int {\n\treturn 1\n}\n\n";
    let report = Engine::new().analyze_files(&[SourceFile::new("twelve.go", source)]);

    let lines = report.file_lines("twelve.go").unwrap();
    assert_eq!(lines.total, 12);
    assert_eq!(lines.code, 4);
    assert_eq!(lines.comment, 6);
    assert_eq!(lines.blank, 2);

    let kinds: Vec<LineKind> = lines.records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Code,    // package main
            LineKind::Blank,
            LineKind::Comment, // /* helper overview
            LineKind::Comment,
            LineKind::Comment, // blank inside the block comment
            LineKind::Comment,
            LineKind::Comment,
            LineKind::Comment, // */
            LineKind::Code,    // func short() int {
            LineKind::Code,
            LineKind::Code,
            LineKind::Blank,
        ]
    );
}

#[test]
fn test_parallel_equals_sequential() {
    let mut files = fixture_files();
    files.push(SourceFile::new("bad.go", "%%%% ???? %%%%\n"));
    files.push(SourceFile::new(
        "dup1.rs",
        "fn left(n: i32) -> i32 { n + 1 }\n",
    ));
    files.push(SourceFile::new(
        "dup2.rs",
        "fn right(m: i32) -> i32 { m + 2 }\n",
    ));

    let engine = Engine::new();
    let sequential = engine.analyze_files(&files);
    let parallel = engine.analyze_files_parallel(&files);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_repeated_runs_are_identical() {
    let engine = Engine::new();
    let first = engine.analyze_files(&fixture_files());
    let second = engine.analyze_files(&fixture_files());
    assert_eq!(first, second);
}

#[test]
fn test_cross_language_inputs_do_not_group_spuriously() {
    let report = Engine::new().analyze_files(&fixture_files());
    // fib, pick and bucket are structurally distinct.
    assert!(report.duplicates.is_empty());
    assert_eq!(report.functions.len(), 3);
    assert_eq!(report.files.len(), 3);
}

#[test]
fn test_parse_failure_isolation_in_batch() {
    let mut files = fixture_files();
    files.insert(0, SourceFile::new("bad.go", "%%%% ???? %%%%\n"));

    let report = Engine::new().analyze_files(&files);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::ParseFailure);
    assert_eq!(report.diagnostics[0].path, "bad.go");
    assert_eq!(report.functions.len(), 3);
}

#[test]
fn test_report_json_round_trip() {
    let report = Engine::new().analyze_files(&fixture_files());
    let json = serde_json::to_string(&report).unwrap();
    let restored: cogscan::AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, restored);
}

#[test]
fn test_sources_read_from_disk_by_caller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disk.go");
    std::fs::write(&path, "package main\n\nfunc onDisk(n int) int {\n\tif n > 0 {\n\t\treturn n\n\t}\n\treturn 0\n}\n").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let files = vec![SourceFile::new(path.to_string_lossy(), contents)];
    let report = Engine::new().analyze_files(&files);

    assert_eq!(report.function("onDisk").unwrap().score.total, 1);
    assert_eq!(report.files.len(), 1);
}
