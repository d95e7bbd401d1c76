use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use super::*;
use crate::checker::{ProblemType, SYNTAX_ERROR_FUNCTION_NAME};
use crate::error::{DocDoctorError, Result};
use crate::scanner::Enumeration;
use crate::test_fixtures::{ADD_FN, ADD_FN_DOCUMENTED, MemoryDiagnostics, MemorySourceFs};

const ROOT: &str = "/ws";

struct ListEnumerator {
    root: PathBuf,
    files: Vec<PathBuf>,
    truncated: bool,
    missing_root: bool,
}

impl ListEnumerator {
    fn new(files: &[&str]) -> Self {
        Self {
            root: PathBuf::from(ROOT),
            files: files.iter().map(|f| Path::new(ROOT).join(f)).collect(),
            truncated: false,
            missing_root: false,
        }
    }

    fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    fn missing_root() -> Self {
        Self {
            missing_root: true,
            ..Self::new(&[])
        }
    }
}

impl FileEnumerator for ListEnumerator {
    fn root(&self) -> &Path {
        &self.root
    }

    fn enumerate(&self) -> Result<Enumeration> {
        if self.missing_root {
            return Err(DocDoctorError::RootNotFound(self.root.clone()));
        }
        Ok(Enumeration {
            files: self.files.clone(),
            truncated: self.truncated,
        })
    }
}

#[derive(Default)]
struct Recorder {
    total: Cell<Option<usize>>,
    messages: RefCell<Vec<String>>,
    finished: Cell<bool>,
}

impl ProgressSink for Recorder {
    fn begin(&self, total: usize) {
        self.total.set(Some(total));
    }

    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn finish(&self) {
        self.finished.set(true);
    }
}

fn abs(rel: &str) -> PathBuf {
    Path::new(ROOT).join(rel)
}

fn aggregator(fs: MemorySourceFs) -> ProjectAggregator {
    aggregator_with(&Config::default(), fs)
}

fn aggregator_with(config: &Config, fs: MemorySourceFs) -> ProjectAggregator {
    ProjectAggregator::new(config, Some(PathBuf::from(ROOT))).with_source_fs(fs)
}

fn config_with_file_whitelist(prefix: &str) -> Config {
    let mut config = Config::default();
    config.whitelist.file_whitelist.insert(prefix.to_string());
    config
}

#[test]
fn undocumented_add_yields_four_problems() {
    let fs = MemorySourceFs::new().with_file(abs("src/math.c"), ADD_FN);
    let result = aggregator(fs).run(&ListEnumerator::new(&["src/math.c"]), None);

    assert!(result.success);
    assert_eq!(result.total_files, 1);
    assert_eq!(result.checked_files, 1);
    assert!(result.skipped_files.is_empty());
    let kinds: Vec<_> = result.problems.iter().map(|p| p.problem_type).collect();
    assert_eq!(
        kinds,
        [
            ProblemType::BriefMissing,
            ProblemType::ParamMissing,
            ProblemType::ParamMissing,
            ProblemType::ReturnMissing,
        ]
    );
    assert!(result.problems.iter().all(|p| p.function_name == "add" && p.line == 1));
    assert!(result.problems[1].description.contains("\"a\""));
    assert!(result.problems[2].description.contains("\"b\""));
    assert!(result.error_message.is_none());
}

#[test]
fn documented_add_yields_no_problems() {
    let fs = MemorySourceFs::new().with_file(abs("src/math.c"), ADD_FN_DOCUMENTED);
    let result = aggregator(fs).run(&ListEnumerator::new(&["src/math.c"]), None);

    assert!(result.success);
    assert_eq!(result.checked_files, 1);
    assert!(result.problems.is_empty());
    assert_eq!(result.summary(), "no problems found\nchecked 1/1 files");
}

#[test]
fn problems_follow_enumeration_order() {
    let fs = MemorySourceFs::new()
        .with_file(abs("a.c"), "void first(int x) {\n}\n")
        .with_file(abs("b.c"), "void second(int y) {\n}\n");
    let result = aggregator(fs).run(&ListEnumerator::new(&["b.c", "a.c"]), None);

    let names: Vec<_> = result
        .problems
        .iter()
        .map(|p| p.function_name.as_str())
        .collect();
    assert_eq!(names, ["second", "second", "first", "first"]);
}

#[test]
fn whitelisted_file_is_skipped_before_progress() {
    let fs = MemorySourceFs::new()
        .with_file(abs("src/legacy/old.c"), ADD_FN)
        .with_file(abs("src/new.c"), ADD_FN_DOCUMENTED);
    let recorder = Recorder::default();
    let result = aggregator_with(&config_with_file_whitelist("src/legacy/"), fs).run(
        &ListEnumerator::new(&["src/legacy/old.c", "src/new.c"]),
        Some(&recorder),
    );

    assert_eq!(result.skipped_files, ["src/legacy/old.c (in whitelist)"]);
    assert_eq!(*recorder.messages.borrow(), ["checking src/new.c"]);
    assert_eq!(result.checked_files, 1);
    assert!(result.problems.is_empty());
}

#[test]
fn progress_sink_sees_begin_reports_and_finish() {
    let fs = MemorySourceFs::new()
        .with_file(abs("a.c"), ADD_FN_DOCUMENTED)
        .with_file(abs("lib/b.cpp"), ADD_FN_DOCUMENTED);
    let recorder = Recorder::default();
    aggregator(fs).run(&ListEnumerator::new(&["a.c", "lib/b.cpp"]), Some(&recorder));

    assert_eq!(recorder.total.get(), Some(2));
    assert_eq!(
        *recorder.messages.borrow(),
        ["checking a.c", "checking lib/b.cpp"]
    );
    assert!(recorder.finished.get());
}

#[test]
fn closure_works_as_progress_sink() {
    let fs = MemorySourceFs::new().with_file(abs("a.c"), ADD_FN_DOCUMENTED);
    let seen = RefCell::new(Vec::new());
    let sink = |message: &str| seen.borrow_mut().push(message.to_string());
    aggregator(fs).run(&ListEnumerator::new(&["a.c"]), Some(&sink));
    assert_eq!(*seen.borrow(), ["checking a.c"]);
}

#[test]
fn stat_failure_is_skipped() {
    let result = aggregator(MemorySourceFs::new()).run(&ListEnumerator::new(&["gone.c"]), None);

    assert!(result.success);
    assert_eq!(result.skipped_files, ["gone.c (unable to read file metadata)"]);
    assert_eq!(result.checked_files, 0);
}

#[test]
fn oversized_file_is_skipped_with_size() {
    let fs = MemorySourceFs::new()
        .with_file(abs("big.c"), ADD_FN)
        .with_size(abs("big.c"), 3 * 1024 * 1024 / 2);
    let result = aggregator(fs).run(&ListEnumerator::new(&["big.c"]), None);

    assert_eq!(result.skipped_files, ["big.c (file too large: 1.50MB)"]);
    assert!(result.problems.is_empty());
}

#[test]
fn file_of_exactly_one_mebibyte_is_checked() {
    let fs = MemorySourceFs::new()
        .with_file(abs("edge.c"), ADD_FN)
        .with_size(abs("edge.c"), 1024 * 1024);
    let result = aggregator(fs).run(&ListEnumerator::new(&["edge.c"]), None);

    assert!(result.skipped_files.is_empty());
    assert_eq!(result.checked_files, 1);
}

#[test]
fn unsupported_extension_is_skipped() {
    let fs = MemorySourceFs::new().with_file(abs("include/a.h"), ADD_FN);
    let result = aggregator(fs).run(&ListEnumerator::new(&["include/a.h"]), None);

    assert_eq!(
        result.skipped_files,
        ["include/a.h (UNSUPPORTED_FILE_TYPE: only .c / .cpp files are supported)"]
    );
}

#[test]
fn read_failure_is_skipped() {
    let fs = MemorySourceFs::new().with_unreadable(abs("locked.c"));
    let result = aggregator(fs).run(&ListEnumerator::new(&["locked.c"]), None);

    assert_eq!(result.skipped_files, ["locked.c (READ_ERROR: permission denied)"]);
    assert_eq!(result.checked_files, 0);
}

#[test]
fn read_failure_wins_over_imported_syntax_errors() {
    let fs = MemorySourceFs::new().with_unreadable(abs("locked.c"));
    let diagnostics = MemoryDiagnostics::new().with_error(abs("locked.c"), "expected ';'", 3);
    let result = aggregator(fs)
        .with_diagnostics(diagnostics)
        .run(&ListEnumerator::new(&["locked.c"]), None);

    assert!(result.problems.is_empty());
    assert_eq!(result.skipped_files, ["locked.c (READ_ERROR: permission denied)"]);
    assert_eq!(result.checked_files, 0);
}

#[test]
fn syntax_error_file_yields_only_one_syntax_problem() {
    let fs = MemorySourceFs::new()
        .with_file(abs("broken.c"), ADD_FN)
        .with_file(abs("fine.c"), ADD_FN_DOCUMENTED);
    let diagnostics = MemoryDiagnostics::new().with_error(abs("broken.c"), "expected ';'", 3);
    let result = aggregator(fs)
        .with_diagnostics(diagnostics)
        .run(&ListEnumerator::new(&["broken.c", "fine.c"]), None);

    let broken: Vec<_> = result
        .problems
        .iter()
        .filter(|p| p.file_path == abs("broken.c"))
        .collect();
    assert_eq!(broken.len(), 1);
    let problem = broken[0];
    assert_eq!(problem.problem_type, ProblemType::SyntaxError);
    assert_eq!(problem.function_name, SYNTAX_ERROR_FUNCTION_NAME);
    assert!(problem.function_signature.is_empty());
    assert!(problem.snippet.is_empty());
    assert_eq!((problem.line, problem.column), (3, 1));
    assert_eq!(
        problem.description,
        "syntax error: expected ';' at line 3, column 1"
    );

    assert_eq!(result.skipped_files, ["broken.c (has syntax errors)"]);
    assert_eq!(result.checked_files, 1);
}

#[test]
fn multiple_syntax_errors_are_counted() {
    let fs = MemorySourceFs::new().with_file(abs("broken.c"), ADD_FN);
    let diagnostics = MemoryDiagnostics::new()
        .with_error(abs("broken.c"), "expected ')'", 1)
        .with_warning(abs("broken.c"), "unused", 2)
        .with_error(abs("broken.c"), "expected '}'", 4);
    let result = aggregator(fs)
        .with_diagnostics(diagnostics)
        .run(&ListEnumerator::new(&["broken.c"]), None);

    assert_eq!(result.problems.len(), 1);
    assert_eq!(
        result.problems[0].description,
        "2 syntax errors; first: expected ')' at line 1, column 1"
    );
}

#[test]
fn warnings_do_not_block_checking() {
    let fs = MemorySourceFs::new().with_file(abs("warn.c"), ADD_FN);
    let diagnostics = MemoryDiagnostics::new().with_warning(abs("warn.c"), "unused variable", 1);
    let result = aggregator(fs)
        .with_diagnostics(diagnostics)
        .run(&ListEnumerator::new(&["warn.c"]), None);

    assert_eq!(result.problems.len(), 4);
    assert_eq!(result.checked_files, 1);
    assert!(
        result
            .problems
            .iter()
            .all(|p| p.problem_type != ProblemType::SyntaxError)
    );
}

#[test]
fn problem_cap_truncates_to_exactly_the_limit() {
    let names: Vec<String> = (0..260).map(|i| format!("f{i:03}.c")).collect();
    let mut fs = MemorySourceFs::new();
    for name in &names {
        fs = fs.with_file(abs(name), ADD_FN);
    }
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let recorder = Recorder::default();
    let result = aggregator(fs).run(&ListEnumerator::new(&refs), Some(&recorder));

    assert!(result.success);
    assert_eq!(result.problems.len(), 1000);
    assert_eq!(
        result.error_message.as_deref(),
        Some("maximum number of problems reached (1000), check stopped")
    );
    // 250 files reach the cap; the 250th is not counted as checked.
    assert_eq!(result.checked_files, 249);
    assert_eq!(recorder.messages.borrow().len(), 250);
}

#[test]
fn problem_cap_cuts_the_overflowing_batch() {
    let fs = MemorySourceFs::new()
        .with_file(abs("a.c"), ADD_FN)
        .with_file(abs("b.c"), ADD_FN)
        .with_file(abs("c.c"), ADD_FN);
    let limits = RunLimits {
        max_problems: 6,
        ..RunLimits::default()
    };
    let result = aggregator(fs)
        .with_limits(limits)
        .run(&ListEnumerator::new(&["a.c", "b.c", "c.c"]), None);

    assert_eq!(result.problems.len(), 6);
    assert_eq!(result.checked_files, 1);
    assert!(result.problems.iter().all(|p| p.file_path != abs("c.c")));
    assert!(result.error_message.is_some());
}

#[test]
fn cancelled_before_start_checks_nothing() {
    let fs = MemorySourceFs::new().with_file(abs("a.c"), ADD_FN);
    let token = CancellationToken::new();
    token.cancel();
    let result = aggregator(fs)
        .with_cancellation(token)
        .run(&ListEnumerator::new(&["a.c"]), None);

    assert!(result.success);
    assert!(result.cancelled);
    assert_eq!(result.checked_files, 0);
    assert!(result.problems.is_empty());
    assert_eq!(result.error_message.as_deref(), Some("check cancelled"));
}

#[test]
fn cancellation_lets_the_current_file_finish() {
    let fs = MemorySourceFs::new()
        .with_file(abs("a.c"), ADD_FN)
        .with_file(abs("b.c"), ADD_FN);
    let token = CancellationToken::new();
    let handle = token.clone();
    let cancel_on_first = move |_: &str| handle.cancel();
    let result = aggregator(fs)
        .with_cancellation(token)
        .run(&ListEnumerator::new(&["a.c", "b.c"]), Some(&cancel_on_first));

    assert!(result.cancelled);
    assert_eq!(result.checked_files, 1);
    assert_eq!(result.problems.len(), 4);
    assert!(result.problems.iter().all(|p| p.file_path == abs("a.c")));
}

#[test]
fn enumeration_failure_is_fatal() {
    let result = aggregator(MemorySourceFs::new()).run(&ListEnumerator::missing_root(), None);

    assert!(!result.success);
    assert_eq!(
        result.error_message.as_deref(),
        Some("workspace root not found: /ws")
    );
    assert!(result.problems.is_empty());
}

#[test]
fn no_files_is_successful_with_message() {
    let result = aggregator(MemorySourceFs::new()).run(&ListEnumerator::new(&[]), None);

    assert!(result.success);
    assert_eq!(result.total_files, 0);
    assert_eq!(result.error_message.as_deref(), Some("no C/C++ files found"));
}

#[test]
fn truncated_enumeration_still_runs() {
    let fs = MemorySourceFs::new()
        .with_file(abs("a.c"), ADD_FN_DOCUMENTED)
        .with_file(abs("b.c"), ADD_FN_DOCUMENTED);
    let result = aggregator(fs).run(&ListEnumerator::new(&["a.c", "b.c"]).truncated(), None);

    assert!(result.success);
    assert_eq!(result.checked_files, 2);
    assert!(
        result
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("maximum number of files reached (2)"))
    );
}

#[test]
fn main_is_not_reported_by_default() {
    let fs = MemorySourceFs::new().with_file(abs("main.c"), "int main(void) {\n    return 0;\n}\n");
    let result = aggregator(fs).run(&ListEnumerator::new(&["main.c"]), None);
    assert!(result.problems.is_empty());
    assert_eq!(result.checked_files, 1);
}

#[test]
fn control_statements_can_be_skipped() {
    let content = "/** @brief Run. */\nvoid run(void) {\n    if (ready) {\n        go();\n    }\n}\n";
    let fs = || MemorySourceFs::new().with_file(abs("run.c"), content);

    let default_result = aggregator(fs()).run(&ListEnumerator::new(&["run.c"]), None);
    assert!(default_result.problems.iter().any(|p| p.function_name == "if"));

    let mut config = Config::default();
    config.scan.skip_control_statements = true;
    let result = aggregator_with(&config, fs()).run(&ListEnumerator::new(&["run.c"]), None);
    assert!(result.problems.is_empty());
}

#[test]
fn check_file_honours_file_whitelist() {
    let fs = MemorySourceFs::new().with_file(abs("test/t.c"), ADD_FN);
    let outcome = aggregator_with(&config_with_file_whitelist("test/"), fs)
        .check_file(&abs("test/t.c"));
    assert_eq!(outcome, FileOutcome::Skipped(SkipReason::Whitelisted));
}

#[test]
fn check_file_returns_problems() {
    let fs = MemorySourceFs::new().with_file(abs("a.c"), ADD_FN);
    match aggregator(fs).check_file(&abs("a.c")) {
        FileOutcome::Checked(problems) => assert_eq!(problems.len(), 4),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn skip_reason_display() {
    assert_eq!(SkipReason::Whitelisted.to_string(), "in whitelist");
    assert_eq!(SkipReason::TooLarge(2 * 1024 * 1024).to_string(), "file too large: 2.00MB");
    assert_eq!(
        SkipReason::Unreadable {
            code: ParseErrorCode::ReadError,
            message: "denied".to_string(),
        }
        .to_string(),
        "READ_ERROR: denied"
    );
    assert_eq!(SkipReason::SyntaxErrors.to_string(), "has syntax errors");
}

#[test]
fn limits_come_from_scan_config() {
    let scan = ScanConfig {
        max_file_size: 10,
        max_problems: 3,
        ..ScanConfig::default()
    };
    assert_eq!(
        RunLimits::from(&scan),
        RunLimits {
            max_file_size: 10,
            max_problems: 3
        }
    );
}
