use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::Commands;
use crate::state;
use crate::test_fixtures::{ADD_FN, ADD_FN_DOCUMENTED};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Parse `doc-doctor check <root> --output <root>/report --quiet --color never <extra..>`.
fn check_cli(root: &Path, extra: &[&str]) -> Cli {
    let report = root.join("report.out");
    let mut argv = vec![
        "doc-doctor".to_string(),
        "check".to_string(),
        root.display().to_string(),
        "--output".to_string(),
        report.display().to_string(),
        "--quiet".to_string(),
        "--color".to_string(),
        "never".to_string(),
        "--no-config".to_string(),
    ];
    argv.extend(extra.iter().map(ToString::to_string));
    Cli::parse_from(argv)
}

fn run(cli: &Cli) -> Result<i32> {
    run_with(cli, &CancellationToken::new())
}

fn run_with(cli: &Cli, cancel: &CancellationToken) -> Result<i32> {
    match &cli.command {
        Commands::Check(args) => run_check_impl(args, cli, cancel),
        _ => unreachable!("check_cli always builds a check command"),
    }
}

fn report(root: &Path) -> String {
    fs::read_to_string(root.join("report.out")).unwrap()
}

#[test]
fn reports_problems_and_saves_them() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/math.c", ADD_FN);

    let code = run(&check_cli(dir.path(), &[])).unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    let text = report(dir.path());
    assert!(text.contains("src/math.c:1:1: BRIEF_MISSING add"));
    assert!(text.contains("check complete, found 4 problems\nchecked 1/1 files"));

    let saved = JsonProblemStore::for_project(&resolve(dir.path()))
        .load_all()
        .unwrap();
    assert_eq!(saved.len(), 4);
}

#[test]
fn clean_project_reports_no_problems() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN_DOCUMENTED);

    let code = run(&check_cli(dir.path(), &["--fail-on-problems"])).unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    assert!(report(dir.path()).contains("no problems found\nchecked 1/1 files"));
}

#[test]
fn fail_on_problems_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN);

    let code = run(&check_cli(dir.path(), &["--fail-on-problems"])).unwrap();
    assert_eq!(code, EXIT_PROBLEMS_FOUND);
}

#[test]
fn no_store_leaves_workspace_untouched() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN);

    run(&check_cli(dir.path(), &["--no-store"])).unwrap();

    assert!(!state::state_dir(dir.path()).exists());
}

#[test]
fn clean_run_empties_previous_store() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN);
    run(&check_cli(dir.path(), &[])).unwrap();

    write(dir.path(), "math.c", ADD_FN_DOCUMENTED);
    run(&check_cli(dir.path(), &[])).unwrap();

    let saved = JsonProblemStore::for_project(&resolve(dir.path()))
        .load_all()
        .unwrap();
    assert!(saved.is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let cli = Cli::parse_from(["doc-doctor", "check", missing.to_str().unwrap()]);

    let err = run(&cli).unwrap_err();
    assert!(matches!(err, DocDoctorError::RootNotFound(_)));
}

#[test]
fn syntax_check_reports_unbalanced_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.c", "int f(void) {\n    return (1;\n}\n");
    write(dir.path(), "good.c", ADD_FN_DOCUMENTED);

    run(&check_cli(dir.path(), &["--syntax-check"])).unwrap();

    let text = report(dir.path());
    assert!(text.contains("SYNTAX_ERROR <syntax-error>"));
    assert!(text.contains("bad.c (has syntax errors)"));
    assert!(text.contains("checked 1/2 files"));
}

#[test]
fn imported_diagnostics_mark_files_as_syntax_errors() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.c", ADD_FN);
    write(
        dir.path(),
        "diag.json",
        r#"[{"path": "a.c", "severity": "error", "message": "expected ';'", "line": 2, "column": 9}]"#,
    );
    let diag = dir.path().join("diag.json");

    run(&check_cli(dir.path(), &["--diagnostics", diag.to_str().unwrap()])).unwrap();

    let text = report(dir.path());
    assert!(text.contains("a.c:2:9: SYNTAX_ERROR <syntax-error>: syntax error: expected ';'"));
    assert!(!text.contains("BRIEF_MISSING"));
}

#[test]
fn missing_diagnostics_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.c", ADD_FN);

    let err = run(&check_cli(dir.path(), &["--diagnostics", "/no/such/diag.json"])).unwrap_err();
    assert!(matches!(err, DocDoctorError::FileRead { .. }));
}

#[test]
fn check_main_includes_main() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.c", "int main(void) {\n    return 0;\n}\n");

    run(&check_cli(dir.path(), &[])).unwrap();
    assert!(report(dir.path()).contains("no problems found"));

    run(&check_cli(dir.path(), &["--check-main"])).unwrap();
    assert!(report(dir.path()).contains("BRIEF_MISSING main"));
}

#[test]
fn json_format_writes_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN);

    run(&check_cli(dir.path(), &["--format", "json"])).unwrap();

    let value: serde_json::Value = serde_json::from_str(&report(dir.path())).unwrap();
    assert_eq!(value["summary"]["problems"], 4);
    assert_eq!(value["problems"][0]["file"], "math.c");
}

#[test]
fn cancelled_run_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "math.c", ADD_FN);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let code = run_with(&check_cli(dir.path(), &[]), &cancel).unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    assert!(report(dir.path()).contains("Note: check cancelled"));
}

#[test]
fn project_config_is_applied() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "legacy/old.c", ADD_FN);
    write(
        dir.path(),
        ".doc-doctor.toml",
        "[whitelist]\nfiles = [\"legacy/\"]\n",
    );
    let report_path = dir.path().join("report.out");
    let cli = Cli::parse_from([
        "doc-doctor",
        "check",
        dir.path().to_str().unwrap(),
        "--output",
        report_path.to_str().unwrap(),
        "--quiet",
    ]);

    run(&cli).unwrap();

    let text = report(dir.path());
    assert!(text.contains("legacy/old.c (in whitelist)"));
    assert!(text.contains("no problems found"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".doc-doctor.toml", "[scan]\nmax_files = 0\n");
    let cli = Cli::parse_from(["doc-doctor", "check", dir.path().to_str().unwrap()]);

    let err = run(&cli).unwrap_err();
    assert_eq!(err.error_type(), "Config");
}
