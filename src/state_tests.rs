use std::fs;

use tempfile::TempDir;

use super::*;

#[test]
fn current_unix_timestamp_is_reasonable() {
    let ts = current_unix_timestamp();
    assert!(ts > 1_700_000_000);
    assert!(ts < 3_000_000_000);
}

#[test]
fn problems_path_is_under_state_dir() {
    let root = Path::new("/ws");
    assert_eq!(problems_path(root), Path::new("/ws/.doc-doctor/problems.json"));
    assert_eq!(state_dir(root), Path::new("/ws/.doc-doctor"));
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a/b/c.json");
    ensure_parent_dir(&path).unwrap();
    assert!(temp_dir.path().join("a/b").is_dir());
}

#[test]
fn discover_root_finds_git_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join(".git")).unwrap();
    let nested = temp_dir.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    let root = discover_project_root(&nested);
    assert_eq!(root, dunce::canonicalize(temp_dir.path()).unwrap());
}

#[test]
fn discover_root_finds_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join(".doc-doctor.toml"), "").unwrap();

    let root = discover_project_root(&project.join("src"));
    assert_eq!(root, dunce::canonicalize(&project).unwrap());
}

#[test]
fn discover_root_without_markers_returns_start() {
    let temp_dir = TempDir::new().unwrap();
    let start = temp_dir.path().join("plain");
    fs::create_dir(&start).unwrap();

    let root = discover_project_root(&start);
    // An ancestor of the temp dir might carry a marker; the result is never deeper than start.
    assert!(dunce::canonicalize(&start).unwrap().starts_with(&root));
}

#[test]
fn atomic_write_replaces_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".doc-doctor/problems.json");

    atomic_write(&path, b"first").unwrap();
    atomic_write(&path, b"second").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    assert!(!temp_dir.path().join(".doc-doctor/problems.json.tmp").exists());
}

#[test]
fn lock_is_released_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("problems.json");

    let guard = lock_exclusive(&path, 100).unwrap();
    drop(guard);
    let again = lock_exclusive(&path, 100);
    assert!(again.is_ok());
}

#[test]
fn second_lock_times_out_while_held() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("problems.json");

    let _guard = lock_exclusive(&path, 100).unwrap();
    let err = lock_exclusive(&path, 100).unwrap_err();
    assert!(matches!(err, LockError::Timeout));
    assert_eq!(err.to_string(), "lock acquisition timed out");
}
