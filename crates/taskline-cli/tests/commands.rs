use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn bin(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskline"));
    cmd.current_dir(dir);
    cmd
}

fn run(dir: &Path, args: &[&str]) -> String {
    let output = bin(dir).args(args).output().expect("run taskline");
    assert!(output.status.success(), "taskline {:?} failed", args);
    String::from_utf8(output.stdout).expect("utf8")
}

#[test]
fn full_task_lifecycle() {
    let repo = TempDir::new().expect("repo");
    let dir = repo.path();

    assert!(run(dir, &["new", "work"]).contains("[OK] List 'work' created."));
    assert!(dir.join("tasks.json").is_file());

    let added = run(dir, &["add", "work", "buy", "milk"]);
    assert!(added.contains("[OK] Task added to 'work'."));

    let listed = run(dir, &["ls", "work"]);
    assert!(listed.starts_with("=== work ===\n"));
    assert!(listed.contains("1. ["));
    assert!(listed.trim_end().ends_with(" buy milk"));

    assert!(run(dir, &["done", "work", "1"]).contains("[OK] Task 1 marked as done."));
    assert!(run(dir, &["ls", "work"]).contains("1. [DONE] ["));

    assert!(run(dir, &["rm", "work", "1"]).contains("[OK] Removed task 1 from 'work'."));
    assert_eq!(run(dir, &["ls", "work"]), "=== work ===\n");

    assert!(run(dir, &["del", "work"]).contains("[OK] Deleted list 'work'."));
    assert_eq!(run(dir, &["lists"]), "Existing lists:\n  (no lists)\n");
}

#[test]
fn add_to_missing_list_announces_creation() {
    let repo = TempDir::new().expect("repo");
    let out = run(repo.path(), &["add", "inbox", "call", "the", "bank"]);
    assert!(out.contains("[INFO] List 'inbox' did not exist; created automatically."));
    assert!(run(repo.path(), &["lists"]).contains("  - inbox"));
}

#[test]
fn domain_errors_are_reported_without_failing() {
    let repo = TempDir::new().expect("repo");
    let dir = repo.path();
    run(dir, &["new", "work"]);

    assert!(run(dir, &["new", "work"]).contains("[WARN] List 'work' already exists."));
    assert!(run(dir, &["rm", "work", "0"]).contains("[WARN] Invalid number."));
    assert!(run(dir, &["rm", "work", "-2"]).contains("[WARN] Invalid number."));
    assert!(run(dir, &["done", "work", "1"]).contains("[WARN] Task number out of range (1..0)"));
    assert!(run(dir, &["ls", "nope"]).contains("[ERROR] List 'nope' not found."));
    assert!(run(dir, &["del", "nope"]).contains("[WARN] List 'nope' not found."));
}

#[test]
fn corrupt_store_is_backed_up() {
    let repo = TempDir::new().expect("repo");
    let dir = repo.path();
    std::fs::write(dir.join("tasks.json"), "{{{ broken").expect("write");

    let out = run(dir, &["lists"]);
    assert!(out.contains("[WARN] Data file was corrupted"));
    assert!(out.contains("  (no lists)"));
    assert_eq!(
        std::fs::read_to_string(dir.join("tasks.json.bak")).expect("backup"),
        "{{{ broken"
    );
}

#[test]
fn store_flag_and_config_select_the_file() {
    let repo = TempDir::new().expect("repo");
    let dir = repo.path();

    run(dir, &["--store", "other.json", "new", "alt"]);
    assert!(dir.join("other.json").is_file());
    assert!(!dir.join("tasks.json").exists());

    std::fs::write(dir.join(".taskline.toml"), "store_file = \"other.json\"\nlock = false\n")
        .expect("config");
    assert!(run(dir, &["lists"]).contains("  - alt"));
    let shown = run(dir, &["config"]);
    assert!(shown.contains("other.json"));
    assert!(shown.contains("lock = false"));
}

#[test]
fn about_defaults_to_portuguese() {
    let repo = TempDir::new().expect("repo");
    assert!(run(repo.path(), &["about"]).contains("Sobre"));
    assert!(run(repo.path(), &["about", "en"]).contains("About"));
}
