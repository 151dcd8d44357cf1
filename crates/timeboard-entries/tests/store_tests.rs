use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use timeboard_entries::{load_jsonl, EntryStore, LoadError};

fn entry_line(date: &str, project: &str, minutes: u32, line: usize) -> String {
    format!(
        r#"{{"source":"daily-note","filePath":"{date}.md","date":"{date}","project":"{project}","start":"09:00","end":"10:00","minutes":{minutes},"note":"","lineNumber":{line}}}"#
    )
}

/// Helper: write a JSONL file with `count` entries all tagged `project`.
fn write_batch(dir: &Path, name: &str, project: &str, count: usize) -> PathBuf {
    let body: Vec<String> = (0..count)
        .map(|i| entry_line("2026-02-12", project, 15, i + 1))
        .collect();
    let path = dir.join(name);
    fs::write(&path, body.join("\n")).unwrap();
    path
}

// ============================================================
// Loader tests
// ============================================================

#[test]
fn test_load_jsonl_parses_valid_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entries.jsonl");
    fs::write(
        &path,
        format!(
            "{}\n{}\n",
            r#"{"source":"daily-note","filePath":"2026-02-12.md","date":"2026-02-12","project":"Project A","start":"09:10","end":"09:45","minutes":35,"note":"Deep work","lineNumber":42}"#,
            r#"{"source":"daily-note","filePath":"2026-02-13.md","date":"2026-02-13","project":"Project B","start":"10:00","end":"11:00","minutes":60,"note":"","lineNumber":5}"#,
        ),
    )
    .unwrap();

    let entries = load_jsonl(&path).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].project, "Project A");
    assert_eq!(entries[0].minutes, 35);
    assert_eq!(entries[0].line_number, 42);
    assert_eq!(entries[1].project, "Project B");
    assert_eq!(entries[1].minutes, 60);
}

#[test]
fn test_load_jsonl_skips_malformed_and_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entries.jsonl");
    let content = [
        entry_line("2026-02-12", "A", 30, 1),
        "{broken".to_string(),
        String::new(),
        "   ".to_string(),
        entry_line("2026-02-13", "B", 45, 2),
    ]
    .join("\n");
    fs::write(&path, content).unwrap();

    let entries = load_jsonl(&path).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].project, "A");
    assert_eq!(entries[1].project, "B");
}

#[test]
fn test_load_jsonl_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.jsonl");
    fs::write(&path, "").unwrap();

    assert!(load_jsonl(&path).unwrap().is_empty());
}

#[test]
fn test_load_jsonl_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_jsonl(&dir.path().join("nope.jsonl")).unwrap_err();

    assert!(matches!(err, LoadError::Open { .. }));
    assert!(err.to_string().contains("nope.jsonl"));
}

// ============================================================
// Store tests
// ============================================================

#[test]
fn test_store_starts_empty() {
    let store = EntryStore::new();

    assert_eq!(store.count(), 0);
    assert!(store.entries().is_empty());
    assert!(store.last_loaded().is_none());
}

#[test]
fn test_store_load_replaces_snapshot() {
    let dir = TempDir::new().unwrap();
    let first = write_batch(dir.path(), "first.jsonl", "A", 3);
    let second = write_batch(dir.path(), "second.jsonl", "B", 5);
    let store = EntryStore::new();

    assert_eq!(store.load(&first).unwrap(), 3);
    let loaded_at = store.last_loaded().unwrap();
    assert_eq!(store.count(), 3);

    assert_eq!(store.load(&second).unwrap(), 5);
    assert_eq!(store.count(), 5);
    assert!(store.entries().iter().all(|e| e.project == "B"));
    assert!(store.last_loaded().unwrap() >= loaded_at);
}

#[test]
fn test_store_failed_load_leaves_snapshot_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_batch(dir.path(), "entries.jsonl", "A", 4);
    let store = EntryStore::new();
    store.load(&path).unwrap();
    let before = store.entries();
    let loaded_at = store.last_loaded();

    let result = store.load(&dir.path().join("missing.jsonl"));

    assert!(result.is_err());
    assert_eq!(store.count(), 4);
    assert_eq!(store.entries(), before);
    assert_eq!(store.last_loaded(), loaded_at);
}

#[test]
fn test_store_empty_path_is_error() {
    let store = EntryStore::new();

    let err = store.load(Path::new("")).unwrap_err();

    assert!(matches!(err, LoadError::PathNotConfigured));
    assert!(store.last_loaded().is_none());
}

#[test]
fn test_store_entries_are_independent_copies() {
    let dir = TempDir::new().unwrap();
    let a = write_batch(dir.path(), "a.jsonl", "A", 2);
    let b = write_batch(dir.path(), "b.jsonl", "B", 7);
    let store = EntryStore::new();
    store.load(&a).unwrap();

    let mut copy = store.entries();
    let snapshot = store.snapshot();
    copy[0].project = "mutated".to_string();
    store.load(&b).unwrap();

    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.entries().iter().all(|e| e.project == "A"));
    assert_eq!(store.count(), 7);
    assert!(store.entries().iter().all(|e| e.project == "B"));
}

#[test]
fn test_store_readers_never_observe_torn_snapshot() {
    let dir = TempDir::new().unwrap();
    let small = write_batch(dir.path(), "small.jsonl", "small", 100);
    let large = write_batch(dir.path(), "large.jsonl", "large", 250);
    let store = Arc::new(EntryStore::new());
    store.load(&small).unwrap();

    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                loop {
                    let entries = store.entries();
                    let expected = match entries.len() {
                        100 => "small",
                        250 => "large",
                        n => panic!("torn snapshot with {} entries", n),
                    };
                    assert!(entries.iter().all(|e| e.project == expected));
                    reads += 1;
                    if done.load(Ordering::Relaxed) {
                        break;
                    }
                }
                reads
            })
        })
        .collect();

    for i in 0..200 {
        let path = if i % 2 == 0 { &large } else { &small };
        store.load(path).unwrap();
    }
    done.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(store.count(), 100);
}
