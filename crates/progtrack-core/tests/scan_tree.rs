use progtrack_core::{scan, summarize, write_csv, ProgressRecord, ScanOptions, SkipReason};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn rel(parts: &[&str]) -> String {
    parts.iter().collect::<std::path::PathBuf>().to_string_lossy().into_owned()
}

#[test]
fn collects_records_and_unmarked_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "done.py", b"# @progress done\n");
    write(root, "pct.js", b"// @progress 75%: \"wire up\"\n");
    write(root, "frac.ts", b"// @progress 0.5\n");
    write(root, "plain.vue", b"<template></template>\n");
    write(root, "notes.txt", b"# @progress 10%\n");

    let result = scan(root, &ScanOptions::default()).unwrap();

    let by_file = |name: &str| result.records.iter().find(|r| r.file == name).cloned();
    assert_eq!(by_file("done.py").unwrap().progress, Some(1.0));
    let pct = by_file("pct.js").unwrap();
    assert_eq!(pct.progress, Some(0.75));
    assert_eq!(pct.note, "wire up");
    assert_eq!(by_file("frac.ts").unwrap().progress, Some(0.5));

    // .txt 不在允许后缀中
    assert!(by_file("notes.txt").is_none());
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.unmarked, vec!["plain.vue".to_string()]);
    assert!(result.skipped.is_empty());
}

#[test]
fn multiple_annotations_skip_file_with_one_diagnostic() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "twice.py", b"# @progress 10%\n# @progress 20%\n");
    write(root, "once.py", b"# @progress 20%\n");

    let result = scan(root, &ScanOptions::default()).unwrap();
    assert_eq!(
        result.skipped,
        vec![SkipReason::MultipleAnnotations { file: "twice.py".into(), count: 2 }]
    );
    assert_eq!(result.skipped[0].to_string(), "Multiple @progress annotations in twice.py, skipping!");

    let summary = summarize(&result);
    assert_eq!(summary.marked, 1);
    assert_eq!(summary.unmarked, 0);
}

#[test]
fn non_utf8_files_are_silently_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "latin1.py", b"# @progress 50% caf\xe9\n");

    let result = scan(root, &ScanOptions::default()).unwrap();
    assert!(result.records.is_empty());
    assert!(result.unmarked.is_empty());
    assert!(result.skipped.is_empty());
}

#[test]
fn excluded_directories_are_pruned_at_any_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "node_modules/lib.js", b"// @progress done\n");
    write(root, "src/node_modules/deep/lib.js", b"// @progress done\n");
    write(root, "src/app.js", b"// @progress 30%\n");
    write(root, "dist/bundle.js", b"// nothing\n");

    let mut opts = ScanOptions::default();
    opts.exclude_dirs.insert("dist".into());
    let result = scan(root, &opts).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].file, rel(&["src", "app.js"]));
    assert!(result.unmarked.is_empty());
}

#[test]
fn excluded_name_does_not_prune_the_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("build");
    write(&root, "main.py", b"# @progress 0.2\n");

    let opts = ScanOptions { exclude_dirs: ScanOptions::exclude_set(false, ["build"]), ..Default::default() };
    let result = scan(&root, &opts).unwrap();
    assert_eq!(result.records.len(), 1);
}

#[test]
fn custom_extensions_replace_defaults() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "lib.rs", b"// @progress 40%\n");
    write(root, "app.py", b"# @progress 40%\n");

    let opts = ScanOptions { extensions: vec![".rs".into()], ..Default::default() };
    let result = scan(root, &opts).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].file, "lib.rs");
}

#[test]
fn csv_export_holds_exactly_the_records() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.py", b"# @progress done 'ship it'\n");
    write(root, "b.py", format!("# @progress {}%\n", "9".repeat(400)).as_bytes());
    write(root, "c.py", b"print(1)\n");

    let result = scan(root, &ScanOptions::default()).unwrap();
    let mut buf = Vec::new();
    write_csv(&result.records, &mut buf).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), vec!["file", "progress", "note"]);
    let rows: Vec<ProgressRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows, result.records);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].progress, None);
    assert!(rows.iter().all(|r| r.file != "c.py"));
}

#[test]
fn unicode_digits_follow_float_parsing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "ar.py", "# @progress ٥٠%\n".as_bytes());

    let result = scan(root, &ScanOptions::default()).unwrap();
    assert_eq!(result.records[0].progress, Some(0.5));
}

#[test]
fn file_root_yields_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "solo.py", b"# @progress done\n");

    let result = scan(&dir.path().join("solo.py"), &ScanOptions::default()).unwrap();
    assert!(result.records.is_empty());
    assert!(result.unmarked.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_scanned_but_linked_dirs_are_not_entered() {
    use std::os::unix::fs::symlink;

    let target = tempdir().unwrap();
    write(target.path(), "real.py", b"# @progress done\n");
    write(target.path(), "pkg/inner.py", b"# @progress 10%\n");

    let dir = tempdir().unwrap();
    let root = dir.path();
    symlink(target.path().join("real.py"), root.join("link.py")).unwrap();
    symlink(target.path().join("pkg"), root.join("pkg")).unwrap();

    let result = scan(root, &ScanOptions::default()).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].file, "link.py");
    assert_eq!(result.records[0].progress, Some(1.0));
    assert!(result.unmarked.is_empty());
}
