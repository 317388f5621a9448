//! 扫描主流程：遍历目录 → 匹配标注 → 归一化
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::annotation::{clean_note, normalize_progress, AnnotationMatcher};
use crate::error::SkipReason;
use crate::options::ScanOptions;
use crate::types::{ProgressRecord, ScanResult};

/// 单个文件的判定结果
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FileOutcome {
    Marked(ProgressRecord),
    Unmarked(String),
    Skipped(SkipReason),
}

/// 扫描 `root` 下的全部文件并汇总 `@progress` 标注
/// 稳定性保证：目录项按文件名排序遍历，输出顺序可复现
pub fn scan(root: &Path, opts: &ScanOptions) -> Result<ScanResult> {
    let matcher = AnnotationMatcher::new()?;
    let mut result = ScanResult::default();

    info!(root = %root.display(), extensions = ?opts.extensions, "starting scan");

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e, opts));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "walk error, skipping entry");
                continue;
            }
        };
        // 根目录本身是文件时不产生记录
        if entry.depth() == 0 || !is_regular_file(&entry) {
            continue;
        }
        // 非 UTF-8 文件名无法做后缀判断，直接跳过
        let file_name = match entry.file_name().to_str() {
            Some(s) => s,
            None => continue,
        };
        if !opts.accepts(file_name) {
            continue;
        }

        let rel = relative_path(root, entry.path());
        let content = match std::fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(file = %rel, error = %err, "read failed, skipping");
                continue;
            }
        };
        let text = match String::from_utf8(content) {
            Ok(t) => t,
            Err(_) => {
                debug!(file = %rel, "not valid UTF-8, skipping");
                continue;
            }
        };

        match classify(&matcher, rel, &text) {
            FileOutcome::Marked(record) => result.records.push(record),
            FileOutcome::Unmarked(file) => result.unmarked.push(file),
            FileOutcome::Skipped(reason) => {
                debug!(file = reason.file(), "skipped");
                result.skipped.push(reason);
            }
        }
    }

    info!(
        marked = result.records.len(),
        unmarked = result.unmarked_count(),
        skipped = result.skipped.len(),
        "scan finished"
    );
    Ok(result)
}

/// 根目录本身从不剪枝；其余目录名命中排除集合即剪枝
fn is_pruned(entry: &DirEntry, opts: &ScanOptions) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| opts.is_excluded(name))
}

/// 指向文件的符号链接也算文件；指向目录的链接不会被跟随进入
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned()
}

/// 按标注个数判定单个文件：0 个 → 未标记；1 个 → 记录；多个 → 跳过
pub(crate) fn classify(matcher: &AnnotationMatcher, file: String, text: &str) -> FileOutcome {
    let mut found = matcher.find_all(text);
    match found.len() {
        0 => FileOutcome::Unmarked(file),
        1 => {
            let ann = found.remove(0);
            FileOutcome::Marked(ProgressRecord {
                file,
                progress: normalize_progress(&ann.value),
                note: clean_note(ann.note.as_deref()),
            })
        }
        count => FileOutcome::Skipped(SkipReason::MultipleAnnotations { file, count }),
    }
}
