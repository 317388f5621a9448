//! 扫描选项（模块）
use std::collections::BTreeSet;

/// 默认允许的文件后缀
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".vue", ".html"];

/// 默认排除的目录名
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".git", "__pycache__"];

/// 扫描选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// 允许的文件名后缀（按 `ends_with` 匹配，例如 `.py`）
    pub extensions: Vec<String>,
    /// 排除的目录名；任意深度的同名目录都会在进入前被剪枝
    pub exclude_dirs: BTreeSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    /// 组装排除集合：`use_defaults` 为 false 时先丢弃默认集合，再并入 `extra`
    pub fn exclude_set<I, S>(use_defaults: bool, extra: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: BTreeSet<String> = if use_defaults {
            DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            BTreeSet::new()
        };
        set.extend(extra.into_iter().map(Into::into));
        set
    }

    /// 文件名是否以允许的后缀结尾
    pub fn accepts(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.contains(dir_name)
    }
}

/// 解析逗号分隔列表：去除首尾空白，丢弃空项
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
