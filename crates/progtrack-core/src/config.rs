//! 配置文件加载（TOML）与命令行覆盖合并
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::options::{ScanOptions, DEFAULT_EXTENSIONS};

/// 默认 CSV 输出路径
pub const DEFAULT_CSV_PATH: &str = "progress_report.csv";

/// 可选配置层；每个字段为空表示“沿用下一层”
///
/// ```toml
/// extensions = [".py", ".rs"]
/// exclude = ["dist", "build"]
/// no_default_exclude = false
/// csv = "reports/progress.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// 并入排除集合的目录名
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub no_default_exclude: Option<bool>,
    #[serde(default)]
    pub csv: Option<PathBuf>,
}

impl FileConfig {
    /// 用 `higher` 中已设置的字段覆盖当前层
    pub fn merge(self, higher: FileConfig) -> FileConfig {
        FileConfig {
            extensions: higher.extensions.or(self.extensions),
            exclude: higher.exclude.or(self.exclude),
            no_default_exclude: higher.no_default_exclude.or(self.no_default_exclude),
            csv: higher.csv.or(self.csv),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        let extensions = match &self.extensions {
            Some(exts) if !exts.is_empty() => exts.clone(),
            _ => DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        };
        let use_defaults = !self.no_default_exclude.unwrap_or(false);
        let extra = self.exclude.clone().unwrap_or_default();
        ScanOptions { extensions, exclude_dirs: ScanOptions::exclude_set(use_defaults, extra) }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.csv.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH))
    }
}

/// 读取并解析配置文件
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let parsed: FileConfig = toml::from_str(&txt).with_context(|| format!("parse config {}", path.display()))?;
    Ok(parsed)
}
