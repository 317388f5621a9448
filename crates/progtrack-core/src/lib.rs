//! `@progress` 标注统计核心库
//!
//! 设计要点：
//! - 单线程线性流程：遍历目录 → 正则提取 → 归一化 → 汇总 → 输出。
//! - 每个文件独立处理，互不共享可变状态；单文件问题只跳过该文件。
//! - 遍历按文件名排序，保证表格与 CSV 顺序可复现。

mod annotation;
mod config;
mod error;
mod options;
mod report;
mod scan;
mod types;

pub use annotation::{clean_note, normalize_progress, Annotation, AnnotationMatcher};
pub use config::{load_config, FileConfig, DEFAULT_CSV_PATH};
pub use error::SkipReason;
pub use options::{split_list, ScanOptions, DEFAULT_EXCLUDE_DIRS, DEFAULT_EXTENSIONS};
pub use report::{export_csv, render_summary, render_table, summarize, write_csv, Summary, CSV_HEADER};
pub use scan::scan;
pub use types::{ProgressRecord, ScanResult};
