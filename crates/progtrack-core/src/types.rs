//! 公共类型（对外暴露）
use serde::{Deserialize, Serialize};

use crate::error::SkipReason;

/// 单个已标记文件的进度记录（对应 CSV 的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// 相对扫描根目录的路径
    pub file: String,
    /// 归一化后的进度；无法解析时为空
    pub progress: Option<f64>,
    pub note: String,
}

/// 一次扫描的结果
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    /// 已标记文件，按遍历顺序
    pub records: Vec<ProgressRecord>,
    /// 无标注文件的相对路径
    pub unmarked: Vec<String>,
    /// 被跳过的文件及原因（不计入上面两项）
    pub skipped: Vec<SkipReason>,
}

impl ScanResult {
    pub fn unmarked_count(&self) -> usize {
        self.unmarked.len()
    }
}
