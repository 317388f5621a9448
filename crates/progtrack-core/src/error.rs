//! 单文件跳过原因
use thiserror::Error;

/// 文件被整体跳过的原因；只影响该文件，不会中断扫描
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// 同一文件出现多个 `@progress`，无法判断取哪一个
    #[error("Multiple @progress annotations in {file}, skipping!")]
    MultipleAnnotations { file: String, count: usize },
}

impl SkipReason {
    pub fn file(&self) -> &str {
        match self {
            SkipReason::MultipleAnnotations { file, .. } => file,
        }
    }
}
