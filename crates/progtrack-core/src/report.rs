//! 报告输出：控制台表格、汇总块与 CSV 导出
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::{ProgressRecord, ScanResult};

/// CSV 表头（与 `ProgressRecord` 字段顺序一致）
pub const CSV_HEADER: [&str; 3] = ["file", "progress", "note"];

/// 汇总统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub marked: usize,
    /// 进度恰好为 1.0 的文件数
    pub completed: usize,
    /// 有效进度的算术平均；没有有效进度时为 0.0
    pub average: f64,
    pub unmarked: usize,
}

pub fn summarize(result: &ScanResult) -> Summary {
    let valid: Vec<f64> = result.records.iter().filter_map(|r| r.progress).collect();
    let completed = valid.iter().filter(|&&p| p == 1.0).count();
    let average = if valid.is_empty() {
        0.0
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    };
    Summary {
        marked: result.records.len(),
        completed,
        average,
        unmarked: result.unmarked_count(),
    }
}

/// 进度按两位小数显示，缺失时留空
fn format_progress(progress: Option<f64>) -> String {
    progress.map(|p| format!("{p:.2}")).unwrap_or_default()
}

pub fn render_table(records: &[ProgressRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(CSV_HEADER);
    for r in records {
        table.add_row(vec![r.file.clone(), format_progress(r.progress), r.note.clone()]);
    }
    table.to_string()
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "📊 Summary\n-----------\n\
         Marked files: {}\n\
         Completed files: {}\n\
         Average progress: {:.2}%\n\
         Unmarked files: {}",
        summary.marked,
        summary.completed,
        summary.average * 100.0,
        summary.unmarked,
    )
}

/// 将记录写为 CSV：表头始终写出，缺失进度写为空字段
pub fn write_csv<W: Write>(records: &[ProgressRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for r in records {
        writer.serialize(r)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv(records: &[ProgressRecord], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create csv file {}", path.display()))?;
    write_csv(records, BufWriter::new(file)).with_context(|| format!("write csv file {}", path.display()))
}
