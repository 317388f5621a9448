use anyhow::{Context, Result};
use clap::Parser;
use progtrack_core::{
    export_csv, load_config, render_summary, render_table, scan, split_list, summarize, FileConfig,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "progtrack", version, about = "Analyze @progress annotations in code")]
struct Cli {
    /// 扫描根目录（默认当前目录）
    #[arg(default_value = ".")]
    path: PathBuf,

    /// CSV 输出文件（默认 progress_report.csv）
    #[arg(long)]
    csv: Option<PathBuf>,

    /// 自定义文件后缀（逗号分隔），例如 .py,.js
    #[arg(long)]
    ext: Option<String>,

    /// 额外排除的目录（逗号分隔），例如 dist,build
    #[arg(long)]
    exclude: Option<String>,

    /// 不使用默认排除目录（node_modules, .git, __pycache__）
    #[arg(long)]
    no_default_exclude: bool,

    /// 列出未标注的文件
    #[arg(long)]
    verbose: bool,

    /// 配置文件（TOML）；命令行参数优先于配置文件
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// 命令行参数作为最高优先级的配置层
    fn overrides(&self) -> FileConfig {
        FileConfig {
            extensions: self.ext.as_deref().map(split_list),
            exclude: self.exclude.as_deref().map(split_list),
            no_default_exclude: self.no_default_exclude.then_some(true),
            csv: self.csv.clone(),
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();
    let start = Instant::now();

    let base = match &cli.config {
        Some(path) => load_config(path).context("load config")?,
        None => FileConfig::default(),
    };
    let config = base.merge(cli.overrides());
    let opts = config.scan_options();
    let csv_path = config.csv_path();

    info!(path = ?cli.path, csv = ?csv_path, "starting progtrack");
    let result = scan(&cli.path, &opts).context("scan failed")?;

    // 单文件错误只提示，不影响退出码
    for reason in &result.skipped {
        println!("[Error] {reason}");
    }

    println!("{}", render_table(&result.records));
    println!();
    println!("{}", render_summary(&summarize(&result)));

    if cli.verbose && !result.unmarked.is_empty() {
        println!("\nUnmarked files:");
        for file in &result.unmarked {
            println!("  {file}");
        }
    }

    export_csv(&result.records, &csv_path)?;
    println!("\n✅ CSV file exported: {}", csv_path.display());
    println!("\nElapsed time: {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 默认只输出 warn 以上，且写到 stderr，避免与 stdout 上的报告混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
