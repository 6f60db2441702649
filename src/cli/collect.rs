//! # collect 子命令 CLI 定义
//!
//! 并行解析目录中的 Zeo++ 输出，汇总为长格式 CSV
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory containing Zeo++ output files
    pub dir: PathBuf,

    /// Glob patterns for input files, comma separated
    #[arg(long, default_value = "*.chan,*.sa,*.vol,*.volpo,*.psd_histo,*.res")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Filename for the metrics CSV
    #[arg(short, long, default_value = "metrics.csv")]
    pub output: PathBuf,

    /// Treat a label with no value as 0 (.sa/.vol/.volpo)
    #[arg(long, default_value_t = false)]
    pub lenient: bool,
}
