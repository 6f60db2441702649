//! # parse 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/parse.rs`

use super::KindArg;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 打印格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON document
    Json,
    /// CSV (metric,value)
    Csv,
}

/// parse 子命令参数
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Zeo++ output file
    pub file: PathBuf,

    /// Output kind (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// How to print the parsed record
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Treat a label with no value as 0 (.sa/.vol/.volpo)
    #[arg(long, default_value_t = false)]
    pub lenient: bool,

    /// Require strictly ascending bins (.psd_histo)
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
