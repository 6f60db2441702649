//! # compare 子命令 CLI 定义
//!
//! 容差默认按格式选取：.sa/.vol/.volpo 相对 6%，.psd_histo 计数绝对 1，
//! .chan/.res 严格相等。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compare.rs`

use super::KindArg;
use clap::Args;
use std::path::PathBuf;

/// compare 子命令参数
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Output file to check
    pub actual: PathBuf,

    /// Reference output file
    pub reference: PathBuf,

    /// Output kind (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Relative tolerance (default depends on the output kind)
    #[arg(long, env = "ZEOPARSE_REL_TOL")]
    pub rel_tol: Option<f64>,

    /// Absolute tolerance (default depends on the output kind)
    #[arg(long)]
    pub abs_tol: Option<f64>,

    /// Treat a label with no value as 0 (.sa/.vol/.volpo)
    #[arg(long, default_value_t = false)]
    pub lenient: bool,

    /// Number of mismatches to print
    #[arg(long, default_value_t = 20)]
    pub show: usize,
}
