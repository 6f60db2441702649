//! # plot 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Pore size distribution file (.psd_histo)
    pub file: PathBuf,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "psd.png")]
    pub output: PathBuf,

    /// Title for the plot (default: file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
