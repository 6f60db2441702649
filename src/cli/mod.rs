//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `parse`: 解析单个文件
//! - `compare`: 容差比较
//! - `collect`: 批量收集指标
//! - `plot`: 孔径分布绘图
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: parse, compare, collect, plot

pub mod collect;
pub mod compare;
pub mod parse;
pub mod plot;

use clap::{Parser, Subcommand, ValueEnum};
use zeoparse::OutputKind;

/// zeoparse - Zeo++ 输出解析与比对工具
#[derive(Parser)]
#[command(name = "zeoparse")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Parse and compare Zeo++ pore geometry outputs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a Zeo++ output file (.chan, .sa, .vol, .volpo, .psd_histo, .res)
    Parse(parse::ParseArgs),

    /// Compare an output against a reference within tolerance
    Compare(compare::CompareArgs),

    /// Parse every Zeo++ output in a directory and write a metrics CSV
    Collect(collect::CollectArgs),

    /// Plot a pore size distribution histogram
    Plot(plot::PlotArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Parse(_) => "parse",
            Commands::Compare(_) => "compare",
            Commands::Collect(_) => "collect",
            Commands::Plot(_) => "plot",
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 共享参数类型
// ─────────────────────────────────────────────────────────────

/// 输出格式（`--kind`），未指定时按扩展名推断
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum KindArg {
    /// Channel listing (.chan)
    Chan,
    /// Surface area (.sa)
    Sa,
    /// Accessible volume (.vol)
    Vol,
    /// Probe-occupiable volume (.volpo)
    Volpo,
    /// Pore size distribution histogram (.psd_histo)
    Psd,
    /// Largest included/free sphere (.res)
    Res,
}

impl From<KindArg> for OutputKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Chan => OutputKind::Chan,
            KindArg::Sa => OutputKind::SurfaceArea,
            KindArg::Vol => OutputKind::Volume,
            KindArg::Volpo => OutputKind::PoreVolume,
            KindArg::Psd => OutputKind::PoreSizeDist,
            KindArg::Res => OutputKind::Res,
        }
    }
}
