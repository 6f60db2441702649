//! # 输出格式类型
//!
//! Zeo++ `network` 可执行文件产生的各类输出格式。
//!
//! ## 依赖关系
//! - 被 `error.rs`, `parsers/`, `compare.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zeo++ 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// `-chan`: 通道描述 (.chan)
    Chan,
    /// `-sa`: 表面积 (.sa)
    SurfaceArea,
    /// `-vol`: 可及体积 (.vol)
    Volume,
    /// `-volpo`: 探针可占据体积 (.volpo)
    PoreVolume,
    /// `-psd`: 孔径分布直方图 (.psd_histo)
    PoreSizeDist,
    /// `-res`: 最大球直径 (.res)
    Res,
}

impl OutputKind {
    pub const ALL: [OutputKind; 6] = [
        OutputKind::Chan,
        OutputKind::SurfaceArea,
        OutputKind::Volume,
        OutputKind::PoreVolume,
        OutputKind::PoreSizeDist,
        OutputKind::Res,
    ];

    /// 文件扩展名（不含点）
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Chan => "chan",
            OutputKind::SurfaceArea => "sa",
            OutputKind::Volume => "vol",
            OutputKind::PoreVolume => "volpo",
            OutputKind::PoreSizeDist => "psd_histo",
            OutputKind::Res => "res",
        }
    }

    pub fn from_extension(ext: &str) -> Option<OutputKind> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        OutputKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.extension() == ext)
    }

    /// 从文件路径推断格式
    pub fn from_path(path: &Path) -> Option<OutputKind> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputKind::from_extension)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
