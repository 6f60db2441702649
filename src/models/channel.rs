//! # 通道数据模型
//!
//! `.chan` 文件描述的孔道：维度与直径测量值。
//!
//! ## 依赖关系
//! - 被 `parsers/chan.rs` 生成
//! - 被 `compare.rs` 和 `commands/` 使用

use serde::{Deserialize, Serialize};

/// 单个通道
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// 通道编号（按文件中的写法）
    pub index: usize,

    /// 连通维度 (0-3)
    pub dimensionality: u8,

    /// 直径测量值 (Å)，保持文件顺序
    ///
    /// Zeo++ 写出三列：最大内含球、最大自由球、沿自由路径的最大内含球。
    pub diameters: Vec<f64>,
}

impl Channel {
    pub fn new(index: usize, dimensionality: u8, diameters: Vec<f64>) -> Self {
        Channel {
            index,
            dimensionality,
            diameters,
        }
    }

    /// 最大内含球直径 (Di)
    pub fn largest_included_sphere(&self) -> Option<f64> {
        self.diameters.first().copied()
    }

    /// 最大自由球直径 (Df)
    pub fn largest_free_sphere(&self) -> Option<f64> {
        self.diameters.get(1).copied()
    }

    /// 沿自由球路径的最大内含球直径 (Dif)
    pub fn largest_included_free_sphere(&self) -> Option<f64> {
        self.diameters.get(2).copied()
    }
}

/// `.chan` 最后一行的汇总（各列最大值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub largest_included_sphere: f64,
    pub largest_free_sphere: f64,
    pub largest_included_free_sphere: f64,
    /// 探针半径 (Å)
    pub probe_radius: Option<f64>,
    /// 探针直径 (Å)
    pub probe_diameter: Option<f64>,
}

/// 通道记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// 文件头声明的通道数（无文件头时为 `None`）
    pub declared_count: Option<usize>,

    /// 通道列表，保持文件顺序
    pub channels: Vec<Channel>,

    /// 汇总行
    pub summary: Option<ChannelSummary>,
}

impl ChannelRecord {
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// 各通道维度
    pub fn dimensionalities(&self) -> Vec<u8> {
        self.channels.iter().map(|c| c.dimensionality).collect()
    }

    /// 所有通道中最大的内含球直径
    pub fn max_included_sphere(&self) -> Option<f64> {
        self.channels
            .iter()
            .filter_map(|c| c.largest_included_sphere())
            .fold(None, |acc, d| Some(acc.map_or(d, |m: f64| m.max(d))))
    }
}
