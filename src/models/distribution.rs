//! # 孔径分布数据模型
//!
//! `.psd_histo` 直方图：按文件顺序保存的 bin 边界与计数。
//!
//! bin 值是 Zeo++ 写出的原始数值。它表示下界、上界还是中点无法仅从
//! 文件内容判断，因此这里不做换算。
//!
//! ## 依赖关系
//! - 被 `parsers/psd.rs` 生成
//! - 被 `compare.rs`, `plot.rs`, `commands/` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 直方图数据列
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    /// bin 边界 (Å)
    pub bins: Vec<f64>,
    /// 每个 bin 的采样点数
    pub counts: Vec<u64>,
    /// 累积分布（两列格式时为空；NaN/Inf 记为 0）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cumulatives: Vec<f64>,
    /// 分布导数（两列格式时为空；NaN/Inf 记为 0）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derivatives: Vec<f64>,
}

impl Histogram {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// 计数总和
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// 第一个不满足严格递增的位置
    pub fn first_non_ascending(&self) -> Option<usize> {
        self.bins
            .windows(2)
            .position(|w| w[0].partial_cmp(&w[1]) != Some(std::cmp::Ordering::Less))
            .map(|i| i + 1)
    }

    pub fn is_ascending(&self) -> bool {
        self.first_non_ascending().is_none()
    }

    /// 计数最多的 bin (边界, 计数)
    pub fn mode(&self) -> Option<(f64, u64)> {
        self.bins
            .iter()
            .zip(&self.counts)
            .max_by_key(|(_, c)| **c)
            .map(|(b, c)| (*b, *c))
    }

    /// 以计数为权重的平均 bin 值
    pub fn mean(&self) -> Option<f64> {
        let total = self.total_count();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .bins
            .iter()
            .zip(&self.counts)
            .map(|(b, c)| b * *c as f64)
            .sum();
        Some(weighted / total as f64)
    }
}

/// 直方图之前的 "标签: 数值" 文件头
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PsdHeader {
    /// bin 宽度 (Å)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_bins: Option<u64>,
    /// 总采样点数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_samples: Option<u64>,
    /// 可及采样点数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible_samples: Option<u64>,
    /// 其余标签（原样保留）
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

impl PsdHeader {
    pub fn is_empty(&self) -> bool {
        self.bin_size.is_none()
            && self.number_of_bins.is_none()
            && self.total_samples.is_none()
            && self.accessible_samples.is_none()
            && self.extra.is_empty()
    }

    /// 所有存在的 (名称, 数值)
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries = Vec::new();
        if let Some(v) = self.bin_size {
            entries.push(("bin_size".to_string(), v));
        }
        if let Some(v) = self.number_of_bins {
            entries.push(("number_of_bins".to_string(), v as f64));
        }
        if let Some(v) = self.total_samples {
            entries.push(("total_samples".to_string(), v as f64));
        }
        if let Some(v) = self.accessible_samples {
            entries.push(("accessible_samples".to_string(), v as f64));
        }
        entries.extend(self.extra.iter().map(|(k, v)| (k.clone(), *v)));
        entries
    }
}

/// 孔径分布
///
/// 序列化形状：`{"psd": {"bins": [...], "counts": [...]}, <文件头标量>}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoreSizeDistribution {
    pub psd: Histogram,
    #[serde(flatten)]
    pub header: PsdHeader,
}

impl PoreSizeDistribution {
    pub fn bins(&self) -> &[f64] {
        &self.psd.bins
    }

    pub fn counts(&self) -> &[u64] {
        &self.psd.counts
    }
}
