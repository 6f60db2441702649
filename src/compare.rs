//! # 容差比较工具
//!
//! 用于把一次 Zeo++ 运行的输出与参考文件对比。`.sa`/`.vol`/`.psd_histo`
//! 来自 Monte-Carlo 采样，两次独立运行的数值不会完全一致，
//! 因此按指标逐项做相对/绝对容差比较，而不是直接判等。
//!
//! 每个解析结果先展开为有序的 [`Metric`] 列表。结构性数值
//! （bin 边界、通道数、维度、整数计数）标记为 `exact`，始终按位比较。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/collect.rs` 使用
//! - 使用 `parsers::ParsedOutput` 和 `models/`

use crate::models::porosity::{find_keyword, SURFACE_AREA_KEYWORDS};
use crate::models::{
    AccessibleVolume, ChannelRecord, Keyword, OutputKind, PoreSizeDistribution, ResSummary,
    SurfaceArea, ValueKind,
};
use crate::parsers::ParsedOutput;

use serde::Serialize;
use std::collections::HashMap;

/// Monte-Carlo 输出的默认相对容差
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.06;

/// 相对容差模式下的默认绝对容差（防止参考值为 0 时无法通过）
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-12;

/// 比较容差：`|actual - expected| <= max(relative * |expected|, absolute)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    /// 严格相等
    pub const fn exact() -> Self {
        Tolerance {
            relative: 0.0,
            absolute: 0.0,
        }
    }

    pub const fn relative(relative: f64) -> Self {
        Tolerance {
            relative,
            absolute: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }

    pub const fn absolute(absolute: f64) -> Self {
        Tolerance {
            relative: 0.0,
            absolute,
        }
    }

    pub fn with_absolute(mut self, absolute: f64) -> Self {
        self.absolute = absolute;
        self
    }

    /// 各格式的默认容差
    pub fn for_kind(kind: OutputKind) -> Self {
        match kind {
            OutputKind::SurfaceArea | OutputKind::Volume | OutputKind::PoreVolume => {
                Tolerance::relative(DEFAULT_RELATIVE_TOLERANCE)
            }
            // 计数允许相差 1
            OutputKind::PoreSizeDist => Tolerance::absolute(1.0),
            OutputKind::Chan | OutputKind::Res => Tolerance::exact(),
        }
    }

    pub fn approx_eq(&self, actual: f64, expected: f64) -> bool {
        if actual == expected {
            return true;
        }
        if !actual.is_finite() || !expected.is_finite() {
            return false;
        }
        let allowed = (self.relative * expected.abs()).max(self.absolute);
        (actual - expected).abs() <= allowed
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::relative(DEFAULT_RELATIVE_TOLERANCE)
    }
}

/// 一个可比较的标量指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub key: String,
    pub value: f64,
    /// 结构性数值，忽略容差
    pub exact: bool,
}

impl Metric {
    fn sampled(key: impl Into<String>, value: f64) -> Self {
        Metric {
            key: key.into(),
            value,
            exact: false,
        }
    }

    fn exact(key: impl Into<String>, value: f64) -> Self {
        Metric {
            key: key.into(),
            value,
            exact: true,
        }
    }
}

/// 把解析结果展开为有序指标列表
pub fn metrics(output: &ParsedOutput) -> Vec<Metric> {
    match output {
        ParsedOutput::Channels(record) => channel_metrics(record),
        ParsedOutput::SurfaceArea(sa) => surface_area_metrics(sa),
        ParsedOutput::Volume(vol) | ParsedOutput::PoreVolume(vol) => volume_metrics(vol),
        ParsedOutput::PoreSizeDist(dist) => psd_metrics(dist),
        ParsedOutput::Res(res) => res_metrics(res),
    }
}

fn channel_metrics(record: &ChannelRecord) -> Vec<Metric> {
    let mut out = vec![Metric::exact("channels", record.len() as f64)];

    for (i, channel) in record.channels.iter().enumerate() {
        out.push(Metric::exact(
            format!("channel[{}].index", i),
            channel.index as f64,
        ));
        out.push(Metric::exact(
            format!("channel[{}].dimensionality", i),
            channel.dimensionality as f64,
        ));
        for (j, d) in channel.diameters.iter().enumerate() {
            out.push(Metric::sampled(format!("channel[{}].diameter[{}]", i, j), *d));
        }
    }

    if let Some(summary) = &record.summary {
        out.push(Metric::sampled(
            "summary.largest_included_sphere",
            summary.largest_included_sphere,
        ));
        out.push(Metric::sampled(
            "summary.largest_free_sphere",
            summary.largest_free_sphere,
        ));
        out.push(Metric::sampled(
            "summary.largest_included_free_sphere",
            summary.largest_included_free_sphere,
        ));
        if let Some(r) = summary.probe_radius {
            out.push(Metric::exact("summary.probe_radius", r));
        }
        if let Some(d) = summary.probe_diameter {
            out.push(Metric::exact("summary.probe_diameter", d));
        }
    }

    out
}

fn keyword_metrics(entries: Vec<(String, f64)>, vocabulary: &[Keyword]) -> Vec<Metric> {
    entries
        .into_iter()
        .map(|(label, value)| {
            let is_int = find_keyword(vocabulary, &label)
                .map(|idx| vocabulary[idx].kind == ValueKind::Int)
                .unwrap_or(false);
            if is_int {
                Metric::exact(label, value)
            } else {
                Metric::sampled(label, value)
            }
        })
        .collect()
}

fn surface_area_metrics(sa: &SurfaceArea) -> Vec<Metric> {
    keyword_metrics(sa.entries(), &SURFACE_AREA_KEYWORDS)
}

fn volume_metrics(vol: &AccessibleVolume) -> Vec<Metric> {
    keyword_metrics(vol.entries(), vol.mode.keywords())
}

fn psd_metrics(dist: &PoreSizeDistribution) -> Vec<Metric> {
    let mut out = vec![Metric::exact("psd.rows", dist.psd.len() as f64)];

    for (i, (bin, count)) in dist.psd.bins.iter().zip(&dist.psd.counts).enumerate() {
        out.push(Metric::exact(format!("psd.bins[{}]", i), *bin));
        out.push(Metric::sampled(format!("psd.counts[{}]", i), *count as f64));
    }

    let header = &dist.header;
    if let Some(v) = header.bin_size {
        out.push(Metric::exact("bin_size", v));
    }
    if let Some(v) = header.number_of_bins {
        out.push(Metric::exact("number_of_bins", v as f64));
    }
    if let Some(v) = header.total_samples {
        out.push(Metric::exact("total_samples", v as f64));
    }
    if let Some(v) = header.accessible_samples {
        out.push(Metric::sampled("accessible_samples", v as f64));
    }
    for (k, v) in &header.extra {
        out.push(Metric::sampled(k.clone(), *v));
    }

    out
}

fn res_metrics(res: &ResSummary) -> Vec<Metric> {
    vec![
        Metric::sampled("largest_included_sphere", res.largest_included_sphere),
        Metric::sampled("largest_free_sphere", res.largest_free_sphere),
        Metric::sampled(
            "largest_included_sphere_along_free_path",
            res.largest_included_sphere_along_free_path,
        ),
    ]
}

/// 超出容差的指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub key: String,
    pub actual: f64,
    pub expected: f64,
    pub exact: bool,
}

impl Mismatch {
    /// 相对偏差（参考值为 0 时为 `None`）
    pub fn relative_error(&self) -> Option<f64> {
        if self.expected == 0.0 {
            None
        } else {
            Some((self.actual - self.expected).abs() / self.expected.abs())
        }
    }
}

/// 比较结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// 两侧都存在并参与比较的指标数
    pub compared: usize,
    pub mismatches: Vec<Mismatch>,
    /// 参考中有、实际输出中缺失
    pub missing: Vec<String>,
    /// 实际输出中有、参考中没有
    pub unexpected: Vec<String>,
    /// 两个输出的格式不同 (actual, reference)
    pub kind_mismatch: Option<(OutputKind, OutputKind)>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.kind_mismatch.is_none()
            && self.mismatches.is_empty()
            && self.missing.is_empty()
            && self.unexpected.is_empty()
    }

    /// 所有问题的数量
    pub fn problem_count(&self) -> usize {
        self.mismatches.len()
            + self.missing.len()
            + self.unexpected.len()
            + usize::from(self.kind_mismatch.is_some())
    }
}

/// 逐项比较两组指标
pub fn compare_metrics(actual: &[Metric], reference: &[Metric], tol: &Tolerance) -> Comparison {
    let actual_by_key: HashMap<&str, &Metric> =
        actual.iter().map(|m| (m.key.as_str(), m)).collect();
    let reference_keys: HashMap<&str, ()> =
        reference.iter().map(|m| (m.key.as_str(), ())).collect();

    let mut result = Comparison::default();

    for expected in reference {
        let Some(got) = actual_by_key.get(expected.key.as_str()) else {
            result.missing.push(expected.key.clone());
            continue;
        };
        result.compared += 1;

        let exact = expected.exact || got.exact;
        let ok = if exact {
            got.value == expected.value
        } else {
            tol.approx_eq(got.value, expected.value)
        };
        if !ok {
            result.mismatches.push(Mismatch {
                key: expected.key.clone(),
                actual: got.value,
                expected: expected.value,
                exact,
            });
        }
    }

    result.unexpected = actual
        .iter()
        .filter(|m| !reference_keys.contains_key(m.key.as_str()))
        .map(|m| m.key.clone())
        .collect();

    result
}

/// 比较两个解析结果
pub fn compare_outputs(
    actual: &ParsedOutput,
    reference: &ParsedOutput,
    tol: &Tolerance,
) -> Comparison {
    if actual.kind() != reference.kind() {
        return Comparison {
            kind_mismatch: Some((actual.kind(), reference.kind())),
            ..Default::default()
        };
    }
    compare_metrics(&metrics(actual), &metrics(reference), tol)
}
