//! # 表面积与体积数据模型
//!
//! `.sa`, `.vol`, `.volpo` 都是 "标签: 数值" 交错排列的格式，
//! 这里把已知标签映射到固定字段，未知标签保存在 `extra` 中。
//!
//! ## .sa 示例
//! ```text
//! @ HKUST-1.sa Unitcell_volume: 18280.8   Density: 0.879097   ASA_A^2: 3545.59
//! ASA_m^2/cm^3: 1939.51 ASA_m^2/g: 2206.26 NASA_A^2: 0 NASA_m^2/cm^3: 0 NASA_m^2/g: 0
//! Number_of_channels: 1 Channel_surface_area_A^2: 3545.59
//! Number_of_pockets: 0 Pocket_surface_area_A^2: 0
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/keyword.rs`, `parsers/sa.rs`, `parsers/vol.rs` 使用
//! - 被 `compare.rs` 和 `commands/` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 标签对应数值的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Int,
}

/// 已知标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    /// 文件中的标签写法（不含冒号）
    pub label: &'static str,
    /// 单位，无量纲量为 `None`
    pub unit: Option<&'static str>,
    pub kind: ValueKind,
}

impl Keyword {
    const fn float(label: &'static str, unit: Option<&'static str>) -> Self {
        Keyword {
            label,
            unit,
            kind: ValueKind::Float,
        }
    }

    const fn int(label: &'static str) -> Self {
        Keyword {
            label,
            unit: None,
            kind: ValueKind::Int,
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label)
    }
}

/// 在词表中查找标签（忽略大小写）
pub fn find_keyword(vocabulary: &[Keyword], label: &str) -> Option<usize> {
    vocabulary.iter().position(|k| k.matches(label))
}

// ─────────────────────────────────────────────────────────────
// 表面积 (.sa)
// ─────────────────────────────────────────────────────────────

pub const SURFACE_AREA_KEYWORDS: [Keyword; 12] = [
    Keyword::float("Unitcell_volume", Some("A^3")),
    Keyword::float("Density", Some("g/cm^3")),
    Keyword::float("ASA_A^2", Some("A^2")),
    Keyword::float("ASA_m^2/cm^3", Some("m^2/cm^3")),
    Keyword::float("ASA_m^2/g", Some("m^2/g")),
    Keyword::float("NASA_A^2", Some("A^2")),
    Keyword::float("NASA_m^2/cm^3", Some("m^2/cm^3")),
    Keyword::float("NASA_m^2/g", Some("m^2/g")),
    Keyword::int("Number_of_channels"),
    Keyword::float("Channel_surface_area_A^2", Some("A^2")),
    Keyword::int("Number_of_pockets"),
    Keyword::float("Pocket_surface_area_A^2", Some("A^2")),
];

/// 表面积记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceArea {
    /// 晶胞体积 (Å³)
    pub unitcell_volume: Option<f64>,
    /// 密度 (g/cm³)
    pub density: Option<f64>,
    /// 可及表面积 (Å²)
    pub asa_a2: Option<f64>,
    pub asa_m2_cm3: Option<f64>,
    pub asa_m2_g: Option<f64>,
    /// 不可及表面积 (Å²)
    pub nasa_a2: Option<f64>,
    pub nasa_m2_cm3: Option<f64>,
    pub nasa_m2_g: Option<f64>,
    pub number_of_channels: Option<u32>,
    pub channel_surface_area_a2: Option<f64>,
    pub number_of_pockets: Option<u32>,
    pub pocket_surface_area_a2: Option<f64>,
    /// 未知标签，原样保留
    pub extra: BTreeMap<String, f64>,
}

impl SurfaceArea {
    /// 写入一个标签值；未知标签进入 `extra`
    pub fn assign(&mut self, label: &str, value: f64) {
        let Some(idx) = find_keyword(&SURFACE_AREA_KEYWORDS, label) else {
            self.extra.insert(label.to_string(), value);
            return;
        };
        match idx {
            0 => self.unitcell_volume = Some(value),
            1 => self.density = Some(value),
            2 => self.asa_a2 = Some(value),
            3 => self.asa_m2_cm3 = Some(value),
            4 => self.asa_m2_g = Some(value),
            5 => self.nasa_a2 = Some(value),
            6 => self.nasa_m2_cm3 = Some(value),
            7 => self.nasa_m2_g = Some(value),
            8 => self.number_of_channels = Some(value as u32),
            9 => self.channel_surface_area_a2 = Some(value),
            10 => self.number_of_pockets = Some(value as u32),
            _ => self.pocket_surface_area_a2 = Some(value),
        }
    }

    /// 按文件标签取值
    pub fn get(&self, label: &str) -> Option<f64> {
        match find_keyword(&SURFACE_AREA_KEYWORDS, label) {
            Some(0) => self.unitcell_volume,
            Some(1) => self.density,
            Some(2) => self.asa_a2,
            Some(3) => self.asa_m2_cm3,
            Some(4) => self.asa_m2_g,
            Some(5) => self.nasa_a2,
            Some(6) => self.nasa_m2_cm3,
            Some(7) => self.nasa_m2_g,
            Some(8) => self.number_of_channels.map(f64::from),
            Some(9) => self.channel_surface_area_a2,
            Some(10) => self.number_of_pockets.map(f64::from),
            Some(_) => self.pocket_surface_area_a2,
            None => self.extra.get(label).copied(),
        }
    }

    /// 所有存在的 (标签, 数值)，先已知标签（词表顺序）后未知标签
    pub fn entries(&self) -> Vec<(String, f64)> {
        collect_entries(&SURFACE_AREA_KEYWORDS, &self.extra, |label| self.get(label))
    }

    /// 标签到数值的映射
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries().into_iter().collect()
    }

    /// 总表面积 (Å²) = ASA + NASA
    pub fn total_area_a2(&self) -> Option<f64> {
        match (self.asa_a2, self.nasa_a2) {
            (Some(a), Some(n)) => Some(a + n),
            (Some(a), None) => Some(a),
            _ => None,
        }
    }

    /// 可及表面积占总表面积的比例
    pub fn accessible_fraction(&self) -> Option<f64> {
        let total = self.total_area_a2()?;
        if total > 0.0 {
            self.asa_a2.map(|a| a / total)
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 体积 (.vol / .volpo)
// ─────────────────────────────────────────────────────────────

pub const ACCESSIBLE_VOLUME_KEYWORDS: [Keyword; 8] = [
    Keyword::float("Unitcell_volume", Some("A^3")),
    Keyword::float("Density", Some("g/cm^3")),
    Keyword::float("AV_A^3", Some("A^3")),
    Keyword::float("AV_Volume_fraction", None),
    Keyword::float("AV_cm^3/g", Some("cm^3/g")),
    Keyword::float("NAV_A^3", Some("A^3")),
    Keyword::float("NAV_Volume_fraction", None),
    Keyword::float("NAV_cm^3/g", Some("cm^3/g")),
];

pub const PORE_VOLUME_KEYWORDS: [Keyword; 8] = [
    Keyword::float("Unitcell_volume", Some("A^3")),
    Keyword::float("Density", Some("g/cm^3")),
    Keyword::float("POAV_A^3", Some("A^3")),
    Keyword::float("POAV_Volume_fraction", None),
    Keyword::float("POAV_cm^3/g", Some("cm^3/g")),
    Keyword::float("PONAV_A^3", Some("A^3")),
    Keyword::float("PONAV_Volume_fraction", None),
    Keyword::float("PONAV_cm^3/g", Some("cm^3/g")),
];

/// 体积计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeMode {
    /// `-vol`: 探针中心可及体积 (AV / NAV)
    #[default]
    Accessible,
    /// `-volpo`: 探针可占据体积 (POAV / PONAV)
    ProbeOccupiable,
}

impl VolumeMode {
    pub fn keywords(&self) -> &'static [Keyword] {
        match self {
            VolumeMode::Accessible => &ACCESSIBLE_VOLUME_KEYWORDS,
            VolumeMode::ProbeOccupiable => &PORE_VOLUME_KEYWORDS,
        }
    }
}

/// 可及体积记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessibleVolume {
    pub mode: VolumeMode,
    /// 晶胞体积 (Å³)
    pub unitcell_volume: Option<f64>,
    /// 密度 (g/cm³)
    pub density: Option<f64>,
    /// 可及体积 (Å³)
    pub accessible_a3: Option<f64>,
    pub accessible_fraction: Option<f64>,
    pub accessible_cm3_g: Option<f64>,
    /// 不可及体积 (Å³)
    pub non_accessible_a3: Option<f64>,
    pub non_accessible_fraction: Option<f64>,
    pub non_accessible_cm3_g: Option<f64>,
    /// 未知标签，原样保留
    pub extra: BTreeMap<String, f64>,
}

impl AccessibleVolume {
    pub fn new(mode: VolumeMode) -> Self {
        AccessibleVolume {
            mode,
            ..Default::default()
        }
    }

    fn slot(&self, idx: usize) -> Option<f64> {
        match idx {
            0 => self.unitcell_volume,
            1 => self.density,
            2 => self.accessible_a3,
            3 => self.accessible_fraction,
            4 => self.accessible_cm3_g,
            5 => self.non_accessible_a3,
            6 => self.non_accessible_fraction,
            _ => self.non_accessible_cm3_g,
        }
    }

    fn slot_mut(&mut self, idx: usize) -> &mut Option<f64> {
        match idx {
            0 => &mut self.unitcell_volume,
            1 => &mut self.density,
            2 => &mut self.accessible_a3,
            3 => &mut self.accessible_fraction,
            4 => &mut self.accessible_cm3_g,
            5 => &mut self.non_accessible_a3,
            6 => &mut self.non_accessible_fraction,
            _ => &mut self.non_accessible_cm3_g,
        }
    }

    /// 写入一个标签值；未知标签进入 `extra`
    pub fn assign(&mut self, label: &str, value: f64) {
        match find_keyword(self.mode.keywords(), label) {
            Some(idx) => *self.slot_mut(idx) = Some(value),
            None => {
                self.extra.insert(label.to_string(), value);
            }
        }
    }

    /// 按文件标签取值
    pub fn get(&self, label: &str) -> Option<f64> {
        match find_keyword(self.mode.keywords(), label) {
            Some(idx) => self.slot(idx),
            None => self.extra.get(label).copied(),
        }
    }

    /// 所有存在的 (标签, 数值)，先已知标签（词表顺序）后未知标签
    pub fn entries(&self) -> Vec<(String, f64)> {
        collect_entries(self.mode.keywords(), &self.extra, |label| self.get(label))
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries().into_iter().collect()
    }

    /// 可及 + 不可及体积分数
    pub fn total_volume_fraction(&self) -> Option<f64> {
        match (self.accessible_fraction, self.non_accessible_fraction) {
            (Some(a), Some(n)) => Some(a + n),
            _ => None,
        }
    }

    /// 检查体积分数之和是否等于 `expected`（绝对容差 `tol`）
    pub fn check_fraction_sum(&self, expected: f64, tol: f64) -> bool {
        self.total_volume_fraction()
            .map(|total| (total - expected).abs() <= tol)
            .unwrap_or(false)
    }
}

fn collect_entries(
    vocabulary: &[Keyword],
    extra: &BTreeMap<String, f64>,
    get: impl Fn(&str) -> Option<f64>,
) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = vocabulary
        .iter()
        .filter_map(|k| get(k.label).map(|v| (k.label.to_string(), v)))
        .collect();
    entries.extend(extra.iter().map(|(k, v)| (k.clone(), *v)));
    entries
}

/// 标签对应的单位
pub fn unit_of(vocabulary: &[Keyword], label: &str) -> Option<&'static str> {
    find_keyword(vocabulary, label).and_then(|idx| vocabulary[idx].unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_area_assign_and_get() {
        let mut sa = SurfaceArea::default();
        sa.assign("ASA_A^2", 120.5);
        sa.assign("asa_m^2/g", 2206.26);
        sa.assign("Number_of_channels", 2.0);
        sa.assign("New_metric_A^2", 7.0);

        assert_eq!(sa.asa_a2, Some(120.5));
        assert_eq!(sa.asa_m2_g, Some(2206.26));
        assert_eq!(sa.number_of_channels, Some(2));
        assert_eq!(sa.get("ASA_A^2"), Some(120.5));
        assert_eq!(sa.get("Number_of_channels"), Some(2.0));
        assert_eq!(sa.get("New_metric_A^2"), Some(7.0));
        assert_eq!(sa.get("NASA_A^2"), None);
    }

    #[test]
    fn test_surface_area_entries_order() {
        let mut sa = SurfaceArea::default();
        sa.assign("Zeta", 1.0);
        sa.assign("NASA_A^2", 0.0);
        sa.assign("ASA_A^2", 120.5);

        let labels: Vec<String> = sa.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["ASA_A^2", "NASA_A^2", "Zeta"]);
    }

    #[test]
    fn test_accessible_fraction() {
        let mut sa = SurfaceArea::default();
        sa.assign("ASA_A^2", 75.0);
        sa.assign("NASA_A^2", 25.0);
        assert_eq!(sa.total_area_a2(), Some(100.0));
        assert_eq!(sa.accessible_fraction(), Some(0.75));
    }

    #[test]
    fn test_volume_modes_use_own_labels() {
        let mut vol = AccessibleVolume::new(VolumeMode::Accessible);
        vol.assign("AV_Volume_fraction", 0.07366);
        vol.assign("POAV_Volume_fraction", 0.42696);
        assert_eq!(vol.accessible_fraction, Some(0.07366));
        assert_eq!(vol.extra.get("POAV_Volume_fraction"), Some(&0.42696));

        let mut volpo = AccessibleVolume::new(VolumeMode::ProbeOccupiable);
        volpo.assign("POAV_Volume_fraction", 0.42696);
        assert_eq!(volpo.accessible_fraction, Some(0.42696));
        assert!(volpo.extra.is_empty());
    }

    #[test]
    fn test_fraction_sum() {
        let mut vol = AccessibleVolume::new(VolumeMode::Accessible);
        vol.assign("AV_Volume_fraction", 0.3);
        vol.assign("NAV_Volume_fraction", 0.1);
        assert!(vol.check_fraction_sum(0.4, 1e-9));
        assert!(!vol.check_fraction_sum(0.5, 1e-9));
        assert!(!AccessibleVolume::default().check_fraction_sum(0.0, 1e-9));
    }

    #[test]
    fn test_units() {
        assert_eq!(unit_of(&SURFACE_AREA_KEYWORDS, "asa_m^2/g"), Some("m^2/g"));
        assert_eq!(unit_of(&ACCESSIBLE_VOLUME_KEYWORDS, "AV_Volume_fraction"), None);
        assert_eq!(unit_of(&PORE_VOLUME_KEYWORDS, "PONAV_cm^3/g"), Some("cm^3/g"));
    }
}
