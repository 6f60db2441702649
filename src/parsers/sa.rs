//! # Zeo++ .sa 表面积解析器
//!
//! `network -sa <chan_r> <probe_r> <samples> <file>` 的输出。
//!
//! ## .sa 格式说明
//! ```text
//! @ EDI.sa Unitcell_volume: 307.484   Density: 1.62239   ASA_A^2: 60.7713
//! ASA_m^2/cm^3: 1976.4 ASA_m^2/g: 1218.21 NASA_A^2: 0 NASA_m^2/cm^3: 0 NASA_m^2/g: 0
//! Number_of_channels: 1 Channel_surface_area_A^2: 60.7713
//! Number_of_pockets: 0 Pocket_surface_area_A^2: 0
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/keyword.rs`, `models/porosity.rs`

use super::keyword::{self, MissingValue};
use crate::error::ParseError;
use crate::models::porosity::SURFACE_AREA_KEYWORDS;
use crate::models::{OutputKind, SurfaceArea};

/// 解析 .sa 内容（严格模式：标签后必须有数值）
pub fn parse(content: &str) -> Result<SurfaceArea, ParseError> {
    parse_with(content, MissingValue::Reject)
}

/// 解析 .sa 内容，缺失的数值记为 0
pub fn parse_lenient(content: &str) -> Result<SurfaceArea, ParseError> {
    parse_with(content, MissingValue::Zero)
}

pub fn parse_with(content: &str, missing: MissingValue) -> Result<SurfaceArea, ParseError> {
    let pairs = keyword::scan_pairs(
        content,
        &SURFACE_AREA_KEYWORDS,
        OutputKind::SurfaceArea,
        missing,
    )?;

    let mut sa = SurfaceArea::default();
    for pair in pairs {
        sa.assign(&pair.label, pair.value);
    }
    Ok(sa)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDI_SA: &str = "@ EDI.sa Unitcell_volume: 307.484   Density: 1.62239   ASA_A^2: 60.7713 ASA_m^2/cm^3: 1976.4 ASA_m^2/g: 1218.21 NASA_A^2: 0 NASA_m^2/cm^3: 0 NASA_m^2/g: 0\nNumber_of_channels: 1 Channel_surface_area_A^2: 60.7713\nNumber_of_pockets: 0 Pocket_surface_area_A^2: 0\n";

    #[test]
    fn test_parse_sa_minimal() {
        let sa = parse("ASA_A^2: 120.5 NASA_A^2: 0.0\n").unwrap();
        let map = sa.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["ASA_A^2"], 120.5);
        assert_eq!(map["NASA_A^2"], 0.0);
        assert_eq!(sa.asa_a2, Some(120.5));
        assert_eq!(sa.unitcell_volume, None);
    }

    #[test]
    fn test_parse_sa_full() {
        let sa = parse(EDI_SA).unwrap();
        assert_eq!(sa.unitcell_volume, Some(307.484));
        assert_eq!(sa.density, Some(1.62239));
        assert_eq!(sa.asa_m2_g, Some(1218.21));
        assert_eq!(sa.number_of_channels, Some(1));
        assert_eq!(sa.number_of_pockets, Some(0));
        assert_eq!(sa.channel_surface_area_a2, Some(60.7713));
        assert_eq!(sa.pocket_surface_area_a2, Some(0.0));
        assert!(sa.extra.is_empty());
        assert_eq!(sa.entries().len(), 12);
    }

    #[test]
    fn test_parse_sa_value_wraps_to_next_line() {
        let text = "@ HKUST-1.sa Unitcell_volume: 18280.8   Density: 0.879097   ASA_A^2:\n3545.59 ASA_m^2/cm^3: 1939.51\n";
        let sa = parse(text).unwrap();
        assert_eq!(sa.asa_a2, Some(3545.59));
        assert_eq!(sa.asa_m2_cm3, Some(1939.51));
    }

    #[test]
    fn test_parse_sa_unknown_label_preserved() {
        let sa = parse("ASA_A^2: 120.5 Probe_radius_A: 1.2\n").unwrap();
        assert_eq!(sa.extra.get("Probe_radius_A"), Some(&1.2));
        assert_eq!(sa.get("Probe_radius_A"), Some(1.2));
    }

    #[test]
    fn test_parse_sa_empty_pocket_area() {
        let text = "Number_of_pockets: 0\nPocket_surface_area_A^2:\n";
        assert!(parse(text).is_err());
        let sa = parse_lenient(text).unwrap();
        assert_eq!(sa.pocket_surface_area_a2, Some(0.0));
    }

    #[test]
    fn test_parse_sa_channel_count_is_checked() {
        assert!(parse("Number_of_channels:1.5").unwrap_err().is_format());
        assert!(parse("Number_of_channels: 5000000000").unwrap_err().is_format());
        assert_eq!(parse("Number_of_channels:3").unwrap().number_of_channels, Some(3));
    }

    #[test]
    fn test_parse_sa_is_deterministic() {
        assert_eq!(parse(EDI_SA).unwrap(), parse(EDI_SA).unwrap());
    }
}
