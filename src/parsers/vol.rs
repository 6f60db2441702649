//! # Zeo++ .vol / .volpo 体积解析器
//!
//! ## .vol 格式说明 (`-vol`)
//! ```text
//! @ EDI.vol Unitcell_volume: 307.484   Density: 1.62239
//! AV_A^3: 22.6493 AV_Volume_fraction: 0.07366 AV_cm^3/g: 0.0454022
//! NAV_A^3: 0 NAV_Volume_fraction: 0 NAV_cm^3/g: 0
//! ```
//!
//! ## .volpo 格式说明 (`-volpo`)
//! ```text
//! @ EDI.volpo Unitcell_volume: 307.484   Density: 1.62239
//! POAV_A^3: 131.284 POAV_Volume_fraction: 0.42696 POAV_cm^3/g: 0.263168
//! PONAV_A^3: 0 PONAV_Volume_fraction: 0 PONAV_cm^3/g: 0
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/keyword.rs`, `models/porosity.rs`

use super::keyword::{self, MissingValue};
use crate::error::ParseError;
use crate::models::{AccessibleVolume, OutputKind, VolumeMode};

/// 解析 .vol 内容
pub fn parse(content: &str) -> Result<AccessibleVolume, ParseError> {
    parse_with(content, VolumeMode::Accessible, MissingValue::Reject)
}

/// 解析 .volpo 内容
pub fn parse_volpo(content: &str) -> Result<AccessibleVolume, ParseError> {
    parse_with(content, VolumeMode::ProbeOccupiable, MissingValue::Reject)
}

/// 解析 .vol 内容，缺失的数值记为 0
pub fn parse_lenient(content: &str) -> Result<AccessibleVolume, ParseError> {
    parse_with(content, VolumeMode::Accessible, MissingValue::Zero)
}

pub fn parse_with(
    content: &str,
    mode: VolumeMode,
    missing: MissingValue,
) -> Result<AccessibleVolume, ParseError> {
    let format = match mode {
        VolumeMode::Accessible => OutputKind::Volume,
        VolumeMode::ProbeOccupiable => OutputKind::PoreVolume,
    };

    let pairs = keyword::scan_pairs(content, mode.keywords(), format, missing)?;

    let mut vol = AccessibleVolume::new(mode);
    for pair in pairs {
        vol.assign(&pair.label, pair.value);
    }
    Ok(vol)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDI_VOL: &str = "@ EDI.vol Unitcell_volume: 307.484   Density: 1.62239\nAV_A^3: 22.6493 AV_Volume_fraction: 0.07366 AV_cm^3/g: 0.0454022\nNAV_A^3: 0 NAV_Volume_fraction: 0 NAV_cm^3/g: 0\n";

    const EDI_VOLPO: &str = "@ EDI.volpo Unitcell_volume: 307.484   Density: 1.62239\nPOAV_A^3: 131.284 POAV_Volume_fraction: 0.42696 POAV_cm^3/g: 0.263168\nPONAV_A^3: 0 PONAV_Volume_fraction: 0 PONAV_cm^3/g: 0\n";

    #[test]
    fn test_parse_vol() {
        let vol = parse(EDI_VOL).unwrap();
        assert_eq!(vol.mode, VolumeMode::Accessible);
        assert_eq!(vol.unitcell_volume, Some(307.484));
        assert_eq!(vol.accessible_a3, Some(22.6493));
        assert_eq!(vol.accessible_fraction, Some(0.07366));
        assert_eq!(vol.accessible_cm3_g, Some(0.0454022));
        assert_eq!(vol.non_accessible_fraction, Some(0.0));
        assert!(vol.extra.is_empty());
        assert_eq!(vol.entries().len(), 8);
        assert!(vol.check_fraction_sum(0.07366, 1e-12));
    }

    #[test]
    fn test_parse_volpo() {
        let vol = parse_volpo(EDI_VOLPO).unwrap();
        assert_eq!(vol.mode, VolumeMode::ProbeOccupiable);
        assert_eq!(vol.accessible_a3, Some(131.284));
        assert_eq!(vol.get("POAV_Volume_fraction"), Some(0.42696));
        assert!(vol.extra.is_empty());
    }

    #[test]
    fn test_vol_labels_in_volpo_are_extra() {
        let vol = parse_volpo(EDI_VOL).unwrap();
        assert_eq!(vol.accessible_a3, None);
        assert_eq!(vol.extra.get("AV_A^3"), Some(&22.6493));
    }

    #[test]
    fn test_parse_vol_forward_compatible() {
        let text = format!("{}Probe_occupiable_fraction: 0.5\n", EDI_VOL);
        let vol = parse(&text).unwrap();
        assert_eq!(vol.extra.get("Probe_occupiable_fraction"), Some(&0.5));
        assert_eq!(vol.accessible_a3, Some(22.6493));
    }

    #[test]
    fn test_parse_vol_bad_value() {
        let err = parse("AV_A^3: 22.6493 AV_Volume_fraction: abc\n").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_parse_vol_lenient_missing_value() {
        let text = "AV_A^3: 22.6493 NAV_A^3:\n";
        assert!(parse(text).is_err());
        let vol = parse_lenient(text).unwrap();
        assert_eq!(vol.non_accessible_a3, Some(0.0));
    }
}
