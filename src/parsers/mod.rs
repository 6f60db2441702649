//! # 解析器模块
//!
//! 提供 Zeo++ 各类输出格式的解析器。每个解析器都是纯函数：
//! 输入完整文本，输出独立的记录值，不做 I/O，也不共享状态。
//!
//! ## 依赖关系
//! - 被 `compare.rs` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: scan, keyword, chan, sa, vol, psd, res

pub mod chan;
pub mod keyword;
pub mod psd;
pub mod res;
pub mod sa;
pub mod scan;
pub mod vol;

use crate::error::{ParseError, Result, ZeoError};
use crate::models::{
    AccessibleVolume, ChannelRecord, OutputKind, PoreSizeDistribution, ResSummary, SurfaceArea,
    VolumeMode,
};
use keyword::MissingValue;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// 任一格式的解析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedOutput {
    Channels(ChannelRecord),
    SurfaceArea(SurfaceArea),
    Volume(AccessibleVolume),
    PoreVolume(AccessibleVolume),
    PoreSizeDist(PoreSizeDistribution),
    Res(ResSummary),
}

impl ParsedOutput {
    pub fn kind(&self) -> OutputKind {
        match self {
            ParsedOutput::Channels(_) => OutputKind::Chan,
            ParsedOutput::SurfaceArea(_) => OutputKind::SurfaceArea,
            ParsedOutput::Volume(_) => OutputKind::Volume,
            ParsedOutput::PoreVolume(_) => OutputKind::PoreVolume,
            ParsedOutput::PoreSizeDist(_) => OutputKind::PoreSizeDist,
            ParsedOutput::Res(_) => OutputKind::Res,
        }
    }
}

/// 解析选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// 标签后缺失数值记为 0（仅对 .sa/.vol/.volpo 有效）
    pub lenient: bool,
    /// 要求 .psd_histo 的 bin 严格递增
    pub strict: bool,
}

/// 按指定格式解析文本（默认选项）
pub fn parse_output(kind: OutputKind, content: &str) -> std::result::Result<ParsedOutput, ParseError> {
    parse_output_with(kind, content, ParseOptions::default())
}

/// 按指定格式和选项解析文本
pub fn parse_output_with(
    kind: OutputKind,
    content: &str,
    options: ParseOptions,
) -> std::result::Result<ParsedOutput, ParseError> {
    let missing = if options.lenient {
        MissingValue::Zero
    } else {
        MissingValue::Reject
    };

    let parsed = match kind {
        OutputKind::Chan => ParsedOutput::Channels(chan::parse(content)?),
        OutputKind::SurfaceArea => ParsedOutput::SurfaceArea(sa::parse_with(content, missing)?),
        OutputKind::Volume => ParsedOutput::Volume(vol::parse_with(
            content,
            VolumeMode::Accessible,
            missing,
        )?),
        OutputKind::PoreVolume => ParsedOutput::PoreVolume(vol::parse_with(
            content,
            VolumeMode::ProbeOccupiable,
            missing,
        )?),
        OutputKind::PoreSizeDist => {
            let dist = psd::parse(content)?;
            if options.strict {
                psd::check_ascending(&dist)?;
            }
            ParsedOutput::PoreSizeDist(dist)
        }
        OutputKind::Res => ParsedOutput::Res(res::parse(content)?),
    };

    Ok(parsed)
}

/// 从文件路径推断格式
pub fn detect_kind(path: &Path) -> Result<OutputKind> {
    OutputKind::from_path(path).ok_or_else(|| {
        ZeoError::UnsupportedFormat(format!(
            "Cannot determine Zeo++ output format for: {}",
            path.display()
        ))
    })
}

/// 读取文件并解析；`kind` 为 `None` 时按扩展名推断
pub fn parse_output_file(
    path: &Path,
    kind: Option<OutputKind>,
    options: ParseOptions,
) -> Result<ParsedOutput> {
    let kind = match kind {
        Some(k) => k,
        None => detect_kind(path)?,
    };

    let content = fs::read_to_string(path).map_err(|e| ZeoError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_output_with(kind, &content, options).map_err(|e| ZeoError::ParseFile {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_kind() {
        let parsed = parse_output(OutputKind::Res, "EDI.res 3.2 2.8 3.0\n").unwrap();
        assert_eq!(parsed.kind(), OutputKind::Res);

        let parsed = parse_output(OutputKind::PoreSizeDist, "1.0 10\n1.5 25\n2.0 5\n").unwrap();
        match parsed {
            ParsedOutput::PoreSizeDist(dist) => assert_eq!(dist.counts(), &[10, 25, 5]),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_option() {
        let text = "Number_of_pockets: 0 Pocket_surface_area_A^2:";
        assert!(parse_output(OutputKind::SurfaceArea, text).is_err());

        let options = ParseOptions {
            lenient: true,
            strict: false,
        };
        assert!(parse_output_with(OutputKind::SurfaceArea, text, options).is_ok());
    }

    #[test]
    fn test_strict_option_checks_bins() {
        let text = "2.0 1\n1.0 2\n";
        assert!(parse_output(OutputKind::PoreSizeDist, text).is_ok());

        let options = ParseOptions {
            lenient: false,
            strict: true,
        };
        assert!(parse_output_with(OutputKind::PoreSizeDist, text, options).is_err());
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind(Path::new("EDI.volpo")).unwrap(),
            OutputKind::PoreVolume
        );
        assert!(matches!(
            detect_kind(Path::new("ZIF-67_opt.xyz")),
            Err(ZeoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_output_file_reports_path() {
        let dir = std::env::temp_dir().join("zeoparse-parsers-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.res");
        fs::write(&path, "broken.res 3.2 2.8\n").unwrap();

        let err = parse_output_file(&path, None, ParseOptions::default()).unwrap_err();
        match err {
            ZeoError::ParseFile { path: p, source } => {
                assert!(p.ends_with("broken.res"));
                assert!(source.is_format());
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let missing = parse_output_file(&dir.join("absent.res"), None, ParseOptions::default());
        assert!(matches!(missing, Err(ZeoError::FileReadError { .. })));
    }
}
