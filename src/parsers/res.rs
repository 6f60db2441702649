//! # Zeo++ .res 格式解析器
//!
//! `network -res <file>` 的输出：一行三个直径。
//!
//! ## .res 格式说明
//! ```text
//! HKUST-1.res    13.19937 6.74621  13.19937
//! ```
//! 依次为最大内含球 Di、最大自由球 Df、沿自由球路径的最大内含球 Dif (Å)。
//! 行首的文件名标签可省略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/scan.rs`, `models/res.rs`

use super::scan;
use crate::error::ParseError;
use crate::models::{OutputKind, ResSummary};

const FORMAT: OutputKind = OutputKind::Res;

/// 从字符串内容解析 .res 格式
pub fn parse(content: &str) -> Result<ResSummary, ParseError> {
    let lines = scan::scan(content);

    let line = match lines.as_slice() {
        [line] => line,
        [] => return Err(ParseError::format(FORMAT, "no data line found")),
        [_, extra, ..] => {
            return Err(ParseError::format_at(
                FORMAT,
                extra.number,
                format!("expected exactly one data line, found {}", lines.len()),
            ))
        }
    };

    // 第一个 token 不是数值时视为文件名标签
    let (name, start) = if line.is_numeric(0) {
        (None, 0)
    } else {
        (Some(line.tokens[0].to_string()), 1)
    };

    let values = line.len() - start;
    if values != 3 {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            format!("expected 3 numeric values, found {}", values),
        ));
    }

    let d = line.diameters_from(start, FORMAT)?;
    Ok(ResSummary {
        name,
        largest_included_sphere: d[0],
        largest_free_sphere: d[1],
        largest_included_sphere_along_free_path: d[2],
    })
}
