//! # Zeo++ .chan 通道解析器
//!
//! `network -chan <probe_r> <file>` 的输出。
//!
//! ## .chan 格式说明
//! ```text
//! EDI.chan   2 channels identified of dimensionality 3 3
//! Channel  0  9.92223  3.85084  9.92223
//! Channel  1  9.92222  3.85084  9.92222
//! EDI.chan summary(Max_of_columns_above)   9.92223 3.85084  9.92223  probe_rad: 1.8  probe_diam: 3.6
//! ```
//!
//! 也接受无文件头的简写形式，每行 `编号 维度 直径...`：
//! ```text
//! 1 1 3.5
//! 2 2 4.1 4.3
//! ```
//!
//! 直径列数不固定，多出的列按顺序全部保留。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/scan.rs`, `parsers/keyword.rs`, `models/channel.rs`

use super::keyword::{self, MissingValue};
use super::scan::{self, Line};
use crate::error::ParseError;
use crate::models::{Channel, ChannelRecord, ChannelSummary, OutputKind};

use regex::Regex;
use std::sync::OnceLock;

const FORMAT: OutputKind = OutputKind::Chan;

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"(\d+) channels identified of dimensionality([\d\s]*)").unwrap()
    })
}

/// 解析 .chan 内容
pub fn parse(content: &str) -> Result<ChannelRecord, ParseError> {
    let lines = scan::scan(content);
    let mut record = ChannelRecord::default();
    let mut declared_dims: Option<Vec<u8>> = None;

    for (pos, line) in lines.iter().enumerate() {
        if let Some(caps) = header_regex().captures(line.raw) {
            if pos != 0 {
                return Err(ParseError::format_at(
                    FORMAT,
                    line.number,
                    "channel header must be the first line",
                ));
            }
            let dims = parse_header(line, &caps[1], &caps[2])?;
            record.declared_count = Some(dims.len());
            declared_dims = Some(dims);
            continue;
        }

        if let Some(idx) = line.tokens.iter().position(|t| t.starts_with("summary")) {
            if record.summary.is_some() {
                return Err(ParseError::format_at(
                    FORMAT,
                    line.number,
                    "more than one summary line",
                ));
            }
            record.summary = Some(parse_summary(line, idx)?);
            continue;
        }

        if record.summary.is_some() {
            return Err(ParseError::format_at(
                FORMAT,
                line.number,
                "channel entry after the summary line",
            ));
        }

        let channel = if line.tokens[0].eq_ignore_ascii_case("Channel") {
            let position = record.channels.len();
            let dimensionality = declared_dims
                .as_ref()
                .and_then(|dims| dims.get(position).copied())
                .ok_or_else(|| {
                    ParseError::format_at(
                        FORMAT,
                        line.number,
                        format!("no dimensionality declared for channel #{}", position + 1),
                    )
                })?;
            parse_labelled_entry(line, dimensionality)?
        } else {
            parse_bare_entry(line)?
        };
        record.channels.push(channel);
    }

    if let Some(declared) = record.declared_count {
        if declared != record.channels.len() {
            return Err(ParseError::format(
                FORMAT,
                format!(
                    "header declares {} channels, found {}",
                    declared,
                    record.channels.len()
                ),
            ));
        }
    }

    Ok(record)
}

/// 文件头：`N channels identified of dimensionality d1 d2 ...`
fn parse_header(line: &Line, count: &str, dims: &str) -> Result<Vec<u8>, ParseError> {
    let count: usize = count.parse().map_err(|_| line.malformed(count, FORMAT))?;

    let dims = dims
        .split_whitespace()
        .map(|token| {
            let dim: u8 = token.parse().map_err(|_| line.malformed(token, FORMAT))?;
            check_dimensionality(dim, line)
        })
        .collect::<Result<Vec<u8>, ParseError>>()?;

    if dims.len() != count {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            format!(
                "header declares {} channels but lists {} dimensionalities",
                count,
                dims.len()
            ),
        ));
    }

    Ok(dims)
}

/// `Channel <编号> <直径>...`，维度来自文件头
fn parse_labelled_entry(line: &Line, dimensionality: u8) -> Result<Channel, ParseError> {
    if line.len() < 2 {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            "channel line has no index",
        ));
    }
    let index = parse_index(line, 1)?;
    let diameters = line.diameters_from(2, FORMAT)?;
    Ok(Channel::new(index, dimensionality, diameters))
}

/// `<编号> <维度> <直径>...`
fn parse_bare_entry(line: &Line) -> Result<Channel, ParseError> {
    if line.len() < 2 {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            format!(
                "channel line needs an index and a dimensionality, found {} token(s)",
                line.len()
            ),
        ));
    }
    let index = parse_index(line, 0)?;
    let dim = line.int(1, FORMAT)?;
    let dim = u8::try_from(dim).map_err(|_| dimensionality_error(dim, line))?;
    let dimensionality = check_dimensionality(dim, line)?;
    let diameters = line.diameters_from(2, FORMAT)?;
    Ok(Channel::new(index, dimensionality, diameters))
}

fn parse_index(line: &Line, idx: usize) -> Result<usize, ParseError> {
    let index = line.int(idx, FORMAT)?;
    usize::try_from(index).map_err(|_| {
        ParseError::format_at(
            FORMAT,
            line.number,
            format!("channel index must be non-negative, found {}", index),
        )
    })
}

fn check_dimensionality(dim: u8, line: &Line) -> Result<u8, ParseError> {
    if dim > 3 {
        return Err(dimensionality_error(dim as i64, line));
    }
    Ok(dim)
}

fn dimensionality_error(dim: i64, line: &Line) -> ParseError {
    ParseError::format_at(
        FORMAT,
        line.number,
        format!("dimensionality must be between 0 and 3, found {}", dim),
    )
}

/// `<name> summary(Max_of_columns_above) Di Df Dif [probe_rad: r] [probe_diam: d]`
fn parse_summary(line: &Line, idx: usize) -> Result<ChannelSummary, ParseError> {
    if line.len() < idx + 4 {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            "summary line needs three column maxima",
        ));
    }

    let mut summary = ChannelSummary {
        largest_included_sphere: line.float(idx + 1, FORMAT)?,
        largest_free_sphere: line.float(idx + 2, FORMAT)?,
        largest_included_free_sphere: line.float(idx + 3, FORMAT)?,
        probe_radius: None,
        probe_diameter: None,
    };

    let rest = line.tokens[idx + 4..].join(" ");
    if !rest.is_empty() {
        let pairs = keyword::scan_pairs(&rest, &[], FORMAT, MissingValue::Reject).map_err(
            |e| match e {
                ParseError::Format { reason, .. } => {
                    ParseError::format_at(FORMAT, line.number, reason)
                }
                other => other,
            },
        )?;
        for pair in pairs {
            match pair.label.as_str() {
                "probe_rad" => summary.probe_radius = Some(pair.value),
                "probe_diam" => summary.probe_diameter = Some(pair.value),
                _ => {}
            }
        }
    }

    Ok(summary)
}
