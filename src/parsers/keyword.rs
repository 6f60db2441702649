//! # "标签: 数值" 扫描器
//!
//! `.sa`, `.vol`, `.volpo` 共用。标签与数值可以跨行，例如
//!
//! ```text
//! @ HKUST-1.sa Unitcell_volume: 18280.8   Density: 0.879097   ASA_A^2:
//! 3545.59 ASA_m^2/cm^3: 1939.51
//! ```
//!
//! 规则：
//! - 以 `:` 结尾的 token，或与词表中标签相同（忽略大小写）的 token 视为标签
//! - 标签后的下一个 token 必须是数值
//! - 其余 token（`@`、文件名）跳过
//! - 未知标签原样保留，已知标签统一为词表中的写法
//!
//! ## 依赖关系
//! - 被 `parsers/sa.rs`, `parsers/vol.rs` 使用
//! - 使用 `parsers/scan.rs` 的规范数值解码

use super::scan::{self, parse_float, parse_int};
use crate::error::ParseError;
use crate::models::porosity::find_keyword;
use crate::models::{Keyword, OutputKind, ValueKind};

/// 标签后缺少数值时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingValue {
    /// 报 `FormatError`
    #[default]
    Reject,
    /// 记为 0（Zeo++ 在没有 pocket 时会写出空的 `Pocket_surface_area_A^2:`）
    Zero,
}

/// 一个标签/数值对
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub label: String,
    pub value: f64,
    /// 标签所在行号
    pub line: usize,
    /// 是否为词表中的已知标签
    pub known: bool,
}

struct Token<'a> {
    text: &'a str,
    line: usize,
}

/// 扫描文本中的所有标签/数值对，保持出现顺序
pub fn scan_pairs(
    text: &str,
    vocabulary: &[Keyword],
    format: OutputKind,
    missing: MissingValue,
) -> Result<Vec<Pair>, ParseError> {
    let tokens: Vec<Token> = scan::scan(text)
        .into_iter()
        .flat_map(|line| {
            let number = line.number;
            line.tokens
                .into_iter()
                .map(move |t| Token { text: t, line: number })
        })
        .collect();

    let mut pairs = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        // "Density:1.62" 这种标签与数值粘连的写法
        if let Some((label, raw, value)) = split_glued(token.text) {
            check_integral(label, raw, token.line, vocabulary, format)?;
            pairs.push(make_pair(label, value, token.line, vocabulary, format)?);
            i += 1;
            continue;
        }

        let Some(label) = as_label(token.text, vocabulary) else {
            i += 1;
            continue;
        };

        let next = tokens.get(i + 1);
        match next {
            Some(value_token) if as_label(value_token.text, vocabulary).is_none() => {
                let value = parse_float(value_token.text).ok_or_else(|| {
                    ParseError::format_at(
                        format,
                        value_token.line,
                        format!(
                            "label '{}' is followed by '{}', not a number",
                            label, value_token.text
                        ),
                    )
                })?;
                check_integral(label, value_token.text, value_token.line, vocabulary, format)?;
                pairs.push(make_pair(label, value, token.line, vocabulary, format)?);
                i += 2;
            }
            _ => {
                if missing == MissingValue::Reject {
                    return Err(ParseError::format_at(
                        format,
                        token.line,
                        format!("label '{}' has no value", label),
                    ));
                }
                pairs.push(make_pair(label, 0.0, token.line, vocabulary, format)?);
                i += 1;
            }
        }
    }

    if pairs.is_empty() {
        return Err(ParseError::format(format, "no label/value pairs found"));
    }

    Ok(pairs)
}

/// 判断 token 是否为标签，返回去掉冒号后的标签文本
fn as_label<'a>(token: &'a str, vocabulary: &[Keyword]) -> Option<&'a str> {
    if let Some(label) = token.strip_suffix(':') {
        let label = label.trim_end_matches(':');
        if !label.is_empty() {
            return Some(label);
        }
        return None;
    }
    find_keyword(vocabulary, token).map(|_| token)
}

/// 返回 (标签, 数值原文, 数值)
fn split_glued(token: &str) -> Option<(&str, &str, f64)> {
    let (label, value) = token.rsplit_once(':')?;
    if label.is_empty() || value.is_empty() {
        return None;
    }
    parse_float(value).map(|v| (label, value, v))
}

/// 整数标签的取值必须是能放入 `u32` 的整数

fn check_integral(
    label: &str,
    token: &str,
    line: usize,
    vocabulary: &[Keyword],
    format: OutputKind,
) -> Result<(), ParseError> {
    let is_int = find_keyword(vocabulary, label)
        .map(|idx| vocabulary[idx].kind == ValueKind::Int)
        .unwrap_or(false);
    if is_int && parse_int(token).and_then(|n| u32::try_from(n).ok()).is_none() {
        return Err(ParseError::format_at(
            format,
            line,
            format!("label '{}' expects a 32-bit unsigned integer, found '{}'", label, token),
        ));
    }
    Ok(())
}

fn make_pair(
    label: &str,
    value: f64,
    line: usize,
    vocabulary: &[Keyword],
    format: OutputKind,
) -> Result<Pair, ParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::format_at(
            format,
            line,
            format!(
                "label '{}' must be a finite, non-negative number, found {}",
                label, value
            ),
        ));
    }

    let known = find_keyword(vocabulary, label);
    let label = match known {
        Some(idx) => vocabulary[idx].label.to_string(),
        None => label.to_string(),
    };

    Ok(Pair {
        label,
        value,
        line,
        known: known.is_some(),
    })
}
