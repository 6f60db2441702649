//! # 行/Token 扫描器
//!
//! 所有格式解析器共用的分行、分词与数值解码。
//!
//! - 保持原始行序，丢弃空行与纯空白行
//! - 按空白分词，不截断 token
//! - 所有解析器都通过这里的 `parse_float` / `parse_int` / `parse_count`
//!   解码数值，保证同一文本在不同格式中得到相同精度
//!
//! ## 依赖关系
//! - 被 `parsers/` 下所有格式解析器使用
//! - 使用 `error.rs` 的 `ParseError`

use crate::error::ParseError;
use crate::models::OutputKind;

/// 一个非空行
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// 行号（1 起始，按原始文本计）
    pub number: usize,
    /// 原始行文本（已去除行尾换行）
    pub raw: &'a str,
    /// 空白分隔的 token
    pub tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).copied()
    }

    /// 第 `idx` 个 token 是否能解码为浮点数
    pub fn is_numeric(&self, idx: usize) -> bool {
        self.token(idx).and_then(parse_float).is_some()
    }

    /// 把第 `idx` 个 token 解码为浮点数
    pub fn float(&self, idx: usize, format: OutputKind) -> Result<f64, ParseError> {
        let token = self.require(idx, format)?;
        parse_float(token).ok_or_else(|| self.malformed(token, format))
    }

    /// 把第 `idx` 个 token 解码为整数
    pub fn int(&self, idx: usize, format: OutputKind) -> Result<i64, ParseError> {
        let token = self.require(idx, format)?;
        parse_int(token).ok_or_else(|| self.malformed(token, format))
    }

    /// 把第 `idx` 个 token 解码为非负计数
    pub fn count(&self, idx: usize, format: OutputKind) -> Result<u64, ParseError> {
        let token = self.require(idx, format)?;
        parse_count(token).ok_or_else(|| self.malformed(token, format))
    }

    /// 从 `start` 开始的所有 token 解码为浮点数
    pub fn floats_from(&self, start: usize, format: OutputKind) -> Result<Vec<f64>, ParseError> {
        (start..self.len()).map(|i| self.float(i, format)).collect()
    }

    /// 从 `start` 开始的所有 token 解码为直径（有限且非负）
    pub fn diameters_from(&self, start: usize, format: OutputKind) -> Result<Vec<f64>, ParseError> {
        let diameters = self.floats_from(start, format)?;
        if let Some(d) = diameters.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(ParseError::format_at(
                format,
                self.number,
                format!("diameter must be a finite, non-negative number, found {}", d),
            ));
        }
        Ok(diameters)
    }

    pub fn malformed(&self, token: &str, format: OutputKind) -> ParseError {
        ParseError::MalformedLine {
            format,
            line: self.number,
            token: token.to_string(),
            text: self.raw.trim().to_string(),
        }
    }

    fn require(&self, idx: usize, format: OutputKind) -> Result<&'a str, ParseError> {
        self.token(idx).ok_or_else(|| {
            ParseError::format_at(
                format,
                self.number,
                format!("expected at least {} tokens, found {}", idx + 1, self.len()),
            )
        })
    }
}

/// 分行并分词，丢弃空行
pub fn scan(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if tokens.is_empty() {
                None
            } else {
                Some(Line {
                    number: i + 1,
                    raw,
                    tokens,
                })
            }
        })
        .collect()
}

/// 规范浮点解码
///
/// 接受 Rust 标准语法（含 `nan`, `-nan`, `inf`），以及 Fortran 风格的
/// `D` 指数 (`1.0D-3`)。
pub fn parse_float(token: &str) -> Option<f64> {
    if let Ok(v) = token.parse::<f64>() {
        return Some(v);
    }
    if token.contains(['d', 'D']) {
        let normalized = token.replace(['d', 'D'], "e");
        // "nan" 等单词不应在替换后被接受
        if normalized.chars().any(|c| c.is_ascii_digit()) {
            return normalized.parse::<f64>().ok();
        }
    }
    None
}

/// 规范整数解码
pub fn parse_int(token: &str) -> Option<i64> {
    token.strip_prefix('+').unwrap_or(token).parse::<i64>().ok()
}

/// 计数解码：非负整数，或数值为整数的浮点写法 (`25.0`, `1e3`)
pub fn parse_count(token: &str) -> Option<u64> {
    if let Ok(v) = token.strip_prefix('+').unwrap_or(token).parse::<u64>() {
        return Some(v);
    }
    let v = parse_float(token)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}
