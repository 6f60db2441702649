//! # 统一错误处理模块
//!
//! 定义 zeoparse 的所有错误类型，使用 `thiserror` 派生。
//!
//! - [`ParseError`]: 解析器错误（纯函数层，只携带行号与原始文本）
//! - [`ZeoError`]: 应用层错误（文件读写、参数、导出等）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `models::OutputKind` 标注出错的文件格式

use crate::models::OutputKind;
use thiserror::Error;

/// 解析器错误
///
/// 解析器失败时不会返回部分结果，调用方拿到的只有这个错误值。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 期望为数值的 token 无法解码
    #[error("Malformed {format} line {line}: cannot decode '{token}' as a number\n  {text}")]
    MalformedLine {
        format: OutputKind,
        line: usize,
        token: String,
        text: String,
    },

    /// 结构性约束被破坏（token 数量、缺失标签、计数不符等）
    #[error("Invalid {format} format{}: {reason}", line_suffix(.line))]
    Format {
        format: OutputKind,
        line: Option<usize>,
        reason: String,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}

impl ParseError {
    pub fn format_at(format: OutputKind, line: usize, reason: impl Into<String>) -> Self {
        ParseError::Format {
            format,
            line: Some(line),
            reason: reason.into(),
        }
    }

    pub fn format(format: OutputKind, reason: impl Into<String>) -> Self {
        ParseError::Format {
            format,
            line: None,
            reason: reason.into(),
        }
    }

    /// 出错的行号（1 起始），若错误不对应单独一行则为 `None`
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedLine { line, .. } => Some(*line),
            ParseError::Format { line, .. } => *line,
        }
    }

    pub fn is_malformed_line(&self) -> bool {
        matches!(self, ParseError::MalformedLine { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, ParseError::Format { .. })
    }
}

/// zeoparse 应用层错误类型
#[derive(Error, Debug)]
pub enum ZeoError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {path}")]
    ParseFile {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 比较错误
    // ─────────────────────────────────────────────────────────────
    #[error("{mismatches} metric(s) differ between {actual} and {reference}")]
    ComparisonFailed {
        actual: String,
        reference: String,
        mismatches: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ZeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display_with_line() {
        let err = ParseError::format_at(OutputKind::Res, 3, "expected 3 numeric values, found 2");
        assert_eq!(
            err.to_string(),
            "Invalid res format at line 3: expected 3 numeric values, found 2"
        );
        assert_eq!(err.line(), Some(3));
        assert!(err.is_format());
    }

    #[test]
    fn test_format_error_display_without_line() {
        let err = ParseError::format(OutputKind::Chan, "declared 2 channels, found 1");
        assert_eq!(
            err.to_string(),
            "Invalid chan format: declared 2 channels, found 1"
        );
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_malformed_line_carries_context() {
        let err = ParseError::MalformedLine {
            format: OutputKind::Chan,
            line: 2,
            token: "x".to_string(),
            text: "2 x 4.1".to_string(),
        };
        assert!(err.is_malformed_line());
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("2 x 4.1"));
    }
}
