//! # Zeo++ .psd_histo 孔径分布解析器
//!
//! `network -psd <chan_r> <probe_r> <samples> <file>` 的输出。
//!
//! ## .psd_histo 格式说明
//! ```text
//! Pore size distribution histogram
//! Bin size (A): 0.1
//! Number of bins: 1000
//! From: 0
//! To: 100
//! Total samples: 50000
//! Accessible samples: 3712
//! Fraction of sample points in node spheres: 0.51
//! Fraction of sample points outside node spheres: 0.49
//!
//! Bin Count Cum_Dist Derivative_Dist
//! 0 0 1 -0
//! 0.1 0 1 -0
//! ...
//! ```
//!
//! 也接受只有 `bin count` 两列的数据。首个 token 不是数值的行视为文件头，
//! 数据段开始后再出现这种行则报错。bin 不重新排序。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/scan.rs`, `models/distribution.rs`

use super::scan::{self, parse_count, parse_float, Line};
use crate::error::ParseError;
use crate::models::{OutputKind, PoreSizeDistribution, PsdHeader};

const FORMAT: OutputKind = OutputKind::PoreSizeDist;

/// 数据段表头标记
const DATA_HEADER: &str = "Bin Count";

/// 解析 .psd_histo 内容
pub fn parse(content: &str) -> Result<PoreSizeDistribution, ParseError> {
    let mut dist = PoreSizeDistribution::default();
    let mut in_data = false;
    let mut columns: Option<usize> = None;

    for line in scan::scan(content) {
        if line.raw.contains(DATA_HEADER) {
            if columns.is_some() {
                return Err(ParseError::format_at(
                    FORMAT,
                    line.number,
                    "histogram header inside the data section",
                ));
            }
            in_data = true;
            continue;
        }

        if !line.is_numeric(0) {
            if in_data {
                return Err(ParseError::format_at(
                    FORMAT,
                    line.number,
                    format!("expected a bin value, found '{}'", line.tokens[0]),
                ));
            }
            parse_header_line(&line, &mut dist.header);
            continue;
        }

        in_data = true;
        let n = line.len();
        if !(2..=4).contains(&n) {
            return Err(ParseError::format_at(
                FORMAT,
                line.number,
                format!("histogram row needs 2 to 4 columns, found {}", n),
            ));
        }
        match columns {
            None => columns = Some(n),
            Some(expected) if expected != n => {
                return Err(ParseError::format_at(
                    FORMAT,
                    line.number,
                    format!("histogram row has {} columns, previous rows have {}", n, expected),
                ));
            }
            Some(_) => {}
        }

        push_row(&line, &mut dist)?;
    }

    if columns.is_none() {
        return Err(ParseError::format(FORMAT, "no histogram rows found"));
    }

    Ok(dist)
}

fn push_row(line: &Line, dist: &mut PoreSizeDistribution) -> Result<(), ParseError> {
    let bin = line.float(0, FORMAT)?;
    if !bin.is_finite() {
        return Err(ParseError::format_at(
            FORMAT,
            line.number,
            format!("bin value must be finite, found {}", bin),
        ));
    }
    let psd = &mut dist.psd;
    psd.bins.push(bin);
    psd.counts.push(line.count(1, FORMAT)?);
    if line.len() >= 3 {
        psd.cumulatives.push(clean(line.float(2, FORMAT)?));
    }
    if line.len() >= 4 {
        psd.derivatives.push(clean(line.float(3, FORMAT)?));
    }
    Ok(())
}

/// 计数为 0 时 Zeo++ 会写出 nan / -nan，这里统一记为 0
fn clean(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 文件头中的 "标签: 数值" 行，一行可含多对（`From: 0 To: 100`）。
/// 标签可以含空格；没有冒号的行（标题、说明）忽略
fn parse_header_line(line: &Line, header: &mut PsdHeader) {
    let mut segments = line.raw.split(':');
    let mut label = segments.next().unwrap_or_default().trim();

    for segment in segments {
        let segment = segment.trim_start();
        let (value, rest) = segment
            .split_once(char::is_whitespace)
            .unwrap_or((segment, ""));
        if !label.is_empty() && !value.is_empty() {
            record_header_field(label, value, header);
        }
        label = rest.trim();
    }
}

fn record_header_field(label: &str, value: &str, header: &mut PsdHeader) {
    match normalize(label).as_str() {
        "binsizea" | "binsize" => {
            if let Some(v) = parse_float(value) {
                header.bin_size = Some(v);
                return;
            }
        }
        "numberofbins" => {
            if let Some(v) = parse_count(value) {
                header.number_of_bins = Some(v);
                return;
            }
        }
        "totalsamples" => {
            if let Some(v) = parse_count(value) {
                header.total_samples = Some(v);
                return;
            }
        }
        "accessiblesamples" => {
            if let Some(v) = parse_count(value) {
                header.accessible_samples = Some(v);
                return;
            }
        }
        _ => {}
    }

    if let Some(v) = parse_float(value) {
        header.extra.insert(label.to_string(), v);
    }
}

/// 小写并去除非字母数字字符
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 检查 bin 严格递增
pub fn check_ascending(dist: &PoreSizeDistribution) -> Result<(), ParseError> {
    match dist.psd.first_non_ascending() {
        None => Ok(()),
        Some(i) => Err(ParseError::format(
            FORMAT,
            format!(
                "bin #{} ({}) is not greater than the previous bin ({})",
                i + 1,
                dist.psd.bins[i],
                dist.psd.bins[i - 1]
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDI_PSD: &str = r#"Pore size distribution histogram
Bin size (A): 0.1
Number of bins: 5
From: 0
To: 0.5
Total samples: 50000
Accessible samples: 3712
Fraction of sample points in node spheres: 0.51
Fraction of sample points outside node spheres: 0.49

Bin Count Cum_Dist Derivative_Dist
0 0 1 -0
0.1 0 1 -0
0.2 12 0.99 0.03
0.3 3700 0.0 -nan
0.4 0 0 nan
"#;

    #[test]
    fn test_parse_psd_two_columns() {
        let dist = parse("1.0 10\n1.5 25\n2.0 5\n").unwrap();
        assert_eq!(dist.bins(), &[1.0, 1.5, 2.0]);
        assert_eq!(dist.counts(), &[10, 25, 5]);
        assert!(dist.psd.cumulatives.is_empty());
        assert!(dist.header.is_empty());
    }

    #[test]
    fn test_parse_psd_zeopp() {
        let dist = parse(EDI_PSD).unwrap();
        assert_eq!(dist.psd.len(), 5);
        assert_eq!(dist.psd.counts.len(), dist.psd.bins.len());
        assert_eq!(dist.counts(), &[0, 0, 12, 3700, 0]);
        assert_eq!(dist.psd.cumulatives, vec![1.0, 1.0, 0.99, 0.0, 0.0]);
        assert_eq!(dist.psd.derivatives[2], 0.03);
        assert_eq!(dist.psd.derivatives[3], 0.0);
        assert_eq!(dist.psd.derivatives[4], 0.0);

        assert_eq!(dist.header.bin_size, Some(0.1));
        assert_eq!(dist.header.number_of_bins, Some(5));
        assert_eq!(dist.header.total_samples, Some(50000));
        assert_eq!(dist.header.accessible_samples, Some(3712));
        assert_eq!(dist.header.extra.get("To"), Some(&0.5));
        assert_eq!(
            dist.header
                .extra
                .get("Fraction of sample points in node spheres"),
            Some(&0.51)
        );
        assert!(check_ascending(&dist).is_ok());
    }

    #[test]
    fn test_parse_psd_does_not_sort() {
        let dist = parse("2.0 1\n1.0 2\n").unwrap();
        assert_eq!(dist.bins(), &[2.0, 1.0]);
        assert!(check_ascending(&dist).unwrap_err().is_format());
    }

    #[test]
    fn test_parse_psd_text_inside_data() {
        let err = parse("1.0 10\nfoo 25\n").unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.line(), Some(2));

        let err = parse("Bin Count\nfoo 25\n").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_parse_psd_rejects_non_finite_bin() {
        let err = parse("1.0 1\nnan 2\n0.5 3\n").unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.line(), Some(2));
        assert!(parse("inf 1\n").unwrap_err().is_format());
    }

    #[test]
    fn test_header_line_with_several_fields() {
        let dist = parse("From: 0 To: 100\nBin size (A): 0.5 Total samples: 200\n0 1\n").unwrap();
        assert_eq!(dist.header.extra.get("From"), Some(&0.0));
        assert_eq!(dist.header.extra.get("To"), Some(&100.0));
        assert_eq!(dist.header.bin_size, Some(0.5));
        assert_eq!(dist.header.total_samples, Some(200));
    }

    #[test]
    fn test_parse_psd_bad_count() {
        let err = parse("1.0 ten\n").unwrap_err();
        assert!(err.is_malformed_line());
    }

    #[test]
    fn test_parse_psd_column_checks() {
        assert!(parse("1.0\n").unwrap_err().is_format());
        assert!(parse("1.0 1 2 3 4\n").unwrap_err().is_format());
        assert!(parse("1.0 1 0.5\n1.5 2\n").unwrap_err().is_format());
    }

    #[test]
    fn test_parse_psd_without_rows() {
        assert!(parse("").unwrap_err().is_format());
        assert!(parse("Pore size distribution histogram\nBin Count\n")
            .unwrap_err()
            .is_format());
    }

    #[test]
    fn test_parse_psd_is_deterministic() {
        assert_eq!(parse(EDI_PSD).unwrap(), parse(EDI_PSD).unwrap());
    }
}
