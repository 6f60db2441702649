//! # zeoparse - Zeo++ 孔道几何输出解析库
//!
//! 解析 Zeo++ `network` 程序写出的文本结果，转换为带类型的记录：
//!
//! | 扩展名       | 内容                     | 解析器            |
//! |--------------|--------------------------|-------------------|
//! | `.chan`      | 通道编号、维度、直径     | `parsers::chan`   |
//! | `.sa`        | 可及/不可及表面积        | `parsers::sa`     |
//! | `.vol`       | 可及/不可及体积          | `parsers::vol`    |
//! | `.volpo`     | 探针可占据体积           | `parsers::vol`    |
//! | `.psd_histo` | 孔径分布直方图           | `parsers::psd`    |
//! | `.res`       | 最大内含球/自由球直径    | `parsers::res`    |
//!
//! 另外提供 `compare` 模块，用容差比较两次运行的输出。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/   (格式解析器，纯函数)
//!   │     └── scan.rs, keyword.rs (共享扫描器)
//!   ├── models/    (数据模型)
//!   ├── compare.rs (容差比较)
//!   └── error.rs   (错误处理)
//! ```

pub mod compare;
pub mod error;
pub mod models;
pub mod parsers;

pub use compare::{compare_outputs, Comparison, Metric, Tolerance};
pub use error::{ParseError, Result, ZeoError};
pub use models::OutputKind;
pub use parsers::{parse_output, parse_output_file, parse_output_with, ParseOptions, ParsedOutput};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chan_two_entries() {
        let parsed = parse_output(OutputKind::Chan, "1 1 3.5\n2 2 4.1 4.3\n").unwrap();
        let ParsedOutput::Channels(record) = parsed else {
            panic!("expected channels");
        };
        assert_eq!(record.len(), 2);
        assert_eq!(record.channels[1].diameters, vec![4.1, 4.3]);
    }

    #[test]
    fn test_psd_bins_and_counts() {
        let parsed = parse_output(OutputKind::PoreSizeDist, "1.0 10\n1.5 25\n2.0 5\n").unwrap();
        let ParsedOutput::PoreSizeDist(dist) = parsed else {
            panic!("expected a pore size distribution");
        };
        assert_eq!(dist.bins(), &[1.0, 1.5, 2.0]);
        assert_eq!(dist.counts(), &[10, 25, 5]);
        assert_eq!(dist.bins().len(), dist.counts().len());
    }

    #[test]
    fn test_res_line() {
        let parsed = parse_output(OutputKind::Res, "EDI.res 3.2 2.8 3.0\n").unwrap();
        let ParsedOutput::Res(res) = parsed else {
            panic!("expected a res summary");
        };
        let value = serde_json::to_value(ResDiameters::from(&res)).unwrap();
        assert_eq!(
            value,
            json!({
                "largest_included_sphere": 3.2,
                "largest_free_sphere": 2.8,
                "largest_included_sphere_along_free_path": 3.0
            })
        );
    }

    #[test]
    fn test_sa_blob() {
        let parsed = parse_output(OutputKind::SurfaceArea, "ASA_A^2: 120.5 NASA_A^2: 0.0\n").unwrap();
        let ParsedOutput::SurfaceArea(sa) = parsed else {
            panic!("expected a surface area record");
        };
        assert_eq!(
            serde_json::to_value(sa.to_map()).unwrap(),
            json!({"ASA_A^2": 120.5, "NASA_A^2": 0.0})
        );
    }

    #[test]
    fn test_unknown_label_is_kept() {
        let text = "@ EDI.vol Unitcell_volume: 307.484 AV_A^3: 22.6 Future_metric_X: 7.5\n";
        let parsed = parse_output(OutputKind::Volume, text).unwrap();
        let ParsedOutput::Volume(vol) = parsed else {
            panic!("expected a volume record");
        };
        assert_eq!(vol.get("Future_metric_X"), Some(7.5));
        assert_eq!(vol.get("AV_A^3"), Some(22.6));
    }

    #[test]
    fn test_errors_are_classified() {
        assert!(parse_output(OutputKind::Res, "EDI.res 3.2 2.8\n")
            .unwrap_err()
            .is_format());
        assert!(parse_output(OutputKind::Chan, "1 x 3.5\n")
            .unwrap_err()
            .is_malformed_line());
    }

    #[derive(serde::Serialize)]
    struct ResDiameters {
        largest_included_sphere: f64,
        largest_free_sphere: f64,
        largest_included_sphere_along_free_path: f64,
    }

    impl From<&models::ResSummary> for ResDiameters {
        fn from(res: &models::ResSummary) -> Self {
            ResDiameters {
                largest_included_sphere: res.largest_included_sphere,
                largest_free_sphere: res.largest_free_sphere,
                largest_included_sphere_along_free_path: res.largest_included_sphere_along_free_path,
            }
        }
    }
}
