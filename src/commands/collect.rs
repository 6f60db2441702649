//! # collect 命令实现
//!
//! 并行解析目录中的 Zeo++ 输出，把所有指标写入一个长格式 CSV：
//!
//! ```text
//! file,kind,metric,value
//! EDI.sa,sa,ASA_A^2,60.7713
//! EDI.res,res,largest_included_sphere,4.89082
//! ```
//!
//! 单个文件解析失败不会中断整个批次，失败列表在最后汇总打印。
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/` 收集文件并并行解析
//! - 使用 `csv` 写出结果

use super::format_value;
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::collect::CollectArgs;
use crate::utils::output;
use zeoparse::compare::{metrics, Metric};
use zeoparse::parsers::detect_kind;
use zeoparse::{parse_output_file, OutputKind, ParseOptions, Result, ZeoError};

use std::fs;
use std::path::{Path, PathBuf};

/// 一个文件的解析结果
#[derive(Debug)]
pub struct CollectedFile {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub metrics: Vec<Metric>,
}

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting Zeo++ Outputs");

    let files = FileCollector::new(args.dir.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        return Err(ZeoError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Found {} files, parsing with {} jobs",
        files.len(),
        runner.jobs()
    ));

    let options = ParseOptions {
        lenient: args.lenient,
        strict: false,
    };
    let result = runner.run(&files, |file| process_file(file, options))?;

    let rows = write_metrics_csv(&result.outputs, &args.dir, &args.output)?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} parsed, {} skipped, {} failed",
        result.total(),
        result.success(),
        result.skipped,
        result.failed()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    output::print_success(&format!(
        "Wrote {} metrics to {}",
        rows,
        args.output.display()
    ));
    Ok(())
}

/// 解析单个文件，空文件跳过
fn process_file(path: &PathBuf, options: ParseOptions) -> ProcessResult<CollectedFile> {
    let failed = |e: ZeoError| {
        log::warn!("{}: {}", path.display(), e);
        ProcessResult::Failed(
            path.display().to_string(),
            format!("{:#}", anyhow::Error::from(e)),
        )
    };

    let kind = match detect_kind(path) {
        Ok(kind) => kind,
        Err(e) => return failed(e),
    };

    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => {
            return ProcessResult::Skipped(format!("Empty file: {}", path.display()));
        }
        Ok(_) => {}
        Err(e) => {
            return failed(ZeoError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })
        }
    }

    match parse_output_file(path, Some(kind), options) {
        Ok(parsed) => ProcessResult::Success(CollectedFile {
            path: path.clone(),
            kind,
            metrics: metrics(&parsed),
        }),
        Err(e) => failed(e),
    }
}

/// 写出长格式 CSV，返回数据行数。文件路径相对于输入目录
pub fn write_metrics_csv(files: &[CollectedFile], root: &Path, output_path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(["file", "kind", "metric", "value"])?;

    let mut rows = 0;
    for file in files {
        let name = file
            .path
            .strip_prefix(root)
            .unwrap_or(&file.path)
            .display()
            .to_string();
        let kind = file.kind.to_string();
        for metric in &file.metrics {
            wtr.write_record([
                name.as_str(),
                kind.as_str(),
                metric.key.as_str(),
                format_value(metric).as_str(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush().map_err(|e| ZeoError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zeoparse-collect-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_process_file_outcomes() {
        let dir = workspace("outcomes");
        let good = dir.join("EDI.res");
        let bad = dir.join("broken.res");
        let empty = dir.join("empty.sa");
        fs::write(&good, "EDI.res 4.89082 3.03868 4.89082\n").unwrap();
        fs::write(&bad, "broken.res 4.8\n").unwrap();
        fs::write(&empty, "").unwrap();

        let options = ParseOptions::default();
        match process_file(&good, options) {
            ProcessResult::Success(file) => {
                assert_eq!(file.kind, OutputKind::Res);
                assert_eq!(file.metrics.len(), 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match process_file(&bad, options) {
            ProcessResult::Failed(path, err) => {
                assert!(path.ends_with("broken.res"));
                assert!(err.contains("expected 3 numeric values"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            process_file(&empty, options),
            ProcessResult::Skipped(_)
        ));
    }

    #[test]
    fn test_write_metrics_csv() {
        let dir = workspace("csv");
        let files = vec![CollectedFile {
            path: dir.join("EDI.res"),
            kind: OutputKind::Res,
            metrics: vec![Metric {
                key: "largest_free_sphere".to_string(),
                value: 3.03868,
                exact: false,
            }],
        }];
        let out = dir.join("metrics.csv");

        let rows = write_metrics_csv(&files, &dir, &out).unwrap();
        assert_eq!(rows, 1);
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "file,kind,metric,value\nEDI.res,res,largest_free_sphere,3.03868\n"
        );
    }
}
