//! # 批量执行器
//!
//! 并行执行批量解析任务。每个文件独立解析，除进度条外无共享可变状态。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//! - 结果保持输入顺序
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;
use zeoparse::{Result, ZeoError};

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    Success(T),
    /// 跳过（原因）
    Skipped(String),
    /// 处理失败 (文件路径, 错误信息)
    Failed(String, String),
}

/// 批量处理结果
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功的结果，按输入顺序
    pub outputs: Vec<T>,
    pub skipped: usize,
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            outputs: Vec::new(),
            skipped: 0,
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(value) => self.outputs.push(value),
            ProcessResult::Skipped(reason) => {
                log::info!("skipped: {}", reason);
                self.skipped += 1;
            }
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.success() + self.skipped + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// `jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: &[PathBuf], processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Parsing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| ZeoError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_order_and_counts() {
        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{}.res", i))).collect();
        let runner = BatchRunner::new(4);

        let result = runner
            .run(&files, |path| {
                let stem: usize = path.file_stem().unwrap().to_str().unwrap().parse().unwrap();
                match stem % 5 {
                    0 => ProcessResult::Failed(path.display().to_string(), "bad".to_string()),
                    1 => ProcessResult::Skipped("empty".to_string()),
                    _ => ProcessResult::Success(stem),
                }
            })
            .unwrap();

        assert_eq!(result.total(), 20);
        assert_eq!(result.failed(), 4);
        assert_eq!(result.skipped, 4);
        assert_eq!(result.outputs, vec![2, 3, 4, 7, 8, 9, 12, 13, 14, 17, 18, 19]);
    }

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
    }
}
