//! # 批量处理模块
//!
//! 收集目录中的 Zeo++ 输出文件并并行解析。
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
