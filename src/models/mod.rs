//! # 数据模型模块
//!
//! 定义 Zeo++ 各类输出文件解析后的值类型。
//! 每个记录都由一次解析产生，归调用方所有，互不引用。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `compare.rs` 和 `commands/` 使用
//! - 子模块: kind, channel, porosity, distribution, res

pub mod channel;
pub mod distribution;
pub mod kind;
pub mod porosity;
pub mod res;

pub use channel::{Channel, ChannelRecord, ChannelSummary};
pub use distribution::{Histogram, PoreSizeDistribution, PsdHeader};
pub use kind::OutputKind;
pub use porosity::{AccessibleVolume, Keyword, SurfaceArea, ValueKind, VolumeMode};
pub use res::ResSummary;
