//! # .res 数据模型
//!
//! 三个特征球直径 (Å)。
//!
//! ## 依赖关系
//! - 被 `parsers/res.rs` 生成
//! - 被 `compare.rs` 和 `commands/` 使用

use serde::{Deserialize, Serialize};

/// `.res` 汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResSummary {
    /// 行首的文件名标签（如 `EDI.res`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 最大内含球直径 Di
    pub largest_included_sphere: f64,

    /// 最大自由球直径 Df
    pub largest_free_sphere: f64,

    /// 沿自由球路径的最大内含球直径 Dif
    pub largest_included_sphere_along_free_path: f64,
}

impl ResSummary {
    pub fn new(included: f64, free: f64, included_along_free: f64) -> Self {
        ResSummary {
            name: None,
            largest_included_sphere: included,
            largest_free_sphere: free,
            largest_included_sphere_along_free_path: included_along_free,
        }
    }

    /// Di >= Df 且 Di >= Dif
    pub fn is_physically_ordered(&self) -> bool {
        self.largest_included_sphere >= self.largest_free_sphere
            && self.largest_included_sphere >= self.largest_included_sphere_along_free_path
    }

    /// (Di, Df, Dif)
    pub fn diameters(&self) -> [f64; 3] {
        [
            self.largest_included_sphere,
            self.largest_free_sphere,
            self.largest_included_sphere_along_free_path,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_ordering() {
        assert!(ResSummary::new(13.19937, 6.74621, 13.19937).is_physically_ordered());
        assert!(!ResSummary::new(2.8, 3.2, 2.8).is_physically_ordered());
    }
}
