//! # 文件收集器
//!
//! 在目录中收集待解析的 Zeo++ 输出文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式
//! - 递归目录搜索
//! - 结果按路径排序，保证输出顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use zeoparse::{Result, ZeoError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<Pattern>,
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式），空模式匹配所有文件
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    ZeoError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(ZeoError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zeoparse-collector-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        for file in ["EDI.sa", "EDI.res", "EDI.cssr", "nested/MFI.psd_histo"] {
            fs::write(dir.join(file), "").unwrap();
        }
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_collect_with_patterns() {
        let dir = fixture_dir("patterns");
        let files = FileCollector::new(dir.clone())
            .with_pattern("*.sa, *.res,*.psd_histo")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(names(&files), vec!["EDI.res", "EDI.sa"]);

        let files = FileCollector::new(dir)
            .with_pattern("*.sa,*.res,*.psd_histo")
            .unwrap()
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(PathBuf::from(".")).with_pattern("[");
        assert!(matches!(result, Err(ZeoError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_directory() {
        let result = FileCollector::new(PathBuf::from("/nonexistent/zeoparse")).collect();
        assert!(matches!(result, Err(ZeoError::DirectoryNotFound { .. })));
    }
}
