//! # 匹配文件数据模型
//!
//! glob 模式解析出的单个摘要文件。
//!
//! ## 依赖关系
//! - 由 `batch/resolver.rs` 创建
//! - 被 `batch/aggregator.rs` 消费

use std::path::{Path, PathBuf};

/// glob 匹配到的摘要文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    path: PathBuf,
    dir: PathBuf,
}

impl MatchedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        MatchedFile { path, dir }
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 所在目录（裸文件名为 `.`）
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl std::fmt::Display for MatchedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
