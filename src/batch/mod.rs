//! # 批量处理模块
//!
//! 摘要文件的查找、变换与聚合。
//!
//! ## 功能
//! - glob 模式展开（支持 `**` 递归）
//! - 摘要行标记重写
//! - 单一输出 / 按目录输出的顺序聚合
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `glob` 展开模式，`tempfile` 原子写出

pub mod aggregator;
pub mod resolver;
pub mod transform;

pub use aggregator::{group_by_directory, write_atomic, DirectoryAggregator, FlatAggregator};
pub use resolver::PatternResolver;
pub use transform::LineTransformer;
