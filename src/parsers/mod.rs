//! # 解析器模块
//!
//! 提供 coreutils 摘要文件的解析器。
//!
//! ## 依赖关系
//! - 被 `batch/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: digest

pub mod digest;

pub use digest::{parse_line, DigestReader, LineEnding};
