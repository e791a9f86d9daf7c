//! # 数据模型模块
//!
//! 定义摘要行与匹配文件的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`batch/` 和 `commands/` 使用
//! - 子模块: digest, matched

pub mod digest;
pub mod matched;

pub use digest::{DigestEntry, DigestLine, Flag, TagMode};
pub use matched::MatchedFile;
