//! # concat-dir 子命令 CLI 定义
//!
//! 按目录合并摘要文件，每个目录写一个输出文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/concat_dir.rs`

use super::TagArgs;
use clap::Args;
use std::path::PathBuf;

/// concat-dir 子命令参数
#[derive(Args, Debug)]
pub struct ConcatDirArgs {
    /// Glob patterns applied inside every directory under the root, e.g. "*.md5"
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Output file name written in every matched directory
    #[arg(short, long, default_value = "md5sum", value_parser = parse_outname)]
    pub outname: String,

    #[command(flatten)]
    pub tags: TagArgs,

    /// Directory the patterns are matched against
    #[arg(short = 'C', long, default_value = ".")]
    pub root: PathBuf,
}

/// 输出名必须是单个文件名，不能带路径
fn parse_outname(name: &str) -> Result<String, String> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(format!("'{}' is not a file name", name));
    }
    if name.chars().any(std::path::is_separator) {
        return Err(format!(
            "'{}' contains a path separator; give a bare file name",
            name
        ));
    }
    Ok(name.to_string())
}
