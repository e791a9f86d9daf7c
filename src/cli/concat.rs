//! # concat 子命令 CLI 定义
//!
//! 合并匹配到的摘要文件，写入单一文件或标准输出
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/concat.rs`

use super::TagArgs;
use clap::Args;
use std::path::PathBuf;

/// concat 子命令参数
#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Glob patterns for digest files, e.g. "**/*.md5"
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Output file, defaults to standard output
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    #[command(flatten)]
    pub tags: TagArgs,

    /// Prefix every file name with the directory of its digest file
    #[arg(short, long, default_value_t = false)]
    pub prefix_dir: bool,

    /// Directory the patterns are matched against
    #[arg(short = 'C', long, default_value = ".")]
    pub root: PathBuf,
}
