//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `concat`: 合并为单一输出（文件或标准输出）
//! - `concat-dir`: 每个目录合并为一个输出文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: concat, concat_dir

pub mod concat;
pub mod concat_dir;

use crate::error::Result;
use crate::models::TagMode;
use clap::{Args, Parser, Subcommand};

/// dgstcat - 合并 coreutils 摘要文件
#[derive(Parser)]
#[command(name = "dgstcat")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Find coreutils digest files by glob pattern and concatenate them", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print a full diagnostic trace when something goes wrong
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Report matched files and written outputs on standard error
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Concatenate matching digest files into one file or standard output
    Concat(concat::ConcatArgs),

    /// Concatenate matching digest files into one output file per directory
    ConcatDir(concat_dir::ConcatDirArgs),
}

/// `--binary` / `--text` 标记参数（两个子命令共用）
#[derive(Args, Debug, Clone, Copy)]
pub struct TagArgs {
    /// Mark every entry as binary ('*' before the file name)
    #[arg(short, long, conflicts_with = "text")]
    pub binary: bool,

    /// Mark every entry as text (strip a leading '*')
    #[arg(short, long)]
    pub text: bool,
}

impl TagArgs {
    pub fn mode(&self) -> Result<TagMode> {
        TagMode::from_flags(self.binary, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_binary_and_text_conflict() {
        let result = Cli::try_parse_from(["dgstcat", "concat", "-b", "-t", "*.md5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_concat() {
        let cli = Cli::try_parse_from([
            "dgstcat", "-d", "concat", "-o", "all.md5", "-t", "**/*.md5", "*.sha1",
        ])
        .unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Concat(args) => {
                assert_eq!(args.patterns, vec!["**/*.md5", "*.sha1"]);
                assert_eq!(args.outfile.as_deref(), Some(std::path::Path::new("all.md5")));
                assert_eq!(args.tags.mode().unwrap(), TagMode::Text);
            }
            _ => panic!("expected concat"),
        }
    }

    #[test]
    fn test_parse_concat_dir_defaults() {
        let cli = Cli::try_parse_from(["dgstcat", "concat-dir", "*.md5", "--debug"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::ConcatDir(args) => {
                assert_eq!(args.outname, "md5sum");
                assert_eq!(args.tags.mode().unwrap(), TagMode::Keep);
            }
            _ => panic!("expected concat-dir"),
        }
    }

    #[test]
    fn test_outname_must_be_bare_name() {
        for bad in ["sub/md5sum", "../md5sum", "/tmp/md5sum", "..", ""] {
            let result = Cli::try_parse_from(["dgstcat", "concat-dir", "-o", bad, "*.md5"]);
            assert!(result.is_err(), "accepted outname {:?}", bad);
        }
        let cli = Cli::try_parse_from(["dgstcat", "concat-dir", "-o", "SHA256SUMS", "*.sha256"])
            .unwrap();
        match cli.command {
            Commands::ConcatDir(args) => assert_eq!(args.outname, "SHA256SUMS"),
            _ => panic!("expected concat-dir"),
        }
    }

    #[test]
    fn test_pattern_required() {
        assert!(Cli::try_parse_from(["dgstcat", "concat"]).is_err());
    }
}
