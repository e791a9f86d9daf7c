//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/`
//! - 子模块: concat, concat_dir

pub mod concat;
pub mod concat_dir;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands, verbose: bool) -> Result<()> {
    match cmd {
        Commands::Concat(args) => concat::execute(args, verbose),
        Commands::ConcatDir(args) => concat_dir::execute(args, verbose),
    }
}
