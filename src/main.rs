//! # dgstcat - coreutils 摘要文件合并工具
//!
//! 按 glob 模式查找 md5sum / sha*sum 生成的摘要文件，
//! 合并为单一输出或每个目录一个输出文件，可选统一二进制/文本标记。
//!
//! ## 子命令
//! - `concat`     - 合并到一个文件或标准输出
//! - `concat-dir` - 每个目录合并为一个文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (模式展开、行变换、聚合)
//!   │     ├── parsers/   (摘要行解析器)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command, cli.verbose) {
        let code = e.exit_code();
        utils::output::print_failure(e, cli.debug);
        std::process::exit(code);
    }
}
