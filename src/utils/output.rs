//! # 美化输出工具
//!
//! 提供统一的终端输出样式。标准输出可能承载摘要数据，
//! 所有提示信息一律写到标准错误。
//!
//! ## 依赖关系
//! - 被 `main.rs` 与 `commands/` 模块使用
//! - 使用 `colored` crate, `anyhow` 格式化错误链

use crate::error::DgstError;
use colored::Colorize;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    eprintln!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印写出消息
pub fn print_written(from: &str, to: &str) {
    eprintln!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 报告致命错误
///
/// 普通模式输出一行（含错误链）；调试模式输出完整错误链与结构化错误详情。
pub fn print_failure(err: DgstError, debug: bool) {
    let details = if debug {
        Some(format!("{:#?}", err))
    } else {
        None
    };
    let report = anyhow::Error::new(err);

    if let Some(details) = details {
        print_error(&format!("{:?}", report));
        eprintln!("\n{}\n{}", "Details:".dimmed(), details);
    } else {
        print_error(&format!("{:#}", report));
    }
}
