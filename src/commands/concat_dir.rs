//! # concat-dir 命令实现
//!
//! 将匹配的摘要文件按所在目录分组，每个目录写出一个合并文件。
//!
//! ## 功能
//! - 遍历起点下的每个目录，在目录内匹配 glob 模式
//! - 可选重写二进制/文本标记
//! - 每个目录原子写入 `<dir>/<outname>`
//!
//! ## 依赖关系
//! - 使用 `cli/concat_dir.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{group_by_directory, DirectoryAggregator, LineTransformer, PatternResolver};
use crate::cli::concat_dir::ConcatDirArgs;
use crate::error::Result;
use crate::utils::{output, progress};

/// 执行 concat-dir 命令
pub fn execute(args: ConcatDirArgs, verbose: bool) -> Result<()> {
    let mode = args.tags.mode()?;

    // 上次运行的输出不能再作为输入
    let resolver =
        PatternResolver::new(&args.root, &args.patterns[..])?.exclude_name(&args.outname);

    let transformer = LineTransformer::new(mode);
    let aggregator = DirectoryAggregator::new(&transformer, args.outname.as_str());

    let groups = group_by_directory(resolver.matches_per_directory())?;

    if groups.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}'",
            args.patterns.join("', '")
        ));
        return Ok(());
    }

    if verbose {
        output::print_info(&format!(
            "Writing '{}' into {} directories",
            aggregator.outname(),
            groups.len()
        ));
    }

    let pb = progress::create_progress_bar(groups.len() as u64, "Writing");

    let result = aggregator.run(&groups, |dest, written| {
        if verbose {
            pb.suspend(|| {
                output::print_written(
                    &format!("{} file(s)", written.files),
                    &dest.display().to_string(),
                );
            });
        }
        pb.inc(1);
    });

    pb.finish_and_clear();
    let stats = result?;

    if verbose {
        output::print_done(&format!(
            "Wrote {} line(s) from {} file(s) into {} output(s) (tags: {})",
            stats.lines,
            stats.files,
            stats.outputs.len(),
            mode
        ));
    }

    Ok(())
}
