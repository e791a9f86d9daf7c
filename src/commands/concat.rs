//! # concat 命令实现
//!
//! 将所有匹配的摘要文件按解析顺序合并到单一输出。
//!
//! ## 功能
//! - 展开 glob 模式
//! - 可选重写二进制/文本标记、添加目录前缀
//! - 写入标准输出，或原子写入指定文件
//!
//! ## 依赖关系
//! - 使用 `cli/concat.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{write_atomic, FlatAggregator, LineTransformer, PatternResolver};
use crate::cli::concat::ConcatArgs;
use crate::error::{DgstError, Result};
use crate::utils::output;

use std::io::{self, BufWriter, Write};

const STDOUT: &str = "<stdout>";

/// 执行 concat 命令
pub fn execute(args: ConcatArgs, verbose: bool) -> Result<()> {
    let mode = args.tags.mode()?;

    let mut resolver = PatternResolver::new(&args.root, &args.patterns[..])?;
    if let Some(outfile) = &args.outfile {
        // 输出文件本身也可能匹配模式
        resolver = resolver.exclude_path(outfile);
    }

    let transformer = LineTransformer::new(mode).with_dir_prefix(args.prefix_dir);
    let aggregator = FlatAggregator::new(&transformer);

    let matches = resolver.matches().inspect(|file| {
        if let (true, Ok(file)) = (verbose, file) {
            output::print_info(&format!("Reading {}", file));
        }
    });

    let (stats, dest) = match &args.outfile {
        Some(outfile) => {
            // 先完成匹配，避免临时输出文件被模式匹配到
            let files = matches.collect::<Result<Vec<_>>>()?;
            let dest = outfile.display().to_string();
            let stats = write_atomic(outfile, |out| {
                aggregator.run(files.into_iter().map(Ok), out, &dest)
            })?;
            (stats, dest)
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            let stats = aggregator.run(matches, &mut out, STDOUT)?;
            out.flush().map_err(|e| DgstError::FileWriteError {
                path: STDOUT.to_string(),
                source: e,
            })?;
            (stats, STDOUT.to_string())
        }
    };

    if stats.files == 0 {
        output::print_warning(&format!(
            "No files matched '{}'",
            args.patterns.join("', '")
        ));
    } else if verbose {
        output::print_done(&format!(
            "Concatenated {} line(s) from {} file(s) into {} (tags: {})",
            stats.lines, stats.files, dest, mode
        ));
    }

    Ok(())
}
