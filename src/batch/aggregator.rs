//! # 摘要聚合器
//!
//! 将匹配文件的变换结果按解析顺序写入输出。
//!
//! ## 功能
//! - `FlatAggregator`：全部写入单一输出（文件或标准输出）
//! - `DirectoryAggregator`：按所在目录分组，每个目录写一个输出文件
//! - 命名输出文件经临时文件原子替换，失败时不留下半成品
//!
//! 任一文件读写失败立即中止整个运行。
//!
//! ## 依赖关系
//! - 被 `commands/concat.rs`, `commands/concat_dir.rs` 调用
//! - 使用 `batch/transform.rs`, `parsers/digest.rs`
//! - 使用 `tempfile` 实现原子写入

use crate::batch::transform::LineTransformer;
use crate::error::{DgstError, Result};
use crate::models::MatchedFile;
use crate::parsers::DigestReader;

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 聚合结果统计
#[derive(Debug, Default)]
pub struct AggregateStats {
    /// 读取的摘要文件数
    pub files: usize,
    /// 写出的行数
    pub lines: usize,
    /// 写出的输出文件
    pub outputs: Vec<PathBuf>,
}

impl AggregateStats {
    pub fn merge(&mut self, other: AggregateStats) {
        self.files += other.files;
        self.lines += other.lines;
        self.outputs.extend(other.outputs);
    }
}

/// 将一个摘要文件变换后追加到输出，返回写出的行数
pub fn append_file<W: Write>(
    out: &mut W,
    file: &MatchedFile,
    transformer: &LineTransformer,
    dest: &str,
) -> Result<usize> {
    let reader = DigestReader::open(file.path())?;
    let mut count = 0;

    for line in transformer.lines(reader, file.dir()) {
        out.write_all(line?.as_bytes())
            .map_err(|e| DgstError::FileWriteError {
                path: dest.to_string(),
                source: e,
            })?;
        count += 1;
    }

    Ok(count)
}

/// 原子写入：先写同目录临时文件，成功后替换目标
///
/// 目标已存在时沿用其权限；否则权限与普通新建文件相同（受 umask 约束）。
pub fn write_atomic<T, F>(dest: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<T>,
{
    let write_err = |e: std::io::Error| DgstError::FileWriteError {
        path: dest.display().to_string(),
        source: e,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = create_temp(dir).map_err(write_err)?;
    let value = {
        let mut writer = BufWriter::new(&mut tmp);
        let value = write(&mut writer)?;
        writer.flush().map_err(write_err)?;
        value
    };
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }
    tmp.persist(dest).map_err(|e| write_err(e.error))?;

    Ok(value)
}

/// 在 `dir` 中创建临时文件，unix 上以 0666 请求权限，实际权限由 umask 决定
fn create_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// 单一输出聚合器
pub struct FlatAggregator<'a> {
    transformer: &'a LineTransformer,
}

impl<'a> FlatAggregator<'a> {
    pub fn new(transformer: &'a LineTransformer) -> Self {
        FlatAggregator { transformer }
    }

    /// 按顺序处理所有匹配文件，`dest` 用于错误信息
    pub fn run<W, I>(&self, files: I, out: &mut W, dest: &str) -> Result<AggregateStats>
    where
        W: Write,
        I: IntoIterator<Item = Result<MatchedFile>>,
    {
        let mut stats = AggregateStats::default();

        for file in files {
            let file = file?;
            stats.lines += append_file(out, &file, self.transformer, dest)?;
            stats.files += 1;
        }

        Ok(stats)
    }
}

/// 按目录分组后的匹配文件
#[derive(Debug)]
pub struct DirectoryGroup {
    pub dir: PathBuf,
    pub files: Vec<MatchedFile>,
}

/// 按所在目录分组，目录按首次出现排序，组内保持解析顺序
pub fn group_by_directory<I>(files: I) -> Result<Vec<DirectoryGroup>>
where
    I: IntoIterator<Item = Result<MatchedFile>>,
{
    let mut groups: Vec<DirectoryGroup> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for file in files {
        let file = file?;
        match index.get(file.dir()) {
            Some(&i) => groups[i].files.push(file),
            None => {
                index.insert(file.dir().to_path_buf(), groups.len());
                groups.push(DirectoryGroup {
                    dir: file.dir().to_path_buf(),
                    files: vec![file],
                });
            }
        }
    }

    Ok(groups)
}

/// 按目录输出聚合器
pub struct DirectoryAggregator<'a> {
    transformer: &'a LineTransformer,
    outname: String,
}

impl<'a> DirectoryAggregator<'a> {
    pub fn new(transformer: &'a LineTransformer, outname: impl Into<String>) -> Self {
        DirectoryAggregator {
            transformer,
            outname: outname.into(),
        }
    }

    pub fn outname(&self) -> &str {
        &self.outname
    }

    /// 写出一个目录的输出文件
    pub fn write_group(&self, group: &DirectoryGroup) -> Result<AggregateStats> {
        let dest = group.dir.join(&self.outname);
        let dest_name = dest.display().to_string();

        let lines = write_atomic(&dest, |out| {
            let mut lines = 0;
            for file in &group.files {
                lines += append_file(out, file, self.transformer, &dest_name)?;
            }
            Ok(lines)
        })?;

        Ok(AggregateStats {
            files: group.files.len(),
            lines,
            outputs: vec![dest],
        })
    }

    /// 依次写出所有目录，每写完一个目录调用 `on_written`
    pub fn run<F>(&self, groups: &[DirectoryGroup], mut on_written: F) -> Result<AggregateStats>
    where
        F: FnMut(&Path, &AggregateStats),
    {
        let mut stats = AggregateStats::default();

        for group in groups {
            let written = self.write_group(group)?;
            if let Some(dest) = written.outputs.first() {
                on_written(dest, &written);
            }
            stats.merge(written);
        }

        Ok(stats)
    }
}
