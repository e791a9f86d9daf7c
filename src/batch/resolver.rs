//! # 模式解析器
//!
//! 将一个或多个 glob 模式展开为有序的摘要文件列表。
//!
//! ## 功能
//! - 支持 `**` 递归匹配
//! - 模式在产出任何结果前全部校验
//! - 按模式顺序产出，同一文件只产出一次
//! - 跳过目录与输出文件本身
//! - 逐目录模式：遍历起点下的每个目录，在该目录中应用全部模式
//!
//! ## 依赖关系
//! - 被 `commands/concat.rs`, `commands/concat_dir.rs` 调用
//! - 使用 `glob`, `walkdir` crate

use crate::error::{DgstError, Result};
use crate::models::MatchedFile;

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 模式解析器
#[derive(Debug, Clone)]
pub struct PatternResolver {
    /// 搜索起点
    root: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 编译后的模式，与 `patterns` 一一对应
    compiled: Vec<Pattern>,
    /// 排除的具体路径（已规范化）
    excluded_paths: Vec<PathBuf>,
    /// 排除的文件名
    excluded_names: Vec<String>,
}

impl PatternResolver {
    /// 创建解析器并校验所有模式
    pub fn new<S: AsRef<str>>(root: impl Into<PathBuf>, patterns: &[S]) -> Result<Self> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();

        let compiled = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| DgstError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PatternResolver {
            root: root.into(),
            patterns,
            compiled,
            excluded_paths: Vec::new(),
            excluded_names: Vec::new(),
        })
    }

    /// 排除某个具体文件（文件不存在时无需排除）
    pub fn exclude_path(mut self, path: &Path) -> Self {
        if let Ok(canonical) = path.canonicalize() {
            self.excluded_paths.push(canonical);
        }
        self
    }

    /// 排除所有同名文件
    pub fn exclude_name(mut self, name: &str) -> Self {
        self.excluded_names.push(name.to_string());
        self
    }

    /// 惰性产出所有匹配文件，可重复调用
    pub fn matches(&self) -> impl Iterator<Item = Result<MatchedFile>> + '_ {
        let mut seen: HashSet<PathBuf> = HashSet::new();

        self.patterns
            .iter()
            .flat_map(move |pattern| self.expand(pattern))
            .filter_map(move |entry| match entry {
                Ok(path) => {
                    if !path.is_file() || self.is_excluded(&path) || !seen.insert(path.clone()) {
                        return None;
                    }
                    Some(Ok(MatchedFile::new(path)))
                }
                Err(e) => Some(Err(e)),
            })
    }

    /// 逐目录产出匹配文件
    ///
    /// 起点下的每个目录（含起点本身）按名称顺序遍历；在每个目录内按模式顺序
    /// 匹配该目录直接包含的文件。不含路径分隔符的模式匹配文件名，含分隔符的
    /// 模式匹配相对起点的路径。
    pub fn matches_per_directory(&self) -> impl Iterator<Item = Result<MatchedFile>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(walk_error(e))),
            })
            .flat_map(move |dir| match dir {
                Ok(dir) => self.match_directory(&dir),
                Err(e) => vec![Err(e)],
            })
    }

    /// 在单个目录中按模式顺序匹配
    fn match_directory(&self, dir: &Path) -> Vec<Result<MatchedFile>> {
        let files = match list_files(dir) {
            Ok(files) => files,
            Err(e) => return vec![Err(e)],
        };

        let mut matched: Vec<&PathBuf> = Vec::new();
        for (raw, pattern) in self.patterns.iter().zip(&self.compiled) {
            for path in &files {
                if matched.contains(&path) || self.is_excluded(path) {
                    continue;
                }
                if self.pattern_applies(raw, pattern, path) {
                    matched.push(path);
                }
            }
        }

        matched
            .into_iter()
            .map(|path| Ok(MatchedFile::new(self.display_path(path))))
            .collect()
    }

    fn pattern_applies(&self, raw: &str, pattern: &Pattern, path: &Path) -> bool {
        if Path::new(raw).is_absolute() {
            return pattern.matches_path_with(path, match_options());
        }
        if raw.chars().any(std::path::is_separator) {
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            return pattern.matches_path_with(relative, match_options());
        }
        path.file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |name| pattern.matches_with(name, match_options()))
    }

    /// 起点为 `.` 时去掉遍历产生的 `./` 前缀
    fn display_path(&self, path: &Path) -> PathBuf {
        if self.root == Path::new(".") {
            if let Ok(stripped) = path.strip_prefix(".") {
                return stripped.to_path_buf();
            }
        }
        path.to_path_buf()
    }

    /// 展开单个模式
    fn expand(&self, pattern: &str) -> Box<dyn Iterator<Item = Result<PathBuf>>> {
        let anchored = self.anchor(pattern);
        match glob::glob_with(&anchored, match_options()) {
            Ok(paths) => Box::new(paths.map(|entry| {
                entry.map_err(|e| DgstError::ScanError {
                    path: e.path().display().to_string(),
                    source: std::io::Error::from(e),
                })
            })),
            Err(e) => Box::new(std::iter::once(Err(DgstError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.msg.to_string(),
            }))),
        }
    }

    /// 将模式锚定到搜索起点
    fn anchor(&self, pattern: &str) -> String {
        if self.root == Path::new(".") || Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let root = Pattern::escape(&self.root.display().to_string());
        if root.ends_with('/') {
            format!("{}{}", root, pattern)
        } else {
            format!("{}/{}", root, pattern)
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.excluded_names.iter().any(|n| n == name) {
                return true;
            }
        }
        if self.excluded_paths.is_empty() {
            return false;
        }
        match path.canonicalize() {
            Ok(canonical) => self.excluded_paths.contains(&canonical),
            Err(_) => false,
        }
    }
}

/// 列出目录直接包含的文件，按名称排序
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let scan_err = |e: std::io::Error| DgstError::ScanError {
        path: dir.display().to_string(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let path = entry.map_err(scan_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn walk_error(e: walkdir::Error) -> DgstError {
    let path = e
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    DgstError::ScanError {
        path,
        source: std::io::Error::from(e),
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}
