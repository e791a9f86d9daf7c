//! # 摘要行数据模型
//!
//! coreutils 摘要文件（md5sum / sha256sum 等）的一行：
//! `<digest> <flag><path>`，其中 flag 为 `*`（二进制模式）或空格（文本模式）。
//! 文件名含反斜杠或换行时，coreutils 在行首加 `\` 并对文件名转义。
//!
//! ## 依赖关系
//! - 被 `parsers/digest.rs` 创建
//! - 被 `batch/transform.rs` 重写

use crate::error::{DgstError, Result};
use std::fmt;
use std::path::Path;

/// 文件名前的模式标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// 文本模式（空格）
    Text,
    /// 二进制模式（`*`）
    Binary,
}

impl Flag {
    pub fn as_char(self) -> char {
        match self {
            Flag::Text => ' ',
            Flag::Binary => '*',
        }
    }
}

/// 标记重写模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// 保持原样
    #[default]
    Keep,
    /// 强制二进制标记
    Binary,
    /// 强制文本标记
    Text,
}

impl TagMode {
    /// 由 `--binary` / `--text` 开关得到模式，两者互斥
    pub fn from_flags(binary: bool, text: bool) -> Result<Self> {
        match (binary, text) {
            (true, true) => Err(DgstError::ConflictingTags),
            (true, false) => Ok(TagMode::Binary),
            (false, true) => Ok(TagMode::Text),
            (false, false) => Ok(TagMode::Keep),
        }
    }

    /// 需要强制写入的标记
    pub fn forced_flag(self) -> Option<Flag> {
        match self {
            TagMode::Keep => None,
            TagMode::Binary => Some(Flag::Binary),
            TagMode::Text => Some(Flag::Text),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMode::Keep => write!(f, "keep"),
            TagMode::Binary => write!(f, "binary"),
            TagMode::Text => write!(f, "text"),
        }
    }
}

/// 一条摘要记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    /// 行首是否带 `\`（文件名已转义）
    pub escaped: bool,

    /// 十六进制摘要
    pub digest: String,

    /// 模式标记
    pub flag: Flag,

    /// 文件名（转义形式，与原文件一致）
    pub path: String,
}

impl DigestEntry {
    pub fn new(digest: impl Into<String>, flag: Flag, path: impl Into<String>) -> Self {
        DigestEntry {
            escaped: false,
            digest: digest.into(),
            flag,
            path: path.into(),
        }
    }

    /// 替换模式标记
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flag = flag;
        self
    }

    /// 在文件名前加上摘要文件所在目录
    pub fn with_dir_prefix(mut self, dir: &Path) -> Self {
        if dir == Path::new(".") || dir.as_os_str().is_empty() {
            return self;
        }
        if !self.escaped && Path::new(&self.path).is_absolute() {
            return self;
        }

        let mut dir = dir.display().to_string();
        if !self.escaped && needs_escape(&dir) {
            self.path = escape_name(&self.path);
            self.escaped = true;
        }
        if self.escaped {
            dir = escape_name(&dir);
        }

        self.path = Path::new(&dir).join(&self.path).display().to_string();
        self
    }
}

impl fmt::Display for DigestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.escaped {
            write!(f, "\\")?;
        }
        write!(f, "{} {}{}", self.digest, self.flag.as_char(), self.path)
    }
}

/// 解析后的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestLine {
    /// 摘要记录
    Entry(DigestEntry),
    /// 空行、注释或无法识别的内容，原样输出
    Other(String),
}

fn needs_escape(name: &str) -> bool {
    name.contains(['\\', '\n'])
}

/// coreutils 文件名转义：`\` -> `\\`，换行 -> `\n`
fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn test_tag_mode_from_flags() {
        assert_eq!(TagMode::from_flags(false, false).unwrap(), TagMode::Keep);
        assert_eq!(TagMode::from_flags(true, false).unwrap(), TagMode::Binary);
        assert_eq!(TagMode::from_flags(false, true).unwrap(), TagMode::Text);
        assert!(matches!(
            TagMode::from_flags(true, true),
            Err(DgstError::ConflictingTags)
        ));
    }

    #[test]
    fn test_display_canonical() {
        let entry = DigestEntry::new(MD5, Flag::Text, "file1");
        assert_eq!(entry.to_string(), format!("{}  file1", MD5));

        let entry = entry.with_flag(Flag::Binary);
        assert_eq!(entry.to_string(), format!("{} *file1", MD5));
    }

    #[test]
    fn test_dir_prefix() {
        let entry = DigestEntry::new(MD5, Flag::Binary, "file1").with_dir_prefix(Path::new("a/b"));
        assert_eq!(entry.path, "a/b/file1");
        assert!(!entry.escaped);

        let entry = DigestEntry::new(MD5, Flag::Text, "file1").with_dir_prefix(Path::new("."));
        assert_eq!(entry.path, "file1");

        let entry = DigestEntry::new(MD5, Flag::Text, "/abs/file").with_dir_prefix(Path::new("a"));
        assert_eq!(entry.path, "/abs/file");
    }

    #[test]
    fn test_dir_prefix_escapes_backslash_directory() {
        let entry =
            DigestEntry::new(MD5, Flag::Text, "file1").with_dir_prefix(Path::new("we\\ird"));
        assert!(entry.escaped);
        assert_eq!(entry.to_string(), format!("\\{}  we\\\\ird/file1", MD5));
    }
}
