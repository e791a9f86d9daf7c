//! # coreutils 摘要文件解析器
//!
//! 逐行读取 md5sum / sha*sum 输出文件，识别 `<digest> <flag><path>` 记录。
//!
//! ## 行格式
//! ```text
//! d41d8cd98f00b204e9800998ecf8427e  file        (文本模式)
//! d41d8cd98f00b204e9800998ecf8427e *file        (二进制模式)
//! \d41d8cd98f00b204e9800998ecf8427e  a\\b       (文件名已转义)
//! ```
//! 摘要至少 32 位十六进制（MD5 及更长的算法）。摘要与文件名之间允许多个空格；
//! 不匹配的行作为 `DigestLine::Other` 原样保留。
//!
//! ## 依赖关系
//! - 被 `batch/aggregator.rs` 使用
//! - 使用 `models/digest.rs`
//! - 使用 `regex` crate

use crate::error::{DgstError, Result};
use crate::models::{DigestEntry, DigestLine, Flag};

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| {
        Regex::new(r"^(?P<escape>\\?)(?P<digest>[0-9A-Fa-f]{32,}) +(?P<flag>\*?)(?P<path>.+)$")
            .expect("digest line regex is valid")
    })
}

/// 解析单行（不含行尾换行符）
pub fn parse_line(line: &str) -> DigestLine {
    match line_regex().captures(line) {
        Some(caps) => {
            let flag = if caps["flag"].is_empty() {
                Flag::Text
            } else {
                Flag::Binary
            };
            let mut entry = DigestEntry::new(&caps["digest"], flag, &caps["path"]);
            entry.escaped = !caps["escape"].is_empty();
            DigestLine::Entry(entry)
        }
        None => DigestLine::Other(line.to_string()),
    }
}

/// 行尾换行符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// 文件末行没有换行符
    Missing,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Missing => "",
        }
    }
}

/// 读取到的一行原文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 去掉换行符后的内容
    pub text: String,
    pub ending: LineEnding,
}

/// 摘要文件逐行读取器
pub struct DigestReader<R> {
    inner: R,
    path: String,
    line_no: usize,
    done: bool,
}

impl DigestReader<BufReader<File>> {
    /// 打开摘要文件
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| DgstError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(DigestReader::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> DigestReader<R> {
    pub fn new(inner: R, path: &Path) -> Self {
        DigestReader {
            inner,
            path: path.display().to_string(),
            line_no: 0,
            done: false,
        }
    }

    fn read_raw(&mut self) -> Result<Option<RawLine>> {
        let mut text = String::new();
        self.line_no += 1;

        let n = self.inner.read_line(&mut text).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                DgstError::NotText {
                    path: self.path.clone(),
                    line: self.line_no,
                }
            } else {
                DgstError::FileReadError {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        if n == 0 {
            return Ok(None);
        }

        let ending = if text.ends_with("\r\n") {
            text.truncate(text.len() - 2);
            LineEnding::CrLf
        } else if text.ends_with('\n') {
            text.truncate(text.len() - 1);
            LineEnding::Lf
        } else {
            LineEnding::Missing
        };

        Ok(Some(RawLine { text, ending }))
    }
}

impl<R: BufRead> Iterator for DigestReader<R> {
    type Item = Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_raw() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn entry(line: &str) -> DigestEntry {
        match parse_line(line) {
            DigestLine::Entry(e) => e,
            DigestLine::Other(s) => panic!("expected entry, got {:?}", s),
        }
    }

    #[test]
    fn test_parse_text_and_binary() {
        let e = entry(&format!("{}  file1", MD5));
        assert_eq!(e.digest, MD5);
        assert_eq!(e.flag, Flag::Text);
        assert_eq!(e.path, "file1");

        let e = entry(&format!("{} *dir/file2.bin", MD5));
        assert_eq!(e.flag, Flag::Binary);
        assert_eq!(e.path, "dir/file2.bin");
        assert!(!e.escaped);
    }

    #[test]
    fn test_parse_loose_spacing() {
        let e = entry(&format!("{}  *file1", MD5));
        assert_eq!(e.flag, Flag::Binary);
        assert_eq!(e.path, "file1");

        let e = entry(&format!("{}   file2", MD5));
        assert_eq!(e.flag, Flag::Text);
        assert_eq!(e.path, "file2");

        // BSD reversed 格式：单空格、无标记
        let e = entry(&format!("{} file3", MD5));
        assert_eq!(e.flag, Flag::Text);
        assert_eq!(e.path, "file3");
    }

    #[test]
    fn test_parse_escaped() {
        let e = entry(&format!("\\{}  a\\\\b", MD5));
        assert!(e.escaped);
        assert_eq!(e.path, "a\\\\b");
        assert_eq!(e.to_string(), format!("\\{}  a\\\\b", MD5));
    }

    #[test]
    fn test_parse_other_lines() {
        assert_eq!(parse_line(""), DigestLine::Other(String::new()));
        assert_eq!(
            parse_line("# generated by md5sum"),
            DigestLine::Other("# generated by md5sum".to_string())
        );
        let bsd = format!("MD5 (file1) = {}", MD5);
        assert_eq!(parse_line(&bsd), DigestLine::Other(bsd.clone()));
        assert!(matches!(parse_line(MD5), DigestLine::Other(_)));
    }

    #[test]
    fn test_short_hex_words_are_not_entries() {
        for line in ["cafe menu", "deadbeef  notes.txt", "add *file"] {
            assert_eq!(parse_line(line), DigestLine::Other(line.to_string()));
        }
        let sha1 = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
        assert!(matches!(
            parse_line(&format!("{}  file", sha1)),
            DigestLine::Entry(_)
        ));
    }

    #[test]
    fn test_reader_line_endings() {
        let data = format!("{}  a\r\n{} *b\n\n{}  c", MD5, MD5, MD5);
        let lines: Vec<RawLine> = DigestReader::new(Cursor::new(data), Path::new("x.md5"))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, format!("{}  a", MD5));
        assert_eq!(lines[0].ending, LineEnding::CrLf);
        assert_eq!(lines[1].ending, LineEnding::Lf);
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[3].ending, LineEnding::Missing);
    }

    #[test]
    fn test_reader_rejects_binary_garbage() {
        let data: Vec<u8> = vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n'];
        let mut reader = DigestReader::new(Cursor::new(data), Path::new("junk.md5"));

        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(DgstError::NotText { path, line })) => {
                assert_eq!(path, "junk.md5");
                assert_eq!(line, 2);
            }
            other => panic!("expected NotText, got {:?}", other),
        }
        assert!(reader.next().is_none());
    }
}
