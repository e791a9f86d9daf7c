//! # 摘要行变换器
//!
//! 按配置重写每条记录的模式标记，可选地为文件名加上摘要文件所在目录。
//!
//! ## 规则
//! - `Keep`：记录原样输出
//! - `Binary`：确保文件名前有 `*`
//! - `Text`：去掉文件名前的 `*`
//! - 需要重写时记录按 `<digest> <flag><path>` 规范形式输出
//! - 无法识别的行始终原样输出
//!
//! ## 依赖关系
//! - 被 `batch/aggregator.rs` 使用
//! - 使用 `parsers/digest.rs`, `models/digest.rs`

use crate::error::Result;
use crate::models::{DigestLine, TagMode};
use crate::parsers::{parse_line, DigestReader, LineEnding};

use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;

/// 摘要行变换器
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTransformer {
    mode: TagMode,
    prefix_dirs: bool,
}

impl LineTransformer {
    pub fn new(mode: TagMode) -> Self {
        LineTransformer {
            mode,
            prefix_dirs: false,
        }
    }

    /// 设置是否为文件名加目录前缀
    pub fn with_dir_prefix(mut self, enabled: bool) -> Self {
        self.prefix_dirs = enabled;
        self
    }

    /// 变换单行（不含换行符），`dir` 为摘要文件所在目录
    pub fn transform_line<'a>(&self, line: &'a str, dir: &Path) -> Cow<'a, str> {
        if self.mode == TagMode::Keep && !self.prefix_dirs {
            return Cow::Borrowed(line);
        }

        match parse_line(line) {
            DigestLine::Entry(mut entry) => {
                if let Some(flag) = self.mode.forced_flag() {
                    entry = entry.with_flag(flag);
                }
                if self.prefix_dirs {
                    entry = entry.with_dir_prefix(dir);
                }
                Cow::Owned(entry.to_string())
            }
            DigestLine::Other(_) => Cow::Borrowed(line),
        }
    }

    /// 惰性变换一个文件的所有行，每行带换行符输出
    pub fn lines<'a, R: BufRead + 'a>(
        &'a self,
        reader: DigestReader<R>,
        dir: &'a Path,
    ) -> impl Iterator<Item = Result<String>> + 'a {
        reader.map(move |raw| {
            let raw = raw?;
            let mut out = self.transform_line(&raw.text, dir).into_owned();
            // 末行补换行，避免与下一个文件的首行相连
            out.push_str(match raw.ending {
                LineEnding::Missing => "\n",
                ending => ending.as_str(),
            });
            Ok(out)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn here() -> &'static Path {
        Path::new(".")
    }

    #[test]
    fn test_keep_passes_through() {
        let t = LineTransformer::new(TagMode::Keep);
        let line = format!("{}   *odd  spacing", MD5);
        assert_eq!(t.transform_line(&line, here()), line.as_str());
    }

    #[test]
    fn test_binary_enforcement() {
        let t = LineTransformer::new(TagMode::Binary);
        assert_eq!(
            t.transform_line(&format!("{}  file1", MD5), here()),
            format!("{} *file1", MD5)
        );
    }

    #[test]
    fn test_binary_idempotent() {
        let t = LineTransformer::new(TagMode::Binary);
        let once = t.transform_line(&format!("{}  file1", MD5), here()).into_owned();
        let twice = t.transform_line(&once, here()).into_owned();
        assert_eq!(once, twice);
        assert!(!twice.contains("**"));
    }

    #[test]
    fn test_binary_then_text_round_trip() {
        let original = format!("{}  file1", MD5);
        let binary = LineTransformer::new(TagMode::Binary)
            .transform_line(&original, here())
            .into_owned();
        let text = LineTransformer::new(TagMode::Text)
            .transform_line(&binary, here())
            .into_owned();
        assert_eq!(text, original);
    }

    #[test]
    fn test_text_strips_tag_with_loose_spacing() {
        let t = LineTransformer::new(TagMode::Text);
        assert_eq!(
            t.transform_line(&format!("{}  *file1", MD5), here()),
            format!("{}  file1", MD5)
        );
        assert_eq!(
            t.transform_line(&format!("{}   file2", MD5), here()),
            format!("{}  file2", MD5)
        );
    }

    #[test]
    fn test_other_lines_untouched() {
        let t = LineTransformer::new(TagMode::Binary).with_dir_prefix(true);
        assert_eq!(t.transform_line("", here()), "");
        assert_eq!(t.transform_line("# comment", Path::new("a")), "# comment");
        assert_eq!(t.transform_line("cafe menu", Path::new("a")), "cafe menu");
    }

    #[test]
    fn test_dir_prefix() {
        let t = LineTransformer::new(TagMode::Keep).with_dir_prefix(true);
        assert_eq!(
            t.transform_line(&format!("{} *file1", MD5), Path::new("a")),
            format!("{} *a/file1", MD5)
        );
    }

    #[test]
    fn test_lines_keep_endings() {
        let data = format!("{} *a\r\n\n{} *b", MD5, MD5);
        let t = LineTransformer::new(TagMode::Text);
        let reader = DigestReader::new(Cursor::new(data), Path::new("x.md5"));
        let out: Vec<String> = t
            .lines(reader, here())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            out,
            vec![
                format!("{}  a\r\n", MD5),
                "\n".to_string(),
                format!("{}  b\n", MD5),
            ]
        );
    }
}
