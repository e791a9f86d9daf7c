//! # 统一错误处理模块
//!
//! 定义 dgstcat 的所有错误类型，使用 `thiserror` 派生。
//! 错误分为两类：配置错误（参数、glob 模式）与文件访问错误（读写、扫描）。
//! 摘要行本身不会产生错误，无法识别的行原样输出。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dgstcat 统一错误类型
#[derive(Error, Debug)]
pub enum DgstError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Options --binary and --text are mutually exclusive")]
    ConflictingTags,

    // ─────────────────────────────────────────────────────────────
    // 文件访问错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan directory: {path}")]
    ScanError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a text file: {path} (invalid UTF-8 on line {line})")]
    NotText { path: String, line: usize },
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 命令行或模式配置错误
    Configuration,
    /// 输入/输出文件访问错误
    FileAccess,
}

impl DgstError {
    /// 错误所属类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            DgstError::InvalidPattern { .. } | DgstError::ConflictingTags => {
                ErrorKind::Configuration
            }
            DgstError::FileReadError { .. }
            | DgstError::FileWriteError { .. }
            | DgstError::ScanError { .. }
            | DgstError::NotText { .. } => ErrorKind::FileAccess,
        }
    }

    /// 进程退出码，配置错误与 clap 的用法错误保持一致
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::FileAccess => 1,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DgstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = DgstError::InvalidPattern {
            pattern: "[".to_string(),
            reason: "invalid range pattern".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'['"));

        let err = DgstError::FileReadError {
            path: "a/x.md5".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.kind(), ErrorKind::FileAccess);
        assert_eq!(err.exit_code(), 1);
    }
}
