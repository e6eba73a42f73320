// crates/gs_io/src/error.rs
//! IO 错误类型定义
//!
//! 提供 IO 模块的统一错误枚举，支持通过 thiserror 自动转换底层错误。
//! 所有错误最终可转换为 GsError 以实现跨层错误传递。

use std::path::PathBuf;

use gs_foundation::GsError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件读写失败
    #[error("文件读写失败: {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// 字段布局表中没有登记的 (段, 字段)
    #[error("未登记的字段: [{section}] {field}")]
    UnknownField { section: String, field: String },

    /// 字段值缺失
    #[error("[{section}] 记录 \"{record}\" 缺少字段 {field}")]
    MissingValue {
        section: String,
        record: String,
        field: String,
    },

    /// 字段值无法解析为数值
    #[error("[{section}] 记录 \"{record}\" 字段 {field} 不是有效数值: \"{value}\"")]
    InvalidNumber {
        section: String,
        record: String,
        field: String,
        value: String,
    },

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] GsError),
}

impl IoError {
    /// 由路径和 IO 错误构造
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl From<IoError> for GsError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::File { path, source } => {
                GsError::io_with_source(format!("文件读写失败: {}", path.display()), source)
            }
            IoError::ParseError { file, line, message } => GsError::parse(file, line, message),
            IoError::UnknownField { section, field } => {
                GsError::config(format!("未登记的字段: [{section}] {field}"))
            }
            IoError::MissingValue {
                section,
                record,
                field,
            } => GsError::invalid_input(format!("[{section}] 记录 \"{record}\" 缺少字段 {field}")),
            IoError::InvalidNumber {
                section,
                record,
                field,
                value,
            } => GsError::invalid_input(format!(
                "[{section}] 记录 \"{record}\" 字段 {field} 不是有效数值: \"{value}\""
            )),
            IoError::Foundation(err) => err,
        }
    }
}
