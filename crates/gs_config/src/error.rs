// crates/gs_config/src/error.rs

//! 配置层错误类型

use std::path::PathBuf;

use gs_foundation::GsError;

/// 配置层结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {path}: {source}")]
    Io {
        /// 出错的文件
        path: PathBuf,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 解析错误
    #[error("解析错误: {path}: {message}")]
    Parse {
        /// 出错的文件
        path: PathBuf,
        /// 错误详情
        message: String,
    },

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 路径不是文件
    #[error("配置无效 '{key}': \"{}\" 不是文件", path.display())]
    NotAFile {
        /// 配置键
        key: String,
        /// 路径
        path: PathBuf,
    },

    /// 目录无法创建
    #[error("配置无效 '{key}': 无法创建目录 \"{}\"", path.display())]
    DirectoryUnavailable {
        /// 配置键
        key: String,
        /// 目录
        path: PathBuf,
    },
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 出错的配置键（如有）
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { key, .. }
            | Self::NotAFile { key, .. }
            | Self::DirectoryUnavailable { key, .. } => Some(key),
            Self::Missing(key) => Some(key),
            Self::Io { .. } | Self::Parse { .. } => None,
        }
    }
}

impl From<ConfigError> for GsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { path, source } => {
                GsError::io_with_source(format!("无法读取 {}", path.display()), source)
            }
            ConfigError::Parse { path, message } => {
                GsError::config(format!("解析 {} 失败: {message}", path.display()))
            }
            ConfigError::InvalidValue { key, value, reason } => {
                GsError::invalid_config(key, value, reason)
            }
            ConfigError::Missing(key) => GsError::missing_config(key),
            err @ (ConfigError::NotAFile { .. } | ConfigError::DirectoryUnavailable { .. }) => {
                GsError::config(err.to_string())
            }
        }
    }
}
