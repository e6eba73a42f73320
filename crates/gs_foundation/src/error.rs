// crates/gs_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `GsError` 枚举和 `GsResult` 类型别名，用于整个项目的错误处理。
//! 各上层 crate 定义自己的错误枚举，并实现 `From<...> for GsError` 向上汇聚。
//!
//! # 示例
//!
//! ```
//! use gs_foundation::error::{GsError, GsResult};
//!
//! fn read_config() -> GsResult<()> {
//!     Err(GsError::config("配置文件格式错误"))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type GsResult<T> = Result<T, GsError>;

/// GreenSwmm 错误类型
#[derive(Error, Debug)]
pub enum GsError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    // ========================================================================
    // 配置相关错误
    // ========================================================================

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 缺少配置项
    #[error("缺少必需的配置项: {key}")]
    MissingConfig {
        /// 配置键名
        key: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 无法识别的单位制
    #[error("无法识别的单位制: {detail}")]
    UnrecognizedUnitSystem {
        /// 出错的流量单位或面积单位组合
        detail: String,
    },

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },

    /// 几何定位失败
    #[error("几何定位失败: {message}")]
    Geometry {
        /// 失败原因
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl GsError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 缺少配置
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 无法识别的单位制
    pub fn unrecognized_unit_system(detail: impl Into<String>) -> Self {
        Self::UnrecognizedUnitSystem {
            detail: detail.into(),
        }
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 几何定位失败
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否属于配置类错误（调用方输入有误，不可重试）
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::MissingConfig { .. }
                | Self::InvalidConfig { .. }
                | Self::UnrecognizedUnitSystem { .. }
                | Self::NotFound { .. }
        )
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for GsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================
