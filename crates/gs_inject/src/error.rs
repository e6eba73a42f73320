// crates/gs_inject/src/error.rs
//! 注入错误类型
//!
//! 配置类错误（引用不存在的子汇水区、LID 控制或段）一律致命；
//! 容量不足不是错误，只截断并记录超出数量。

use gs_config::ConfigError;
use gs_foundation::GsError;
use gs_geo::GeoError;
use gs_io::IoError;
use thiserror::Error;

/// 注入结果类型
pub type InjectResult<T> = Result<T, InjectError>;

/// 注入错误
#[derive(Error, Debug)]
pub enum InjectError {
    /// 子汇水区不存在
    #[error("子汇水区 \"{name}\" 不存在")]
    SubcatchmentNotFound { name: String },

    /// 输入文件缺少段
    #[error("输入文件中没有 [{section}] 段")]
    MissingSection { section: String },

    /// LID 控制未定义
    #[error("LID 控制 \"{name}\" 未在 [LID_CONTROLS] 中定义")]
    DeviceControlNotFound { name: String },

    /// 雨水桶没有对应的屋顶参数
    #[error("第 {index} 个雨水桶没有对应的屋顶参数")]
    MissingRoof { index: usize },

    /// 无法生成唯一名称
    #[error("无法为 \"{base}\" 生成唯一名称（已尝试 {attempts} 次）")]
    NameExhausted { base: String, attempts: usize },

    /// 数值无效
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// 几何定位错误
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// 输入文件错误
    #[error(transparent)]
    Io(#[from] IoError),

    /// 参数错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 汇总输出错误
    #[error("汇总写出失败: {0}")]
    Csv(#[from] csv::Error),

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] GsError),
}

impl InjectError {
    /// 构造无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 是否为配置错误
    pub fn is_config(&self) -> bool {
        match self {
            Self::SubcatchmentNotFound { .. }
            | Self::MissingSection { .. }
            | Self::DeviceControlNotFound { .. }
            | Self::MissingRoof { .. }
            | Self::InvalidValue { .. }
            | Self::Config(_)
            | Self::Io(IoError::UnknownField { .. }) => true,
            Self::Foundation(err) => err.is_config(),
            _ => false,
        }
    }
}

impl From<InjectError> for GsError {
    fn from(err: InjectError) -> Self {
        match err {
            InjectError::SubcatchmentNotFound { name } => {
                GsError::not_found(format!("子汇水区 \"{name}\""))
            }
            InjectError::MissingSection { section } => {
                GsError::config(format!("输入文件中没有 [{section}] 段"))
            }
            InjectError::DeviceControlNotFound { name } => {
                GsError::config(format!("LID 控制 \"{name}\" 未定义"))
            }
            InjectError::InvalidValue { key, value, reason } => {
                GsError::invalid_config(key, value, reason)
            }
            InjectError::Geo(err) => err.into(),
            InjectError::Io(err) => err.into(),
            InjectError::Config(err) => err.into(),
            InjectError::Foundation(err) => err,
            err @ InjectError::NameExhausted { .. } => GsError::internal(err.to_string()),
            err @ InjectError::MissingRoof { .. } => GsError::config(err.to_string()),
            err @ InjectError::Csv(_) => GsError::io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = InjectError::SubcatchmentNotFound { name: "S9".into() };
        assert!(err.is_config());
        assert!(err.to_string().contains("S9"));

        let err = InjectError::NameExhausted {
            base: "S1##RB1_1".into(),
            attempts: 1000,
        };
        assert!(!err.is_config());
    }

    #[test]
    fn test_unit_system_error_is_config() {
        let err: InjectError = GsError::unrecognized_unit_system("FLOW_UNITS = XYZ").into();
        assert!(err.is_config());
    }

    #[test]
    fn test_unknown_field_is_config() {
        let err: InjectError = IoError::UnknownField {
            section: "SUBCATCHMENTS".into(),
            field: "Elevation".into(),
        }
        .into();
        assert!(err.is_config());
        assert!(GsError::from(err).is_config());
    }

    #[test]
    fn test_converts_to_gs_error() {
        let gs: GsError = InjectError::MissingSection {
            section: "LID_CONTROLS".into(),
        }
        .into();
        assert!(gs.is_config());
    }
}
