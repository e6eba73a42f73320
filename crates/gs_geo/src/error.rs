// crates/gs_geo/src/error.rs
//! 几何处理错误类型
//!
//! 所有错误可转换为 `gs_foundation::GsError` 向上传播。
//!
//! # 错误分类
//!
//! - **定位错误**：坐标不在任何子汇水区多边形内
//! - **几何错误**：坐标非有限数
//! - **基础错误**：来自 Foundation 层

use gs_foundation::GsError;
use thiserror::Error;

/// Geo 模块结果类型
pub type GeoResult<T> = Result<T, GeoError>;

/// 几何处理错误
#[derive(Error, Debug)]
pub enum GeoError {
    /// 坐标不在任何子汇水区内
    #[error("坐标 ({x}, {y}) 不在任何子汇水区内")]
    PointNotInAnyArea {
        /// X 坐标
        x: f64,
        /// Y 坐标
        y: f64,
    },

    /// 坐标非有限数
    #[error("坐标非有限数: ({x}, {y})")]
    NonFiniteCoordinate {
        /// X 坐标
        x: f64,
        /// Y 坐标
        y: f64,
    },

    /// 基础层错误
    #[error("基础层错误: {0}")]
    Foundation(#[from] GsError),
}

// ============================================================================
// 转换实现
// ============================================================================

impl From<GeoError> for GsError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::PointNotInAnyArea { x, y } => {
                GsError::geometry(format!("坐标 ({x}, {y}) 不在任何子汇水区内"))
            }
            GeoError::NonFiniteCoordinate { x, y } => {
                GsError::invalid_input(format!("坐标非有限数: ({x}, {y})"))
            }
            GeoError::Foundation(err) => err,
        }
    }
}

// ============================================================================
// 便捷构造函数
// ============================================================================

impl GeoError {
    /// 创建"坐标不在任何子汇水区内"错误
    #[inline]
    pub fn point_not_in_any_area(x: f64, y: f64) -> Self {
        Self::PointNotInAnyArea { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_not_in_area_converts_to_geometry() {
        let err: GsError = GeoError::point_not_in_any_area(1.5, -2.0).into();
        assert!(matches!(err, GsError::Geometry { .. }));
        assert!(err.to_string().contains("1.5"));
    }
}
