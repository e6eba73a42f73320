// crates/gs_geo/src/geometry.rs
//! 几何类型定义
//!
//! SWMM 的 `[POLYGONS]`/`[COORDINATES]` 使用平面地图坐标，
//! 这里只需要二维点。

use serde::{Deserialize, Serialize};

/// 2D点 - 地图坐标
///
/// # 示例
///
/// ```
/// use gs_geo::geometry::Point2D;
///
/// let p: Point2D = serde_json::from_str(r#"{"x": 3.0, "y": 4.0}"#).unwrap();
/// assert_eq!(p, Point2D::new(3.0, 4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
}

impl Point2D {
    /// 创建新的2D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 判断是否为有限数
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 分量最小值
    #[inline]
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// 分量最大值
    #[inline]
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_min_max() {
        let a = Point2D::new(1.0, 5.0);
        let b = Point2D::new(3.0, -2.0);
        assert_eq!(a.min(&b), Point2D::new(1.0, -2.0));
        assert_eq!(a.max(&b), Point2D::new(3.0, 5.0));
    }

    #[test]
    fn test_non_finite_point() {
        assert!(Point2D::new(0.0, 1.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 1.0).is_finite());
        assert!(!Point2D::new(0.0, f64::INFINITY).is_finite());
    }
}
