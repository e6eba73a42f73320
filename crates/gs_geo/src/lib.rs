// crates/gs_geo/src/lib.rs
//! GreenSwmm 几何模块
//!
//! 提供地图坐标点、多边形以及"坐标 → 子汇水区"的定位服务。
//!
//! # 模块
//!
//! - `geometry`: 平面点 `Point2D`
//! - `polygon`: 多边形与射线法包含判断，子汇水区多边形集合
//!
//! # 示例
//!
//! ```
//! use gs_geo::prelude::*;
//!
//! let mut polygons = AreaPolygons::new();
//! polygons.push_vertex("S1", Point2D::new(0.0, 0.0));
//! polygons.push_vertex("S1", Point2D::new(10.0, 0.0));
//! polygons.push_vertex("S1", Point2D::new(10.0, 10.0));
//! polygons.push_vertex("S1", Point2D::new(0.0, 10.0));
//!
//! assert_eq!(polygons.locate(&Point2D::new(5.0, 5.0)).unwrap(), "S1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geometry;
pub mod polygon;

/// 预导入模块
pub mod prelude {
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::geometry::Point2D;
    pub use crate::polygon::{AreaPolygons, Polygon};
}

// 重导出常用类型
pub use error::{GeoError, GeoResult};
pub use geometry::Point2D;
pub use polygon::{AreaPolygons, Polygon};
