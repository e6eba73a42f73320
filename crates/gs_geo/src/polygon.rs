// crates/gs_geo/src/polygon.rs
//! 多边形与子汇水区定位
//!
//! `AreaPolygons` 按 `[POLYGONS]` 段中出现的顺序保存每个子汇水区的边界，
//! `locate` 返回第一个包含给定坐标的子汇水区名称。

use std::collections::HashMap;

use crate::error::{GeoError, GeoResult};
use crate::geometry::Point2D;

/// 简单多边形（顶点按顺序首尾相连，无需重复首点）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// 由顶点序列创建
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// 追加一个顶点
    pub fn push(&mut self, vertex: Point2D) {
        self.vertices.push(vertex);
    }

    /// 顶点列表
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// 是否构成有效多边形（至少 3 个顶点）
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// 包围盒 (min, max)
    pub fn bounds(&self) -> Option<(Point2D, Point2D)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))),
        )
    }

    /// 射线法判断点是否在多边形内
    pub fn contains(&self, point: &Point2D) -> bool {
        if !self.is_valid() {
            return false;
        }
        if let Some((lo, hi)) = self.bounds() {
            if point.x < lo.x || point.x > hi.x || point.y < lo.y || point.y > hi.y {
                return false;
            }
        }

        let vertices = &self.vertices;
        let n = vertices.len();
        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let vi = &vertices[i];
            let vj = &vertices[j];

            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }

            j = i;
        }

        inside
    }
}

/// 子汇水区多边形集合（保持插入顺序）
#[derive(Debug, Clone, Default)]
pub struct AreaPolygons {
    entries: Vec<(String, Polygon)>,
    lookup: HashMap<String, usize>,
}

impl AreaPolygons {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 为指定子汇水区追加一个顶点，首次出现时创建多边形
    pub fn push_vertex(&mut self, name: &str, vertex: Point2D) {
        let idx = match self.lookup.get(name) {
            Some(&idx) => idx,
            None => {
                self.entries.push((name.to_string(), Polygon::default()));
                let idx = self.entries.len() - 1;
                self.lookup.insert(name.to_string(), idx);
                idx
            }
        };
        self.entries[idx].1.push(vertex);
    }

    /// 多边形数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按名称获取多边形
    pub fn get(&self, name: &str) -> Option<&Polygon> {
        self.lookup.get(name).map(|&idx| &self.entries[idx].1)
    }

    /// 遍历 (名称, 多边形)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Polygon)> {
        self.entries.iter().map(|(name, poly)| (name.as_str(), poly))
    }

    /// 查找包含该坐标的子汇水区
    ///
    /// 多个多边形同时包含该点时返回最先定义的那个。
    pub fn locate(&self, point: &Point2D) -> GeoResult<&str> {
        if !point.is_finite() {
            return Err(GeoError::NonFiniteCoordinate {
                x: point.x,
                y: point.y,
            });
        }
        self.entries
            .iter()
            .find(|(_, poly)| poly.contains(point))
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| GeoError::point_not_in_any_area(point.x, point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point2D::new(x0, y0),
            Point2D::new(x0 + size, y0),
            Point2D::new(x0 + size, y0 + size),
            Point2D::new(x0, y0 + size),
        ])
    }

    #[test]
    fn test_contains_square() {
        let poly = square(0.0, 0.0, 10.0);
        assert!(poly.contains(&Point2D::new(5.0, 5.0)));
        assert!(!poly.contains(&Point2D::new(15.0, 5.0)));
        assert!(!poly.contains(&Point2D::new(5.0, -0.1)));
    }

    #[test]
    fn test_contains_concave() {
        // L 形
        let poly = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 4.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(4.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        assert!(poly.contains(&Point2D::new(2.0, 8.0)));
        assert!(poly.contains(&Point2D::new(8.0, 2.0)));
        assert!(!poly.contains(&Point2D::new(8.0, 8.0)));
    }

    #[test]
    fn test_degenerate_polygon() {
        let poly = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]);
        assert!(!poly.is_valid());
        assert!(!poly.contains(&Point2D::new(0.5, 0.5)));
    }

    #[test]
    fn test_locate_first_match() {
        let mut polygons = AreaPolygons::new();
        for v in square(0.0, 0.0, 10.0).vertices() {
            polygons.push_vertex("A", *v);
        }
        for v in square(20.0, 0.0, 10.0).vertices() {
            polygons.push_vertex("B", *v);
        }
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons.locate(&Point2D::new(25.0, 5.0)).unwrap(), "B");
        assert_eq!(polygons.locate(&Point2D::new(1.0, 1.0)).unwrap(), "A");
    }

    #[test]
    fn test_locate_miss() {
        let mut polygons = AreaPolygons::new();
        for v in square(0.0, 0.0, 10.0).vertices() {
            polygons.push_vertex("A", *v);
        }
        let err = polygons.locate(&Point2D::new(50.0, 50.0)).unwrap_err();
        assert!(matches!(err, GeoError::PointNotInAnyArea { .. }));
    }
}
