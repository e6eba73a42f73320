// crates/gs_inject/src/locate.rs

//! 地图坐标定位
//!
//! `[POLYGONS]` 中的顶点按子汇水区分组为多边形，首次需要时解析一次。

use gs_geo::{AreaPolygons, Point2D};
use gs_io::inp::{field_index, sections, Document};
use gs_io::IoError;
use tracing::debug;

use crate::error::InjectResult;

/// 从 `[POLYGONS]` 提取子汇水区多边形（按文件顺序）
pub fn extract_polygons(doc: &Document) -> InjectResult<AreaPolygons> {
    let name_idx = field_index(sections::POLYGONS, "Subcat")?;
    let x_idx = field_index(sections::POLYGONS, "Xcoord")?;
    let y_idx = field_index(sections::POLYGONS, "Ycoord")?;

    let mut polygons = AreaPolygons::new();
    let Some(section) = doc.section(sections::POLYGONS) else {
        return Ok(polygons);
    };

    for record in section.data_records() {
        let name = record.value(name_idx).unwrap_or_default();
        let coord = |idx: usize, field: &str| -> Result<f64, IoError> {
            let raw = record.value(idx).unwrap_or_default();
            raw.parse::<f64>().map_err(|_| IoError::InvalidNumber {
                section: sections::POLYGONS.to_string(),
                record: name.to_string(),
                field: field.to_string(),
                value: raw.to_string(),
            })
        };
        let vertex = Point2D::new(coord(x_idx, "Xcoord")?, coord(y_idx, "Ycoord")?);
        polygons.push_vertex(name, vertex);
    }

    debug!("提取 {} 个子汇水区多边形", polygons.len());
    Ok(polygons)
}

/// 按需解析的多边形集合
#[derive(Debug, Default)]
pub struct AreaLocator {
    polygons: Option<AreaPolygons>,
}

impl AreaLocator {
    /// 创建（尚未解析）
    pub fn new() -> Self {
        Self::default()
    }

    /// 坐标所在的子汇水区名称（多个命中时取文件中的第一个）
    pub fn locate(&mut self, doc: &Document, point: &Point2D) -> InjectResult<String> {
        if self.polygons.is_none() {
            self.polygons = Some(extract_polygons(doc)?);
        }
        let polygons = self.polygons.get_or_insert_with(AreaPolygons::new);
        Ok(polygons.locate(point)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_io::inp::read_str;

    const MODEL: &str = "\
[POLYGONS]
;;Subcatchment X Y
S1 0 0
S1 10 0
S1 10 10
S1 0 10
S2 10 0
S2 20 0
S2 20 10
S2 10 10
";

    #[test]
    fn test_extract_groups_vertices() {
        let doc = read_str(MODEL).unwrap();
        let polygons = extract_polygons(&doc).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons.get("S2").unwrap().vertices().len(), 4);
    }

    #[test]
    fn test_locate_point() {
        let doc = read_str(MODEL).unwrap();
        let mut locator = AreaLocator::new();
        assert_eq!(locator.locate(&doc, &Point2D::new(5.0, 5.0)).unwrap(), "S1");
        assert_eq!(locator.locate(&doc, &Point2D::new(15.0, 2.0)).unwrap(), "S2");
    }

    #[test]
    fn test_point_outside_all() {
        let doc = read_str(MODEL).unwrap();
        let mut locator = AreaLocator::new();
        let err = locator.locate(&doc, &Point2D::new(50.0, 50.0)).unwrap_err();
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_bad_coordinate() {
        let doc = read_str("[POLYGONS]\nS1 abc 0\n").unwrap();
        assert!(extract_polygons(&doc).is_err());
    }
}
