// crates/gs_config/src/parameters.rs

//! LID 布置参数
//!
//! 参数文件为 JSON，包含两个列表：
//!
//! - `lids`: 设备布置请求，按顺序逐个处理
//! - `roofs`: 屋顶参数，按位置与雨水桶请求一一配对（第 k 个雨水桶对应第 k 个屋顶）
//!
//! ```json
//! {
//!   "lids": [
//!     { "location": { "subcatchment": "S1" }, "type": "RB1", "number": 8,
//!       "area": 0.5, "width": 0, "initSat": 0, "fromImp": 0, "toPerv": 0 }
//!   ],
//!   "roofs": [
//!     { "location": { "map": { "x": 10.0, "y": 20.0 } }, "type": "ROOF",
//!       "number": 8, "area": 0.1, "NImp": 0.013, "NPerv": 0.1, "PctZero": 25 }
//!   ]
//! }
//! ```

use std::path::Path;

use gs_geo::Point2D;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// 位置：子汇水区名称或地图坐标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// 按名称指定子汇水区
    Subcatchment(String),
    /// 地图坐标，通过 `[POLYGONS]` 解析为子汇水区
    Map(Point2D),
}

impl Location {
    /// 已解析的子汇水区名称
    pub fn subcatchment(&self) -> Option<&str> {
        match self {
            Self::Subcatchment(name) => Some(name),
            Self::Map(_) => None,
        }
    }
}

/// 设备出流目标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainTarget {
    /// 排向子汇水区
    Subcatchment(String),
    /// 排向节点
    Node(String),
    /// 地图坐标，解析为所在子汇水区
    Map(Point2D),
}

impl DrainTarget {
    /// 写入 `[LID_USAGE]` 的目标名称（未解析的坐标为空）
    pub fn name(&self) -> &str {
        match self {
            Self::Subcatchment(name) | Self::Node(name) => name,
            Self::Map(_) => "",
        }
    }
}

/// 一条设备布置请求
///
/// 由布置流程消费一次并就地修改：`number` 被截断到容量，
/// `fromImp` 按策略重算，`location` 改写为新建的子区域。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePlacement {
    /// 布置位置
    pub location: Location,
    /// LID 控制名称（`[LID_CONTROLS]` 中的名称）
    #[serde(rename = "type")]
    pub lid_type: String,
    /// 请求的单元数
    #[serde(deserialize_with = "de_count")]
    pub number: u32,
    /// 单个单元面积（设备面积单位）
    pub area: f64,
    /// 单个单元宽度
    #[serde(default)]
    pub width: f64,
    /// 初始饱和度（%）
    #[serde(rename = "initSat", default)]
    pub init_sat: f64,
    /// 不透水面积流入比例（%）
    #[serde(rename = "fromImp", default)]
    pub from_imp: f64,
    /// 出流是否回到透水面积（0 或 1）
    #[serde(rename = "toPerv", default)]
    pub to_perv: f64,
    /// 单元报告文件
    #[serde(rename = "rptFile", default, skip_serializing_if = "Option::is_none")]
    pub rpt_file: Option<String>,
    /// 出流目标
    #[serde(rename = "drainTo", default, skip_serializing_if = "Option::is_none")]
    pub drain_to: Option<DrainTarget>,
}

/// 屋顶参数，与雨水桶请求配对
///
/// 模板中的 `OutID`、`PctImperv`、`width`、`slope` 等键被忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofSpec {
    /// 屋顶所在位置
    pub location: Location,
    /// 屋顶类型名，用于生成屋顶子区域名
    #[serde(rename = "type")]
    pub roof_type: String,
    /// 屋顶数量
    #[serde(default, deserialize_with = "de_count")]
    pub number: u32,
    /// 单个屋顶面积（设备面积单位）
    pub area: f64,
    /// 不透水区曼宁系数
    #[serde(rename = "NImp")]
    pub n_imp: f64,
    /// 透水区曼宁系数
    #[serde(rename = "NPerv")]
    pub n_perv: f64,
    /// 无洼蓄不透水面积比例（%）
    #[serde(rename = "PctZero")]
    pub pct_zero: f64,
}

/// LID 布置参数文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementParameters {
    /// 设备布置请求
    #[serde(default)]
    pub lids: Vec<DevicePlacement>,
    /// 屋顶参数
    #[serde(default)]
    pub roofs: Vec<RoofSpec>,
}

impl PlacementParameters {
    /// 从 JSON 文件加载并校验
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        info!(
            "加载布置参数 {}: {} 个设备请求, {} 个屋顶",
            path.display(),
            params.lids.len(),
            params.roofs.len()
        );
        Ok(params)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let params: Self = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    /// 校验参数取值
    pub fn validate(&self) -> ConfigResult<()> {
        for (idx, lid) in self.lids.iter().enumerate() {
            let key = |field: &str| format!("lids[{idx}].{field}");

            check_location(&lid.location, &key("location"))?;
            if lid.lid_type.trim().is_empty() {
                return Err(ConfigError::invalid(key("type"), "", "不能为空"));
            }
            check_field_text(&lid.lid_type, &key("type"))?;
            if !(lid.area.is_finite() && lid.area > 0.0) {
                return Err(ConfigError::invalid(key("area"), lid.area, "必须为正数"));
            }
            if !(lid.width.is_finite() && lid.width >= 0.0) {
                return Err(ConfigError::invalid(key("width"), lid.width, "不能为负"));
            }
            check_between(lid.init_sat, 0.0, 100.0, &key("initSat"))?;
            check_between(lid.from_imp, 0.0, 100.0, &key("fromImp"))?;
            check_between(lid.to_perv, 0.0, 1.0, &key("toPerv"))?;
            if let Some(rpt_file) = &lid.rpt_file {
                check_field_text(rpt_file, &key("rptFile"))?;
            }
            match &lid.drain_to {
                Some(DrainTarget::Map(p)) => check_point(p, &key("drainTo"))?,
                Some(target) => check_field_text(target.name(), &key("drainTo"))?,
                None => {}
            }
        }

        for (idx, roof) in self.roofs.iter().enumerate() {
            let key = |field: &str| format!("roofs[{idx}].{field}");

            check_location(&roof.location, &key("location"))?;
            if roof.roof_type.trim().is_empty() {
                return Err(ConfigError::invalid(key("type"), "", "不能为空"));
            }
            check_field_text(&roof.roof_type, &key("type"))?;
            if !(roof.area.is_finite() && roof.area >= 0.0) {
                return Err(ConfigError::invalid(key("area"), roof.area, "不能为负"));
            }
            check_between(roof.pct_zero, 0.0, 100.0, &key("PctZero"))?;
        }
        Ok(())
    }
}

fn check_between(value: f64, min: f64, max: f64, key: &str) -> ConfigResult<()> {
    if value.is_nan() || value < min || value > max {
        return Err(ConfigError::invalid(
            key,
            value,
            format!("超出范围 [{min}, {max}]"),
        ));
    }
    Ok(())
}

fn check_point(point: &Point2D, key: &str) -> ConfigResult<()> {
    if !point.is_finite() {
        return Err(ConfigError::invalid(
            key,
            format!("({}, {})", point.x, point.y),
            "坐标必须为有限值",
        ));
    }
    Ok(())
}

/// 写入输入文件的文本不能含 `;`，SWMM 会从该处截断为注释
fn check_field_text(value: &str, key: &str) -> ConfigResult<()> {
    if value.contains(';') {
        return Err(ConfigError::invalid(key, value, "不能包含 ';'"));
    }
    Ok(())
}

fn check_location(location: &Location, key: &str) -> ConfigResult<()> {
    match location {
        Location::Subcatchment(name) if name.trim().is_empty() => {
            Err(ConfigError::invalid(key, "", "子汇水区名称不能为空"))
        }
        Location::Subcatchment(name) => check_field_text(name, key),
        Location::Map(p) => check_point(p, key),
    }
}

/// 单元数：接受非负有限数值，小数部分截断
fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "单元数必须为非负数: {value}"
        )));
    }
    if value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!("单元数过大: {value}")));
    }
    Ok(value.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "lids": [
            {
                "location": { "subcatchment": "S1" },
                "type": "RB1", "number": 8, "area": 0.5, "width": 0,
                "initSat": 0, "fromImp": 0, "toPerv": 1,
                "drainTo": { "node": "J1" }
            },
            {
                "location": { "map": { "x": 50.0, "y": 50.0 } },
                "type": "PP1", "number": 2.7, "area": 100, "width": 10,
                "initSat": 10, "fromImp": 30, "toPerv": 0, "rptFile": "pp.txt"
            }
        ],
        "roofs": [
            {
                "location": { "subcatchment": "S1" }, "type": "ROOF",
                "number": 8, "area": 0.25, "NImp": 0.013, "NPerv": 0.1,
                "PctZero": 25, "OutID": "J1", "PctImperv": 100, "width": 5, "slope": 0.5
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let params = PlacementParameters::from_json(SAMPLE).unwrap();
        assert_eq!(params.lids.len(), 2);
        assert_eq!(params.roofs.len(), 1);

        let rb = &params.lids[0];
        assert_eq!(rb.location.subcatchment(), Some("S1"));
        assert_eq!(rb.lid_type, "RB1");
        assert_eq!(rb.number, 8);
        assert_eq!(rb.drain_to, Some(DrainTarget::Node("J1".into())));

        let pp = &params.lids[1];
        assert_eq!(pp.location, Location::Map(Point2D::new(50.0, 50.0)));
        // 小数单元数被截断
        assert_eq!(pp.number, 2);
        assert_eq!(pp.rpt_file.as_deref(), Some("pp.txt"));

        let roof = &params.roofs[0];
        assert_eq!(roof.roof_type, "ROOF");
        assert!((roof.pct_zero - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let params = PlacementParameters::from_json("{}").unwrap();
        assert!(params.lids.is_empty());
        assert!(params.roofs.is_empty());
    }

    #[test]
    fn test_negative_count_rejected() {
        let json = r#"{"lids": [{"location": {"subcatchment": "S1"},
            "type": "RB1", "number": -1, "area": 1}]}"#;
        assert!(matches!(
            PlacementParameters::from_json(json),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_area_rejected() {
        let json = r#"{"lids": [{"location": {"subcatchment": "S1"},
            "type": "RB1", "number": 1, "area": 0}]}"#;
        let err = PlacementParameters::from_json(json).unwrap_err();
        assert_eq!(err.key(), Some("lids[0].area"));
    }

    #[test]
    fn test_percent_out_of_range() {
        let json = r#"{"lids": [{"location": {"subcatchment": "S1"},
            "type": "RB1", "number": 1, "area": 1, "fromImp": 120}]}"#;
        let err = PlacementParameters::from_json(json).unwrap_err();
        assert_eq!(err.key(), Some("lids[0].fromImp"));
    }

    #[test]
    fn test_empty_location_name_rejected() {
        let json = r#"{"roofs": [{"location": {"subcatchment": " "}, "type": "ROOF",
            "area": 1, "NImp": 0.01, "NPerv": 0.1, "PctZero": 0}]}"#;
        let err = PlacementParameters::from_json(json).unwrap_err();
        assert_eq!(err.key(), Some("roofs[0].location"));
    }

    #[test]
    fn test_semicolon_in_file_text_rejected() {
        let json = r#"{"lids": [{"location": {"subcatchment": "S1"},
            "type": "RB1", "number": 1, "area": 1, "rptFile": "rpt;a.txt"}]}"#;
        let err = PlacementParameters::from_json(json).unwrap_err();
        assert_eq!(err.key(), Some("lids[0].rptFile"));

        let json = r#"{"lids": [{"location": {"subcatchment": "S1"},
            "type": "RB1", "number": 1, "area": 1, "drainTo": {"node": "J;1"}}]}"#;
        let err = PlacementParameters::from_json(json).unwrap_err();
        assert_eq!(err.key(), Some("lids[0].drainTo"));
    }

    #[test]
    fn test_unknown_location_kind_rejected() {
        let json = r#"{"lids": [{"location": {"street": "Main"},
            "type": "RB1", "number": 1, "area": 1}]}"#;
        assert!(PlacementParameters::from_json(json).is_err());
    }
}
