// crates/gs_foundation/src/units.rs

//! 单位制与面积换算
//!
//! SWMM 输入文件中子汇水区面积使用"大"面积单位（英亩/公顷），
//! 而 LID 单元面积使用"小"面积单位（平方英尺/平方米）。
//! 单位制由 `[OPTIONS] FLOW_UNITS` 唯一确定：
//!
//! | 流量单位 | 单位制 | LID 面积 | 子汇水区面积 | 宽度 |
//! |---------|--------|---------|-------------|------|
//! | CFS/GPM/MGD | US | ft² | acre | ft |
//! | CMS/LPS/MLD | SI | m² | ha | m |

use std::fmt;

use crate::error::{GsError, GsResult};

/// 每英亩平方英尺数
pub const SQUARE_FEET_PER_ACRE: f64 = 43560.0;

/// 每公顷平方米数
pub const SQUARE_METERS_PER_HECTARE: f64 = 10000.0;

/// 单位制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    /// 美制单位
    Us,
    /// 国际单位
    Si,
}

impl UnitSystem {
    /// 由流量单位标识推导单位制
    ///
    /// 未识别的流量单位返回 [`GsError::UnrecognizedUnitSystem`]。
    pub fn from_flow_units(flow_units: &str) -> GsResult<Self> {
        match flow_units.trim().to_ascii_uppercase().as_str() {
            "CFS" | "GPM" | "MGD" => Ok(Self::Us),
            "CMS" | "LPS" | "MLD" => Ok(Self::Si),
            other => Err(GsError::unrecognized_unit_system(format!(
                "未识别的流量单位 \"{other}\""
            ))),
        }
    }

    /// 单位制名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Si => "SI",
        }
    }

    /// 该单位制下 LID 与子汇水区使用的面积单位
    pub fn area_units(&self) -> AreaUnits {
        match self {
            Self::Us => AreaUnits {
                device: AreaUnit::SquareFeet,
                drainage: AreaUnit::Acres,
            },
            Self::Si => AreaUnits {
                device: AreaUnit::SquareMeters,
                drainage: AreaUnit::Hectares,
            },
        }
    }

    /// 宽度单位
    pub fn width_unit(&self) -> LengthUnit {
        match self {
            Self::Us => LengthUnit::Feet,
            Self::Si => LengthUnit::Meters,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 面积单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaUnit {
    /// 英亩
    Acres,
    /// 公顷
    Hectares,
    /// 平方英尺
    SquareFeet,
    /// 平方米
    SquareMeters,
}

impl AreaUnit {
    /// 单位名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Acres => "acres",
            Self::Hectares => "hectares",
            Self::SquareFeet => "square_feet",
            Self::SquareMeters => "square_meters",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 长度单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// 英尺
    Feet,
    /// 米
    Meters,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Feet => "feet",
            Self::Meters => "meters",
        })
    }
}

/// 一组配对的面积单位：LID 单元面积单位与子汇水区面积单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaUnits {
    /// LID 单元面积单位
    pub device: AreaUnit,
    /// 子汇水区面积单位
    pub drainage: AreaUnit,
}

impl AreaUnits {
    /// 两侧使用同一单位（1:1 换算）
    pub fn identity(unit: AreaUnit) -> Self {
        Self {
            device: unit,
            drainage: unit,
        }
    }

    /// 子汇水区面积 → LID 面积
    #[inline]
    pub fn drainage_to_device(&self, area: f64) -> GsResult<f64> {
        to_device_area(area, self.drainage, self.device)
    }

    /// LID 面积 → 子汇水区面积
    #[inline]
    pub fn device_to_drainage(&self, area: f64) -> GsResult<f64> {
        to_drainage_area(area, self.device, self.drainage)
    }
}

/// 子汇水区面积换算为 LID 面积
pub fn to_device_area(area: f64, from: AreaUnit, to: AreaUnit) -> GsResult<f64> {
    Ok(area * conversion_factor(from, to)?)
}

/// LID 面积换算为子汇水区面积
pub fn to_drainage_area(area: f64, from: AreaUnit, to: AreaUnit) -> GsResult<f64> {
    Ok(area / conversion_factor(to, from)?)
}

/// 一个大面积单位包含多少个小面积单位
fn conversion_factor(large: AreaUnit, small: AreaUnit) -> GsResult<f64> {
    match (large, small) {
        (a, b) if a == b => Ok(1.0),
        (AreaUnit::Acres, AreaUnit::SquareFeet) => Ok(SQUARE_FEET_PER_ACRE),
        (AreaUnit::Hectares, AreaUnit::SquareMeters) => Ok(SQUARE_METERS_PER_HECTARE),
        (a, b) => Err(GsError::unrecognized_unit_system(format!(
            "不支持从 {a} 到 {b} 的面积换算"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_units_lookup() {
        for token in ["CFS", "GPM", "MGD", "cfs"] {
            assert_eq!(UnitSystem::from_flow_units(token).unwrap(), UnitSystem::Us);
        }
        for token in ["CMS", "LPS", "MLD"] {
            assert_eq!(UnitSystem::from_flow_units(token).unwrap(), UnitSystem::Si);
        }
    }

    #[test]
    fn test_unrecognized_flow_units() {
        let err = UnitSystem::from_flow_units("FURLONGS").unwrap_err();
        assert!(matches!(err, GsError::UnrecognizedUnitSystem { .. }));
        assert!(err.to_string().contains("FURLONGS"));
    }

    #[test]
    fn test_us_conversion() {
        let units = UnitSystem::Us.area_units();
        assert_eq!(units.drainage_to_device(1.0).unwrap(), 43560.0);
        assert_eq!(units.device_to_drainage(21780.0).unwrap(), 0.5);
    }

    #[test]
    fn test_si_conversion() {
        let units = UnitSystem::Si.area_units();
        assert_eq!(units.drainage_to_device(0.25).unwrap(), 2500.0);
        assert_eq!(units.device_to_drainage(10000.0).unwrap(), 1.0);
        assert_eq!(UnitSystem::Si.width_unit(), LengthUnit::Meters);
    }

    #[test]
    fn test_identity_conversion() {
        let units = AreaUnits::identity(AreaUnit::Acres);
        assert_eq!(units.drainage_to_device(3.5).unwrap(), 3.5);
        assert_eq!(units.device_to_drainage(3.5).unwrap(), 3.5);
    }

    #[test]
    fn test_mixed_systems_rejected() {
        assert!(to_device_area(1.0, AreaUnit::Acres, AreaUnit::SquareMeters).is_err());
        assert!(to_drainage_area(1.0, AreaUnit::SquareFeet, AreaUnit::Hectares).is_err());
    }
}
