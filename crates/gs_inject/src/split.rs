// crates/gs_inject/src/split.rs

//! 子区域拆分
//!
//! LID 单元只布置在父区域的不透水部分。可容纳的单元数为
//!
//! ```text
//! capacity = floor(不透水面积[设备单位] / (单元面积 + 单元屋顶面积))
//! ```
//!
//! 超出部分截断并作为 excess 返回。LID 子区域（以及雨水桶的屋顶子区域）
//! 从父区域中扣除，父区域的不透水率与宽度按剩余面积重算。
//! 子区域视为正方形，宽度取总面积（设备单位）的平方根。

use gs_foundation::AreaUnits;
use tracing::{debug, warn};

use crate::dispatch::RoutedFractionRule;
use crate::error::{InjectError, InjectResult};
use crate::subcatchment::Subcatchment;

/// 一次拆分的输入
#[derive(Debug, Clone)]
pub struct SplitRequest<'a> {
    /// 请求的单元数
    pub requested: u32,
    /// 单元面积（设备单位）
    pub unit_area: f64,
    /// 配对屋顶的单元面积（设备单位）
    pub roof_unit_area: Option<f64>,
    /// LID 子区域名称
    pub child_name: &'a str,
    /// 屋顶子区域名称
    pub roof_name: Option<&'a str>,
    /// fromImp 取值方式
    pub routed_fraction: RoutedFractionRule,
    /// 面积单位
    pub units: AreaUnits,
}

/// 拆分结果
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// 实际布置的单元数
    pub placed: u32,
    /// 超出容量的单元数
    pub excess: u32,
    /// 容量上限
    pub capacity: u32,
    /// 调整后的父区域
    pub parent: Subcatchment,
    /// LID 子区域
    pub child: Subcatchment,
    /// 屋顶子区域
    pub roof: Option<Subcatchment>,
    /// fromImp（%）
    pub from_imp: f64,
}

/// 执行拆分（不修改输入）
pub fn split(parent: &Subcatchment, request: &SplitRequest<'_>) -> InjectResult<SplitOutcome> {
    let units = request.units;
    let unit_area = request.unit_area;
    let roof_unit_area = match request.roof_name {
        Some(_) => request.roof_unit_area.unwrap_or(0.0),
        None => 0.0,
    };
    let footprint = unit_area + roof_unit_area;
    if !(footprint.is_finite() && footprint > 0.0) {
        return Err(InjectError::invalid(
            "area",
            footprint,
            "单元面积与屋顶面积之和必须为正",
        ));
    }

    // 1. 父区域不透水面积
    let impervious = parent.impervious_area();
    let impervious_device = units.drainage_to_device(impervious)?;

    // 2-3. 容量与超出
    let capacity = count_floor(impervious_device / footprint);
    let (placed, excess) = if request.requested > capacity {
        let excess = request.requested - capacity;
        warn!(
            "子区域 {} 请求 {} 个单元，超出容量，改为 {} 个（不透水面积 {:.4}，单元占地 {:.4}）",
            request.child_name, request.requested, capacity, impervious_device, footprint
        );
        (capacity, excess)
    } else {
        (request.requested, 0)
    };

    // 4. 总面积
    let device_total_device = f64::from(placed) * unit_area;
    let device_total = units.device_to_drainage(device_total_device)?;

    // 6. 屋顶子区域
    let (roof, roof_total) = match request.roof_name {
        Some(roof_name) => {
            let roof_total_device = f64::from(placed) * roof_unit_area;
            let roof_total = units.device_to_drainage(roof_total_device)?;
            let roof = parent.derive(
                roof_name,
                request.child_name,
                roof_total,
                100.0,
                roof_total_device.sqrt(),
            );
            (Some(roof), roof_total)
        }
        None => (None, 0.0),
    };

    // 5. LID 子区域
    let child = parent.derive(
        request.child_name,
        parent.name(),
        device_total,
        0.0,
        device_total_device.sqrt(),
    );

    // 7. 父区域
    let new_area = parent.area - device_total - roof_total;
    let remaining_impervious = impervious - device_total - roof_total;
    let percent_impervious = if new_area <= 0.0 || remaining_impervious <= 0.0 {
        0.0
    } else {
        (remaining_impervious / new_area * 100.0).clamp(0.0, 100.0)
    };
    let width = if parent.area <= 0.0 {
        parent.width
    } else {
        parent.width * (new_area / parent.area)
    };
    let adjusted = parent.derive(
        parent.name(),
        parent.outlet(),
        new_area,
        percent_impervious,
        width,
    );

    // 8. fromImp
    let from_imp = match request.routed_fraction {
        RoutedFractionRule::FromRoofArea => {
            let roof_unit_drainage = units.device_to_drainage(roof_unit_area)?;
            if impervious > 0.0 {
                100.0 * f64::from(placed) * roof_unit_drainage / impervious
            } else {
                0.0
            }
        }
        RoutedFractionRule::Fixed(value) => value,
    };

    debug!(
        "拆分 {} -> {}: 布置 {}, 子区域面积 {}, 父区域面积 {} -> {}, 不透水率 {} -> {}",
        parent.name(),
        request.child_name,
        placed,
        device_total,
        parent.area,
        new_area,
        parent.percent_impervious,
        percent_impervious
    );

    Ok(SplitOutcome {
        placed,
        excess,
        capacity,
        parent: adjusted,
        child,
        roof,
        from_imp,
    })
}

/// 向下取整为单元数，负数与 NaN 为 0
fn count_floor(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.floor() as u32
    }
}
