// crates/gs_inject/src/injector.rs

//! 布置流程编排
//!
//! 请求严格按输入顺序逐个处理，后面的请求看到的是前面请求调整后的父区域。
//! 每个请求：
//!
//! 1. 解析位置（名称或地图坐标）与出流目标
//! 2. 在 `[LID_CONTROLS]` 中查找控制及其类型代码
//! 3. 分配实例编号 `<type>_<k>`，按类型分派策略（不支持的类型跳过）
//! 4. 生成唯一子区域名；雨水桶取下一条屋顶参数并生成屋顶子区域名
//! 5. 拆分，写回父区域，追加屋顶、子区域与 `[SUBAREAS]` 记录
//! 6. 追加 `[LID_USAGE]` 记录并计入汇总
//!
//! 所有参数在第一次修改文档之前完成校验。

use std::collections::HashMap;

use gs_config::{DevicePlacement, DrainTarget, Location, PlacementParameters, RoofSpec};
use gs_foundation::{AreaUnits, UnitSystem};
use gs_io::inp::{field_index, sections, Document, Record};
use tracing::{debug, info, warn};

use crate::dispatch::{DeviceKind, SplitPolicy};
use crate::error::{InjectError, InjectResult};
use crate::locate::AreaLocator;
use crate::naming::unique_name;
use crate::split::{split, SplitRequest};
use crate::subcatchment::{format_number, Subcatchment, SubcatchmentFields};
use crate::summary::PlacementSummary;

/// 未指定 FLOW_UNITS 时的默认流量单位
pub const DEFAULT_FLOW_UNITS: &str = "CFS";

/// 追加记录的来源标记
const ADDED_BY: &str = "(Added by GreenSwmm.)";

/// 由 `[OPTIONS] FLOW_UNITS` 确定单位制（缺省为 CFS）
pub fn unit_system(doc: &Document) -> InjectResult<UnitSystem> {
    let name_idx = field_index(sections::OPTIONS, "Name")?;
    let value_idx = field_index(sections::OPTIONS, "Value")?;
    let flow_units = doc
        .section(sections::OPTIONS)
        .and_then(|section| {
            section.data_records().find(|r| {
                r.value(name_idx)
                    .is_some_and(|name| name.eq_ignore_ascii_case("FLOW_UNITS"))
            })
        })
        .and_then(|r| r.value(value_idx))
        .unwrap_or(DEFAULT_FLOW_UNITS);
    Ok(UnitSystem::from_flow_units(flow_units)?)
}

/// 把布置参数注入文档
///
/// `params` 中的请求被就地更新：单元数截断为实际布置数，
/// `fromImp` 按策略重算，位置改写为新建的 LID 子区域。
pub fn inject(doc: &mut Document, params: &mut PlacementParameters) -> InjectResult<PlacementSummary> {
    params.validate()?;
    let system = unit_system(doc)?;
    info!(
        "开始注入: {} 个设备请求, {} 个屋顶, 单位制 {}",
        params.lids.len(),
        params.roofs.len(),
        system
    );

    let PlacementParameters { lids, roofs } = params;
    let mut injector = Injector::new(doc, system.area_units())?;
    for (idx, lid) in lids.iter_mut().enumerate() {
        injector.place(idx, lid, roofs)?;
    }

    info!(
        "注入完成: {} 个父区域, {} 种 LID",
        injector.summary.areas().len(),
        injector.summary.device_types().len()
    );
    Ok(injector.summary)
}

/// LID 控制字段位置
struct ControlFields {
    name: usize,
    kind: usize,
}

/// `[SUBAREAS]` 字段位置
struct SubareaFields {
    subcatchment: usize,
    n_imperv: usize,
    n_perv: usize,
    s_imperv: usize,
    s_perv: usize,
    pct_zero: usize,
    route_to: usize,
}

struct Injector<'a> {
    doc: &'a mut Document,
    units: AreaUnits,
    locator: AreaLocator,
    subcatchment: SubcatchmentFields,
    control: ControlFields,
    subarea: SubareaFields,
    /// 每个 LID 控制名称的实例计数
    instances: HashMap<String, u32>,
    /// 每个屋顶类型的实例计数
    roof_instances: HashMap<String, u32>,
    /// 下一条待配对的屋顶参数
    next_roof: usize,
    summary: PlacementSummary,
}

impl<'a> Injector<'a> {
    fn new(doc: &'a mut Document, units: AreaUnits) -> InjectResult<Self> {
        let control = ControlFields {
            name: field_index(sections::LID_CONTROLS, "Name")?,
            kind: field_index(sections::LID_CONTROLS, "Type")?,
        };
        let at = |field| field_index(sections::SUBAREAS, field);
        let subarea = SubareaFields {
            subcatchment: at("Subcat")?,
            n_imperv: at("N-Imperv")?,
            n_perv: at("N-Perv")?,
            s_imperv: at("S-Imperv")?,
            s_perv: at("S-Perv")?,
            pct_zero: at("PctZero")?,
            route_to: at("RouteTo")?,
        };
        Ok(Self {
            doc,
            units,
            locator: AreaLocator::new(),
            subcatchment: SubcatchmentFields::resolve()?,
            control,
            subarea,
            instances: HashMap::new(),
            roof_instances: HashMap::new(),
            next_roof: 0,
            summary: PlacementSummary::new(),
        })
    }

    fn place(&mut self, idx: usize, lid: &mut DevicePlacement, roofs: &mut [RoofSpec]) -> InjectResult<()> {
        // 1. 位置与出流目标
        let parent_name = self.resolve_location(&mut lid.location)?;
        if let Some(DrainTarget::Map(point)) = &lid.drain_to {
            let name = self.locator.locate(self.doc, point)?;
            lid.drain_to = Some(DrainTarget::Subcatchment(name));
        }

        // 2. LID 控制与类型代码
        let code = self.control_code(&lid.lid_type)?;

        // 3. 实例编号与分派
        let counter = self.instances.entry(lid.lid_type.clone()).or_insert(0);
        *counter += 1;
        let lid_id = format!("{}_{}", lid.lid_type, counter);

        let Some(kind) = DeviceKind::from_code(&code) else {
            warn!(
                "LID 类型 \"{}\"（控制 {}）不受直接支持，跳过请求 {}；子汇水区等对象可能需要手动调整",
                code, lid.lid_type, idx
            );
            return Ok(());
        };
        let policy: SplitPolicy = kind.policy();

        // 4. 父区域与子区域名
        let (parent_pos, parent) = self.find_subcatchment(&parent_name)?;
        let child_name = unique_name(&parent_name, &lid_id, |n| self.subcatchment_exists(n))?;

        let roof = if policy.paired_roof {
            let roof_idx = self.next_roof;
            let spec = roofs
                .get_mut(roof_idx)
                .ok_or(InjectError::MissingRoof { index: roof_idx + 1 })?;
            self.next_roof += 1;

            let roof_parent = self.resolve_location(&mut spec.location)?;
            if roof_parent != parent_name {
                warn!(
                    "屋顶参数 {} 位于 {}，与雨水桶所在的 {} 不一致，屋顶仍从 {} 中划出",
                    roof_idx, roof_parent, parent_name, parent_name
                );
            }

            let counter = self.roof_instances.entry(spec.roof_type.clone()).or_insert(0);
            *counter += 1;
            let roof_id = format!("{}_{}", spec.roof_type, counter);
            let roof_name = unique_name(&parent_name, &roof_id, |n| {
                n == child_name || self.subcatchment_exists(n)
            })?;
            Some((roof_name, spec.clone()))
        } else {
            None
        };

        // 5. 拆分
        let request = SplitRequest {
            requested: lid.number,
            unit_area: lid.area,
            roof_unit_area: roof.as_ref().map(|(_, spec)| spec.area),
            child_name: &child_name,
            roof_name: roof.as_ref().map(|(name, _)| name.as_str()),
            routed_fraction: policy.routed_fraction,
            units: self.units,
        };
        let outcome = split(&parent, &request)?;

        let section = self.doc.section_or_insert(sections::SUBCATCHMENTS);
        let comment = section.records[parent_pos].comment.clone();
        section.records[parent_pos] = outcome.parent.to_record(comment);

        if let (Some(roof_sc), Some((roof_name, spec))) = (&outcome.roof, &roof) {
            section.push(roof_sc.to_record(Some(format!(
                "{} roof units. {ADDED_BY}",
                outcome.placed
            ))));
            let subarea = self.roof_subarea(roof_name, spec);
            self.doc.push_record(sections::SUBAREAS, subarea);
        }

        self.doc.push_record(
            sections::SUBCATCHMENTS,
            outcome
                .child
                .to_record(Some(format!("{} LID units. {ADDED_BY}", outcome.placed))),
        );

        // 6. 更新请求并追加 LID_USAGE
        lid.number = outcome.placed;
        lid.from_imp = outcome.from_imp;
        lid.location = Location::Subcatchment(child_name.clone());
        self.doc.push_record(sections::LID_USAGE, usage_record(lid));

        self.summary
            .record(&parent_name, &lid.lid_type, outcome.placed, outcome.excess);
        debug!(
            "请求 {}: {} 在 {} 布置 {} 个（超出 {}），子区域 {}",
            idx, lid.lid_type, parent_name, outcome.placed, outcome.excess, child_name
        );
        Ok(())
    }

    /// 把位置解析为子汇水区名称（坐标会被改写为名称）
    fn resolve_location(&mut self, location: &mut Location) -> InjectResult<String> {
        match location {
            Location::Subcatchment(name) => Ok(name.clone()),
            Location::Map(point) => {
                let name = self.locator.locate(self.doc, point)?;
                debug!("坐标 ({}, {}) 位于 {}", point.x, point.y, name);
                *location = Location::Subcatchment(name.clone());
                Ok(name)
            }
        }
    }

    /// LID 控制的类型代码
    fn control_code(&self, control: &str) -> InjectResult<String> {
        let section = self
            .doc
            .section(sections::LID_CONTROLS)
            .ok_or_else(|| InjectError::MissingSection {
                section: sections::LID_CONTROLS.to_string(),
            })?;
        let record = section
            .find_by(self.control.name, control)
            .ok_or_else(|| InjectError::DeviceControlNotFound {
                name: control.to_string(),
            })?;
        Ok(record.value(self.control.kind).unwrap_or_default().to_string())
    }

    fn find_subcatchment(&self, name: &str) -> InjectResult<(usize, Subcatchment)> {
        let not_found = || InjectError::SubcatchmentNotFound {
            name: name.to_string(),
        };
        let section = self.doc.section(sections::SUBCATCHMENTS).ok_or_else(not_found)?;
        let pos = section
            .position_by(self.subcatchment.name, name)
            .ok_or_else(not_found)?;
        let parent = Subcatchment::from_record(&section.records[pos], self.subcatchment)?;
        Ok((pos, parent))
    }

    fn subcatchment_exists(&self, name: &str) -> bool {
        self.doc
            .section(sections::SUBCATCHMENTS)
            .is_some_and(|s| s.position_by(self.subcatchment.name, name).is_some())
    }

    /// 屋顶子区域的 `[SUBAREAS]` 记录，全部面积直接排向出口
    fn roof_subarea(&self, roof_name: &str, spec: &RoofSpec) -> Record {
        let f = &self.subarea;
        let mut values = vec![String::new(); f.route_to + 1];
        values[f.subcatchment] = roof_name.to_string();
        values[f.n_imperv] = format_number(spec.n_imp);
        values[f.n_perv] = format_number(spec.n_perv);
        values[f.s_imperv] = "0".to_string();
        values[f.s_perv] = "0".to_string();
        values[f.pct_zero] = format_number(spec.pct_zero);
        values[f.route_to] = "OUTLET".to_string();
        Record::new(values)
    }
}

/// `[LID_USAGE]` 记录
///
/// 有出流目标但没有报告文件时，报告文件位置写 `*` 占位。
fn usage_record(lid: &DevicePlacement) -> Record {
    let drain_to = lid.drain_to.as_ref().map(DrainTarget::name).unwrap_or_default();
    let rpt_file = match lid.rpt_file.as_deref() {
        Some(file) if !file.is_empty() => file.to_string(),
        _ if !drain_to.is_empty() => "*".to_string(),
        _ => String::new(),
    };
    let mut values = vec![
        lid.location.subcatchment().unwrap_or_default().to_string(),
        lid.lid_type.clone(),
        lid.number.to_string(),
        format_number(lid.area),
        format_number(lid.width),
        format_number(lid.init_sat),
        format_number(lid.from_imp),
        format_number(lid.to_perv),
        rpt_file,
        drain_to.to_string(),
    ];
    while values.last().is_some_and(String::is_empty) {
        values.pop();
    }
    Record::new(values)
}
