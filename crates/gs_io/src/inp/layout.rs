// crates/gs_io/src/inp/layout.rs

//! 段格式与字段位置登记表
//!
//! SWMM 输入文件没有表头行，字段含义完全由位置决定。
//! 调用方通过 `field_index(段名, 字段名)` 获取位置，避免在代码中硬编码列号。

use crate::error::{IoError, IoResult};

/// 段的行格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionFormat {
    /// 自由文本：整行作为单个值
    Text,
    /// 空白分隔，支持双引号包裹的值
    Delimited,
}

/// 自由文本格式的段；未登记的段默认为空白分隔
const TEXT_SECTIONS: &[&str] = &["", "TITLE", "CONTROLS"];

impl SectionFormat {
    /// 查询段的格式
    pub fn for_section(section: &str) -> Self {
        if TEXT_SECTIONS.contains(&section) {
            Self::Text
        } else {
            Self::Delimited
        }
    }
}

/// 段名常量
pub mod sections {
    /// 选项
    pub const OPTIONS: &str = "OPTIONS";
    /// 子汇水区
    pub const SUBCATCHMENTS: &str = "SUBCATCHMENTS";
    /// 子区参数
    pub const SUBAREAS: &str = "SUBAREAS";
    /// LID 控制定义
    pub const LID_CONTROLS: &str = "LID_CONTROLS";
    /// LID 布置
    pub const LID_USAGE: &str = "LID_USAGE";
    /// 子汇水区多边形
    pub const POLYGONS: &str = "POLYGONS";
}

type FieldTable = &'static [(&'static str, usize)];

const FIELD_TABLE: &[(&str, FieldTable)] = &[
    (sections::OPTIONS, &[("Name", 0), ("Value", 1)]),
    (
        sections::SUBCATCHMENTS,
        &[
            ("Name", 0),
            ("Rgage", 1),
            ("OutID", 2),
            ("Area", 3),
            ("%Imperv", 4),
            ("Width", 5),
            ("Slope", 6),
            ("Clength", 7),
            ("Spack", 8),
        ],
    ),
    (
        sections::SUBAREAS,
        &[
            ("Subcat", 0),
            ("N-Imperv", 1),
            ("N-Perv", 2),
            ("S-Imperv", 3),
            ("S-Perv", 4),
            ("PctZero", 5),
            ("RouteTo", 6),
        ],
    ),
    (sections::LID_CONTROLS, &[("Name", 0), ("Type", 1)]),
    (
        sections::LID_USAGE,
        &[
            ("Subcat", 0),
            ("LID", 1),
            ("Number", 2),
            ("Area", 3),
            ("Width", 4),
            ("InitSat", 5),
            ("FromImp", 6),
            ("ToPerv", 7),
            ("RptFile", 8),
            ("DrainTo", 9),
        ],
    ),
    (sections::POLYGONS, &[("Subcat", 0), ("Xcoord", 1), ("Ycoord", 2)]),
];

/// 查询字段在记录中的位置（从 0 开始）
///
/// 未登记的 (段, 字段) 属于程序或数据错误，返回 [`IoError::UnknownField`]。
pub fn field_index(section: &str, field: &str) -> IoResult<usize> {
    FIELD_TABLE
        .iter()
        .find(|(name, _)| *name == section)
        .and_then(|(_, fields)| fields.iter().find(|(name, _)| *name == field))
        .map(|(_, idx)| *idx)
        .ok_or_else(|| IoError::UnknownField {
            section: section.to_string(),
            field: field.to_string(),
        })
}
