// crates/gs_inject/src/subcatchment.rs

//! `[SUBCATCHMENTS]` 记录的类型化视图
//!
//! 只解析拆分需要的三个数值字段（面积、不透水率、宽度），
//! 其余字段原样保留，写回时不会改变。

use gs_io::inp::{field_index, sections, Record};
use gs_io::IoError;

use crate::error::InjectResult;

/// 子汇水区字段位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcatchmentFields {
    pub name: usize,
    pub outlet: usize,
    pub area: usize,
    pub percent_impervious: usize,
    pub width: usize,
}

impl SubcatchmentFields {
    /// 从字段布局表解析
    pub fn resolve() -> InjectResult<Self> {
        let at = |field| field_index(sections::SUBCATCHMENTS, field);
        Ok(Self {
            name: at("Name")?,
            outlet: at("OutID")?,
            area: at("Area")?,
            percent_impervious: at("%Imperv")?,
            width: at("Width")?,
        })
    }

    fn required_len(&self) -> usize {
        [
            self.name,
            self.outlet,
            self.area,
            self.percent_impervious,
            self.width,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// 子汇水区
#[derive(Debug, Clone, PartialEq)]
pub struct Subcatchment {
    values: Vec<String>,
    fields: SubcatchmentFields,
    /// 面积（子汇水区面积单位）
    pub area: f64,
    /// 不透水率（%）
    pub percent_impervious: f64,
    /// 特征宽度
    pub width: f64,
}

impl Subcatchment {
    /// 从记录解析
    pub fn from_record(record: &Record, fields: SubcatchmentFields) -> InjectResult<Self> {
        let name = record.value(fields.name).unwrap_or_default().to_string();
        if record.values.len() < fields.required_len() {
            let missing = ["Name", "OutID", "Area", "%Imperv", "Width"]
                .into_iter()
                .zip([
                    fields.name,
                    fields.outlet,
                    fields.area,
                    fields.percent_impervious,
                    fields.width,
                ])
                .find(|(_, idx)| *idx >= record.values.len())
                .map(|(field, _)| field)
                .unwrap_or("Width");
            return Err(IoError::MissingValue {
                section: sections::SUBCATCHMENTS.to_string(),
                record: name,
                field: missing.to_string(),
            }
            .into());
        }

        let number = |idx: usize, field: &str| parse_number(record, idx, &name, field);
        Ok(Self {
            area: number(fields.area, "Area")?,
            percent_impervious: number(fields.percent_impervious, "%Imperv")?,
            width: number(fields.width, "Width")?,
            values: record.values.clone(),
            fields,
        })
    }

    /// 名称
    pub fn name(&self) -> &str {
        &self.values[self.fields.name]
    }

    /// 出流目标
    pub fn outlet(&self) -> &str {
        &self.values[self.fields.outlet]
    }

    /// 不透水面积（子汇水区面积单位）
    pub fn impervious_area(&self) -> f64 {
        self.area * self.percent_impervious / 100.0
    }

    /// 复制为新的子汇水区：改名、改出流目标并设置数值字段
    pub fn derive(
        &self,
        name: &str,
        outlet: &str,
        area: f64,
        percent_impervious: f64,
        width: f64,
    ) -> Self {
        let mut values = self.values.clone();
        values[self.fields.name] = name.to_string();
        values[self.fields.outlet] = outlet.to_string();
        Self {
            values,
            fields: self.fields,
            area,
            percent_impervious,
            width,
        }
    }

    /// 写回为记录
    pub fn to_record(&self, comment: Option<String>) -> Record {
        let mut values = self.values.clone();
        values[self.fields.area] = format_number(self.area);
        values[self.fields.percent_impervious] = format_number(self.percent_impervious);
        values[self.fields.width] = format_number(self.width);
        Record { values, comment }
    }
}

fn parse_number(record: &Record, idx: usize, name: &str, field: &str) -> Result<f64, IoError> {
    let raw = record.value(idx).unwrap_or_default();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IoError::InvalidNumber {
            section: sections::SUBCATCHMENTS.to_string(),
            record: name.to_string(),
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// 数值格式化（最短往返表示，负零写为 0）
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new(["S1", "RG1", "J1", "10", "50", "500", "0.5", "0"])
    }

    #[test]
    fn test_parse_fields() {
        let fields = SubcatchmentFields::resolve().unwrap();
        let sc = Subcatchment::from_record(&record(), fields).unwrap();
        assert_eq!(sc.name(), "S1");
        assert_eq!(sc.outlet(), "J1");
        assert!((sc.impervious_area() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_derive_keeps_other_fields() {
        let fields = SubcatchmentFields::resolve().unwrap();
        let sc = Subcatchment::from_record(&record(), fields).unwrap();
        let child = sc.derive("S1##PP1_1", "S1", 2.5, 0.0, 1.5);
        let rec = child.to_record(Some("note".into()));
        assert_eq!(
            rec.values,
            vec!["S1##PP1_1", "RG1", "S1", "2.5", "0", "1.5", "0.5", "0"]
        );
        assert_eq!(rec.comment.as_deref(), Some("note"));
    }

    #[test]
    fn test_short_record_rejected() {
        let fields = SubcatchmentFields::resolve().unwrap();
        let err = Subcatchment::from_record(&Record::new(["S1", "RG1", "J1", "10"]), fields)
            .unwrap_err();
        assert!(err.to_string().contains("%Imperv"));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let fields = SubcatchmentFields::resolve().unwrap();
        let bad = Record::new(["S1", "RG1", "J1", "ten", "50", "500"]);
        assert!(Subcatchment::from_record(&bad, fields).is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
    }
}
