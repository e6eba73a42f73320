// crates/gs_inject/src/summary.rs

//! 布置汇总
//!
//! 按（父区域, LID 类型）累计实际布置的单元数，按类型累计超出数。
//! CSV 输出格式：
//!
//! ```text
//! Subcat_Name,RB1,PP1
//! S1,8,0
//! S2,0,5
//! Lid Sum,8,5
//! Excess Lids,0,15
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::InjectResult;

/// 布置汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementSummary {
    device_types: Vec<String>,
    areas: Vec<String>,
    placed: HashMap<(String, String), u64>,
    excess: HashMap<String, u64>,
}

impl PlacementSummary {
    /// 创建空汇总
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次布置
    pub fn record(&mut self, area: &str, device_type: &str, placed: u32, excess: u32) {
        if !self.areas.iter().any(|a| a == area) {
            self.areas.push(area.to_string());
        }
        if !self.device_types.iter().any(|t| t == device_type) {
            self.device_types.push(device_type.to_string());
        }
        *self
            .placed
            .entry((area.to_string(), device_type.to_string()))
            .or_default() += u64::from(placed);
        *self.excess.entry(device_type.to_string()).or_default() += u64::from(excess);
    }

    /// 是否没有任何记录
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// 父区域（首次出现顺序）
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// LID 类型（首次出现顺序）
    pub fn device_types(&self) -> &[String] {
        &self.device_types
    }

    /// 某区域某类型的布置数
    pub fn placed(&self, area: &str, device_type: &str) -> u64 {
        self.placed
            .get(&(area.to_string(), device_type.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// 某类型的布置总数
    pub fn total_placed(&self, device_type: &str) -> u64 {
        self.areas
            .iter()
            .map(|area| self.placed(area, device_type))
            .sum()
    }

    /// 某类型的超出总数
    pub fn total_excess(&self, device_type: &str) -> u64 {
        self.excess.get(device_type).copied().unwrap_or(0)
    }

    /// 写出 CSV 文件
    pub fn write_csv(&self, path: &Path) -> InjectResult<()> {
        let writer = csv::Writer::from_path(path)?;
        self.write_records(writer)?;
        info!("写出布置汇总: {}", path.display());
        Ok(())
    }

    /// 写出 CSV 到任意输出
    pub fn write_to<W: Write>(&self, out: W) -> InjectResult<()> {
        self.write_records(csv::Writer::from_writer(out))
    }

    fn write_records<W: Write>(&self, mut writer: csv::Writer<W>) -> InjectResult<()> {
        let mut header = vec!["Subcat_Name".to_string()];
        header.extend(self.device_types.iter().cloned());
        writer.write_record(&header)?;

        for area in &self.areas {
            let mut row = vec![area.clone()];
            row.extend(
                self.device_types
                    .iter()
                    .map(|t| self.placed(area, t).to_string()),
            );
            writer.write_record(&row)?;
        }

        let mut sum = vec!["Lid Sum".to_string()];
        sum.extend(self.device_types.iter().map(|t| self.total_placed(t).to_string()));
        writer.write_record(&sum)?;

        let mut excess = vec!["Excess Lids".to_string()];
        excess.extend(self.device_types.iter().map(|t| self.total_excess(t).to_string()));
        writer.write_record(&excess)?;

        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregates_by_area_and_type() {
        let mut summary = PlacementSummary::new();
        summary.record("S1", "RB1", 8, 0);
        summary.record("S2", "PP1", 5, 15);
        summary.record("S1", "RB1", 2, 1);

        assert_eq!(summary.areas(), ["S1", "S2"]);
        assert_eq!(summary.device_types(), ["RB1", "PP1"]);
        assert_eq!(summary.placed("S1", "RB1"), 10);
        assert_eq!(summary.placed("S1", "PP1"), 0);
        assert_eq!(summary.total_excess("RB1"), 1);
        assert_eq!(summary.total_excess("PP1"), 15);
    }

    #[test]
    fn test_csv_layout() {
        let mut summary = PlacementSummary::new();
        summary.record("S1", "RB1", 8, 0);
        summary.record("S2", "PP1", 5, 15);

        let mut buf = Vec::new();
        summary.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Subcat_Name,RB1,PP1\nS1,8,0\nS2,0,5\nLid Sum,8,5\nExcess Lids,0,15\n"
        );
    }

    #[test]
    fn test_empty_summary_has_header_and_totals() {
        let mut buf = Vec::new();
        PlacementSummary::new().write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Subcat_Name\nLid Sum\nExcess Lids\n");
    }
}
