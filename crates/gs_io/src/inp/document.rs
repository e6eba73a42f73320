// crates/gs_io/src/inp/document.rs

//! SWMM 输入文件的内存模型
//!
//! `Document` 是按出现顺序排列的段集合，第一个段始终是无名段 `""`
//! （第一个 `[...]` 标题之前的内容）。段名统一为大写。

use super::layout::SectionFormat;

/// 一行记录：按位置排列的字段值 + 可选行尾注释
///
/// 没有字段值的记录代表空行，写出时原样保留。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// 字段值
    pub values: Vec<String>,
    /// `;` 之后的注释文本（不含 `;`）
    pub comment: Option<String>,
}

impl Record {
    /// 由字段值创建
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            comment: None,
        }
    }

    /// 空行
    pub fn blank() -> Self {
        Self::default()
    }

    /// 附加注释
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// 是否为空行（无字段值）
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.values.is_empty()
    }

    /// 获取指定位置的字段值
    #[inline]
    pub fn value(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }
}

/// 段：有序记录列表 + 标题行注释
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    format: SectionFormat,
    /// 标题行注释
    pub comment: Option<String>,
    /// 记录
    pub records: Vec<Record>,
}

impl Section {
    /// 创建空段，格式由字段布局表决定
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_uppercase();
        let format = SectionFormat::for_section(&name);
        Self {
            name,
            format,
            comment: None,
            records: Vec::new(),
        }
    }

    /// 段名（大写）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 段格式
    pub fn format(&self) -> SectionFormat {
        self.format
    }

    /// 是否为无名首段
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// 追加记录
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// 非空行记录
    pub fn data_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.is_blank())
    }

    /// 查找第 `idx` 个字段等于 `value` 的第一条记录的位置
    pub fn position_by(&self, idx: usize, value: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.value(idx) == Some(value))
    }

    /// 查找第 `idx` 个字段等于 `value` 的第一条记录
    pub fn find_by(&self, idx: usize, value: &str) -> Option<&Record> {
        self.position_by(idx, value).map(|pos| &self.records[pos])
    }

    /// 段内记录的最大字段数
    pub fn max_field_count(&self) -> usize {
        self.records.iter().map(|r| r.values.len()).max().unwrap_or(0)
    }
}

/// 整个输入文件
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只含无名首段的文档
    pub fn new() -> Self {
        Self {
            sections: vec![Section::new("")],
        }
    }

    /// 按出现顺序遍历所有段
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// 段数量（含无名首段）
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// 是否只有空的无名首段
    pub fn is_empty(&self) -> bool {
        self.sections.len() == 1 && self.sections[0].records.is_empty()
    }

    /// 是否包含该段
    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// 按名称获取段（名称不区分大小写）
    pub fn section(&self, name: &str) -> Option<&Section> {
        let name = name.to_uppercase();
        self.sections.iter().find(|s| s.name == name)
    }

    /// 获取段，不存在时追加到文档末尾
    pub fn section_or_insert(&mut self, name: &str) -> &mut Section {
        let name = name.to_uppercase();
        let pos = match self.sections.iter().position(|s| s.name == name) {
            Some(pos) => pos,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[pos]
    }

    /// 在段中追加记录（段不存在时创建）
    pub fn push_record(&mut self, section: &str, record: Record) {
        self.section_or_insert(section).push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_unnamed_section() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.section("").unwrap().is_unnamed());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_section_names_are_uppercased() {
        let mut doc = Document::new();
        doc.push_record("subcatchments", Record::new(["S1", "RG1", "J1"]));
        assert!(doc.contains_section("SUBCATCHMENTS"));
        assert!(doc.contains_section("Subcatchments"));
        assert_eq!(doc.section("SUBCATCHMENTS").unwrap().name(), "SUBCATCHMENTS");
    }

    #[test]
    fn test_section_order_preserved() {
        let mut doc = Document::new();
        doc.section_or_insert("TITLE");
        doc.section_or_insert("OPTIONS");
        doc.section_or_insert("TITLE");
        let names: Vec<_> = doc.sections().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["", "TITLE", "OPTIONS"]);
    }

    #[test]
    fn test_find_by_field() {
        let mut section = Section::new("SUBCATCHMENTS");
        section.push(Record::blank());
        section.push(Record::new(["S1", "RG1", "J1"]));
        section.push(Record::new(["S2", "RG1", "J2"]).with_comment("second"));
        assert_eq!(section.position_by(0, "S2"), Some(2));
        assert_eq!(section.find_by(2, "J1").unwrap().value(0), Some("S1"));
        assert!(section.find_by(0, "S9").is_none());
        assert_eq!(section.data_records().count(), 2);
        assert_eq!(section.max_field_count(), 3);
    }
}
