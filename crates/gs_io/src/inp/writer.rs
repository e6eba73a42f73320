// crates/gs_io/src/inp/writer.rs

//! SWMM 输入文件写出
//!
//! 每个段内按列对齐：列宽取该列最长值，再扩展到下一个 4 的倍数减 1。
//! 读 → 写 → 读 对字段值和注释无损，空白布局会被重新计算。

use std::path::Path;

use tracing::debug;

use super::document::{Document, Section};
use super::layout::SectionFormat;
use crate::error::{IoError, IoResult};

/// 列宽对齐的制表位
const SOFT_TAB_WIDTH: usize = 4;

/// 写出到文件（整体写入）
pub fn write_path(doc: &Document, path: &Path) -> IoResult<()> {
    let content = write_string(doc);
    std::fs::write(path, content).map_err(|e| IoError::file(path, e))?;
    debug!("写出 {} ({} 个段)", path.display(), doc.len());
    Ok(())
}

/// 序列化为字符串
pub fn write_string(doc: &Document) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        write_section(section, &mut out);
    }
    out
}

fn write_section(section: &Section, out: &mut String) {
    if !section.is_unnamed() {
        let gap = if section.comment.is_some() { " " } else { "" };
        let header = format!("[{}]{gap}", section.name());
        push_line(out, &header, section.comment.as_deref());
    }

    if section.records.is_empty() {
        if !section.is_unnamed() {
            out.push('\n');
        }
        return;
    }

    let column_count = section.max_field_count();
    let rendered: Vec<Vec<String>> = section
        .records
        .iter()
        .map(|record| {
            (0..column_count)
                .map(|idx| {
                    record
                        .value(idx)
                        .map(|v| render_value(v, section.format()))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..column_count)
        .map(|col| {
            let w = rendered
                .iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0);
            w + (SOFT_TAB_WIDTH - w % SOFT_TAB_WIDTH) - 1
        })
        .collect();

    for (record, row) in section.records.iter().zip(&rendered) {
        let mut data = String::new();
        for (idx, (value, width)) in row.iter().zip(&widths).enumerate() {
            if idx > 0 {
                data.push(' ');
            }
            data.push_str(&format!("{value:<width$}"));
        }
        let mut data = data.trim_end().to_string();
        if !data.is_empty() && record.comment.is_some() {
            data.push(' ');
        }
        push_line(out, &data, record.comment.as_deref());
    }

    let ends_blank = section
        .records
        .last()
        .is_some_and(|r| r.is_blank() && r.comment.is_none());
    if !ends_blank {
        out.push('\n');
    }
}

fn push_line(out: &mut String, data: &str, comment: Option<&str>) {
    out.push_str(data);
    if let Some(comment) = comment {
        out.push(';');
        out.push_str(comment);
    }
    out.push('\n');
}

/// 空白分隔段中含空白或 `;` 的值需加引号（已加引号的保持不变）
fn render_value(value: &str, format: SectionFormat) -> String {
    match format {
        SectionFormat::Text => value.to_string(),
        SectionFormat::Delimited => {
            let needs_quotes = value.chars().any(|c| c.is_whitespace() || c == ';');
            if needs_quotes && !value.starts_with('"') {
                format!("\"{value}\"")
            } else {
                value.to_string()
            }
        }
    }
}
