// crates/gs_io/src/inp/reader.rs

//! SWMM 输入文件读取
//!
//! 规则：
//! - 以 `[` 开头的行是段标题，段名取方括号内文本并转为大写；
//! - 其余行在第一个 `;` 处拆分为数据与注释，分隔段中位于双引号内的 `;` 不算；
//! - 自由文本段整行为一个值，其它段按空白拆分，双引号内的空白不拆分（引号保留）；
//! - 空白数据行保留为无字段的记录，保证写回时的空行布局。

use std::path::Path;

use tracing::debug;

use super::document::{Document, Record};
use super::layout::SectionFormat;
use crate::error::{IoError, IoResult};

/// 从文件读取
pub fn read_path(path: &Path) -> IoResult<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::file(path, e))?;
    parse_content(&content, &path.to_string_lossy())
}

/// 从字符串读取
pub fn read_str(content: &str) -> IoResult<Document> {
    parse_content(content, "<string>")
}

fn parse_content(content: &str, source: &str) -> IoResult<Document> {
    let mut doc = Document::new();
    let mut current = String::new();
    let mut format = SectionFormat::for_section(&current);

    for (line_num, line) in content.lines().enumerate() {
        if line.starts_with('[') {
            let (data, comment) = split_comment(line, SectionFormat::Delimited);
            let name = parse_header(data).ok_or_else(|| IoError::ParseError {
                file: source.to_string(),
                line: line_num + 1,
                message: format!("段标题缺少右方括号: {line}"),
            })?;
            let is_new = !doc.contains_section(&name);
            let section = doc.section_or_insert(&name);
            if is_new {
                section.comment = comment.map(str::to_string);
            }
            format = section.format();
            current = section.name().to_string();
            continue;
        }

        let (data, comment) = split_comment(line, format);
        let values = match format {
            SectionFormat::Text => {
                let data = data.trim_end();
                if data.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![data.to_string()]
                }
            }
            SectionFormat::Delimited => tokenize(data),
        };

        doc.push_record(
            &current,
            Record {
                values,
                comment: comment.map(str::to_string),
            },
        );
    }

    debug!("{}: 读取 {} 个段", source, doc.len());
    Ok(doc)
}

/// 在第一个 `;` 处拆分
///
/// 自由文本段中的双引号只是普通字符（例如英寸符号），只有分隔段才跳过引号内的 `;`。
fn split_comment(line: &str, format: SectionFormat) -> (&str, Option<&str>) {
    let track_quotes = format == SectionFormat::Delimited;
    let mut in_quote = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' if track_quotes => in_quote = !in_quote,
            ';' if !in_quote => return (&line[..idx], Some(&line[idx + 1..])),
            _ => {}
        }
    }
    (line, None)
}

/// 解析 `[NAME]`，返回大写段名
fn parse_header(data: &str) -> Option<String> {
    let start = data.find('[')?;
    let end = start + data[start..].find(']')?;
    Some(data[start + 1..end].trim().to_uppercase())
}

/// 按空白拆分，双引号包裹的片段保持为一个值（保留引号）
fn tokenize(data: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut token = String::new();
    let mut in_quote = false;

    for ch in data.chars() {
        if ch == '"' {
            in_quote = !in_quote;
            token.push(ch);
        } else if ch.is_whitespace() && !in_quote {
            if !token.is_empty() {
                values.push(std::mem::take(&mut token));
            }
        } else {
            token.push(ch);
        }
    }
    if !token.is_empty() {
        values.push(token);
    }
    values
}
