// crates/gs_io/src/inp/mod.rs

//! SWMM 输入文件（`.inp`）读写
//!
//! - [`document`]: 段 / 记录内存模型
//! - [`reader`]: 文本 → `Document`
//! - [`writer`]: `Document` → 对齐文本
//! - [`layout`]: 段格式与字段位置登记表

pub mod document;
pub mod layout;
pub mod reader;
pub mod writer;

pub use document::{Document, Record, Section};
pub use layout::{field_index, sections, SectionFormat};
pub use reader::{read_path, read_str};
pub use writer::{write_path, write_string};
