// crates/gs_io/src/lib.rs

//! GreenSwmm IO 模块
//!
//! 提供 SWMM 输入文件（`.inp`）的结构化读写。
//!
//! # 模块
//!
//! - [`inp`]: 文档模型、读取器、写出器、字段布局表
//! - [`error`]: IO 错误类型
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use gs_io::inp::{reader, writer};
//!
//! let mut doc = reader::read_path(Path::new("model.inp"))?;
//! // ... 修改 doc ...
//! writer::write_path(&doc, Path::new("model_lid.inp"))?;
//! ```

pub mod error;
pub mod inp;

// 重导出常用类型
pub use error::{IoError, IoResult};
pub use inp::{Document, Record, Section, SectionFormat};
/// 类型别名简化
pub type Result<T> = IoResult<T>;
