// crates/gs_foundation/src/lib.rs

//! GreenSwmm Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型和单位换算。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `GsError`
//! - [`units`]: 单位制（US/SI）与面积单位换算
//!
//! # 示例
//!
//! ```
//! use gs_foundation::units::{AreaUnit, UnitSystem};
//!
//! let system = UnitSystem::from_flow_units("CFS").unwrap();
//! assert_eq!(system, UnitSystem::Us);
//!
//! let sqft = gs_foundation::units::to_device_area(1.0, AreaUnit::Acres, AreaUnit::SquareFeet).unwrap();
//! assert_eq!(sqft, 43560.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod units;

// 重导出常用类型
pub use error::{GsError, GsResult};
pub use units::{AreaUnit, AreaUnits, LengthUnit, UnitSystem};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{GsError, GsResult};
    pub use crate::units::{to_device_area, to_drainage_area, AreaUnit, AreaUnits, UnitSystem};
}
