// crates/gs_config/src/lib.rs

//! GreenSwmm Config Layer
//!
//! 配置层，负责运行配置文件和 LID 布置参数文件的加载与校验。
//! 所有校验都在修改任何输入文件之前完成。
//!
//! # 模块概览
//!
//! - [`run_config`]: RunConfig 运行配置（文件路径、SWMM 可执行文件）
//! - [`parameters`]: PlacementParameters LID 布置请求与屋顶参数
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! gs_cli       ─> uses RunConfig, PlacementParameters
//! gs_inject    ─> consumes PlacementParameters
//! gs_config    ─> RunConfig, PlacementParameters (本层)
//! gs_geo / gs_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod parameters;
pub mod run_config;

// 重导出核心类型
pub use error::{ConfigError, ConfigResult};
pub use parameters::{DevicePlacement, DrainTarget, Location, PlacementParameters, RoofSpec};
pub use run_config::{ConfigOverrides, InjectPaths, RunConfig, RunPaths, DEFAULT_CONFIG_FILE};
