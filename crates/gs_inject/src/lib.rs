// crates/gs_inject/src/lib.rs

//! GreenSwmm LID 注入
//!
//! 把 LID 布置请求写入 SWMM 输入文档：每个请求从父子汇水区的不透水面积中
//! 划出一个子区域承载 LID 单元（雨水桶还会划出配对的屋顶子区域），
//! 父区域的面积、不透水率与宽度随之调整，并追加 `[LID_USAGE]` 记录。
//!
//! # 模块
//!
//! - [`subcatchment`]: `[SUBCATCHMENTS]` 记录的类型化视图
//! - [`split`]: 子区域拆分计算（纯函数）
//! - [`dispatch`]: LID 类型代码 → 拆分策略
//! - [`naming`]: 唯一子区域名生成
//! - [`locate`]: 地图坐标 → 子汇水区
//! - [`injector`]: 布置流程编排
//! - [`summary`]: 布置汇总与 CSV 输出
//!
//! # 示例
//!
//! ```rust,ignore
//! use gs_inject::inject;
//!
//! let mut doc = gs_io::inp::read_path(Path::new("template.inp"))?;
//! let mut params = PlacementParameters::load(Path::new("params.json"))?;
//! let summary = inject(&mut doc, &mut params)?;
//! summary.write_csv(Path::new("num_lid.csv"))?;
//! ```

pub mod dispatch;
pub mod error;
pub mod injector;
pub mod locate;
pub mod naming;
pub mod split;
pub mod subcatchment;
pub mod summary;

pub use dispatch::{DeviceKind, RoutedFractionRule, SplitPolicy};
pub use error::{InjectError, InjectResult};
pub use injector::{inject, unit_system};
pub use split::{split, SplitOutcome, SplitRequest};
pub use subcatchment::{Subcatchment, SubcatchmentFields};
pub use summary::PlacementSummary;
