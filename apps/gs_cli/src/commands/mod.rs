// apps/gs_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod inject;
pub mod run;
pub mod validate;
