// apps/gs_cli/src/commands/run.rs

//! 运行命令
//!
//! 先执行注入，再以 `swmm_path 输入文件 报告文件 二进制输出文件`
//! 调用 SWMM。SWMM 以非零状态退出视为失败。

use anyhow::{bail, Context, Result};
use clap::Args;
use gs_config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;
use tracing::info;

use super::inject;

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== GreenSwmm 运行 ===");

    let config = inject::load_config(&args.config)?;
    let paths = config.run_paths()?;

    let summary = inject::perform(&config)?;
    info!(
        "注入完成: {} 个父区域, {} 种 LID",
        summary.areas().len(),
        summary.device_types().len()
    );

    let start = Instant::now();
    info!(
        "调用 {} {} {} {}",
        paths.swmm.display(),
        paths.inject.output.display(),
        paths.report.display(),
        paths.binary.display()
    );
    let status = Command::new(&paths.swmm)
        .arg(&paths.inject.output)
        .arg(&paths.report)
        .arg(&paths.binary)
        .status()
        .with_context(|| format!("无法启动 SWMM: {}", paths.swmm.display()))?;

    if !status.success() {
        bail!("SWMM 运行失败: {}", status);
    }

    info!("=== 运行完成 ===");
    info!("计算时间: {:.2} s", start.elapsed().as_secs_f64());
    info!("报告文件: {}", paths.report.display());
    info!("输出文件: {}", paths.binary.display());
    Ok(())
}
