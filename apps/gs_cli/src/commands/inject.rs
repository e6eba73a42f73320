// apps/gs_cli/src/commands/inject.rs

//! 注入命令
//!
//! 读取模板与布置参数，注入后写出 SWMM 输入文件和布置汇总 CSV。
//! 任何一步失败都不会写出输入文件。

use anyhow::{Context, Result};
use clap::Args;
use gs_config::{ConfigOverrides, InjectPaths, PlacementParameters, RunConfig, DEFAULT_CONFIG_FILE};
use gs_inject::PlacementSummary;
use gs_io::inp::{read_path, write_path};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// 注入参数
#[derive(Args)]
pub struct InjectArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// 布置参数文件（覆盖 input_parameters_path）
    #[arg(short, long)]
    pub parameters: Option<PathBuf>,

    /// 输入模板（覆盖 input_template_path）
    #[arg(short = 'i', long)]
    pub template: Option<PathBuf>,

    /// 输出的 SWMM 输入文件（覆盖 input_path）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 布置汇总 CSV（覆盖 summary_path）
    #[arg(short, long)]
    pub summary: Option<PathBuf>,
}

/// 执行注入命令
pub fn execute(args: InjectArgs) -> Result<()> {
    info!("=== GreenSwmm 注入 ===");

    let mut config = load_config(&args.config)?;
    config.apply(ConfigOverrides {
        input_template_path: args.template,
        input_parameters_path: args.parameters,
        input_path: args.output,
        summary_path: args.summary,
    });

    let summary = perform(&config)?;
    print_summary(&summary);
    Ok(())
}

/// 加载运行配置
pub fn load_config(path: &Path) -> Result<RunConfig> {
    RunConfig::load(path).with_context(|| format!("无法加载配置文件 {}", path.display()))
}

/// 按配置执行注入
pub fn perform(config: &RunConfig) -> Result<PlacementSummary> {
    let paths: InjectPaths = config.inject_paths()?;
    let start = Instant::now();

    let mut doc = read_path(&paths.template)
        .with_context(|| format!("无法读取模板 {}", paths.template.display()))?;
    let mut params = PlacementParameters::load(&paths.parameters)?;

    let summary = gs_inject::inject(&mut doc, &mut params)?;

    write_path(&doc, &paths.output)
        .with_context(|| format!("无法写出输入文件 {}", paths.output.display()))?;
    summary.write_csv(&paths.summary)?;

    info!(
        "写出 {}，耗时 {:.3} s",
        paths.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}

fn print_summary(summary: &PlacementSummary) {
    println!("\n=== 布置汇总 ===");
    if summary.is_empty() {
        println!("未布置任何 LID");
        return;
    }
    for device_type in summary.device_types() {
        println!(
            "  {:<16} 布置 {:>6}  超出 {:>6}",
            device_type,
            summary.total_placed(device_type),
            summary.total_excess(device_type)
        );
    }
}
