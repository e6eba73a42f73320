// apps/gs_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示 SWMM 输入文件的段、单位制、子汇水区与 LID 控制。

use anyhow::{Context, Result};
use clap::Args;
use gs_inject::{unit_system, DeviceKind, Subcatchment, SubcatchmentFields};
use gs_io::inp::{field_index, read_path, sections, Document};
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// SWMM 输入文件
    pub input: PathBuf,

    /// 列出全部子汇水区
    #[arg(long)]
    pub subcatchments: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== GreenSwmm 信息 ===");

    let doc = read_path(&args.input)
        .with_context(|| format!("无法读取 {}", args.input.display()))?;

    println!("=== 文件 {} ===", args.input.display());
    print_sections(&doc);
    println!();

    match unit_system(&doc) {
        Ok(system) => {
            let units = system.area_units();
            println!(
                "单位制: {} (子汇水区面积 {}, LID 面积 {}, 宽度 {})",
                system,
                units.drainage,
                units.device,
                system.width_unit()
            );
        }
        Err(e) => println!("单位制: 无法识别 ({e})"),
    }

    println!();
    print_subcatchments(&doc, args.subcatchments)?;
    println!();
    print_lid_controls(&doc)?;
    Ok(())
}

fn print_sections(doc: &Document) {
    println!("段:");
    for section in doc.sections().filter(|s| !s.is_unnamed()) {
        println!(
            "  [{}] {} 条记录",
            section.name(),
            section.data_records().count()
        );
    }
}

fn print_subcatchments(doc: &Document, list_all: bool) -> Result<()> {
    let Some(section) = doc.section(sections::SUBCATCHMENTS) else {
        println!("子汇水区: 无");
        return Ok(());
    };
    let fields = SubcatchmentFields::resolve()?;

    let mut count = 0;
    let mut total_area = 0.0;
    let mut impervious_area = 0.0;
    for record in section.data_records() {
        let sc = Subcatchment::from_record(record, fields)?;
        count += 1;
        total_area += sc.area;
        impervious_area += sc.impervious_area();
        if list_all {
            println!(
                "  {:<24} 面积 {:>10.4}  不透水 {:>6.2}%  宽度 {:>10.3}  出流 {}",
                sc.name(),
                sc.area,
                sc.percent_impervious,
                sc.width,
                sc.outlet()
            );
        }
    }

    println!(
        "子汇水区: {} 个, 总面积 {:.4}, 不透水面积 {:.4}",
        count, total_area, impervious_area
    );
    Ok(())
}

fn print_lid_controls(doc: &Document) -> Result<()> {
    let Some(section) = doc.section(sections::LID_CONTROLS) else {
        println!("LID 控制: 无");
        return Ok(());
    };
    let name_idx = field_index(sections::LID_CONTROLS, "Name")?;
    let type_idx = field_index(sections::LID_CONTROLS, "Type")?;

    println!("LID 控制:");
    let mut seen: Vec<&str> = Vec::new();
    for record in section.data_records() {
        let Some(name) = record.value(name_idx) else {
            continue;
        };
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);
        let code = record.value(type_idx).unwrap_or_default();
        let support = match DeviceKind::from_code(code) {
            Some(kind) if kind.policy().paired_roof => "支持（配对屋顶）",
            Some(_) => "支持",
            None => "不支持",
        };
        println!("  {:<16} {:<4} {}", name, code, support);
    }
    Ok(())
}
