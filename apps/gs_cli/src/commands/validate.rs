// apps/gs_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查运行配置、布置参数与输入模板，不写出任何文件。

use anyhow::{bail, Result};
use clap::Args;
use gs_config::{Location, PlacementParameters, RunConfig, DEFAULT_CONFIG_FILE};
use gs_geo::AreaPolygons;
use gs_inject::locate::extract_polygons;
use gs_inject::{unit_system, DeviceKind, SubcatchmentFields};
use gs_io::inp::{field_index, read_path, sections, Document};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== GreenSwmm 配置验证 ===");

    let mut result = ValidationResult::default();

    println!("\n检查配置文件: {}", args.config.display());
    let config = match RunConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            result.add_error(e.to_string());
            return print_validation_result(&result, args.strict);
        }
    };
    validate_config(&config, &mut result);

    let template = config
        .input_template_path
        .as_deref()
        .and_then(|path| validate_template(path, &mut result));
    let params = config
        .input_parameters_path
        .as_deref()
        .and_then(|path| validate_parameters(path, &mut result));

    if let (Some(doc), Some(params)) = (&template, &params) {
        validate_references(doc, params, &mut result);
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(config: &RunConfig, result: &mut ValidationResult) {
    let required = [
        ("input_template_path", &config.input_template_path),
        ("input_parameters_path", &config.input_parameters_path),
        ("input_path", &config.input_path),
    ];
    for (key, value) in required {
        if value.is_none() {
            result.add_error(format!("缺少配置项: {key}"));
        }
    }

    for (key, value) in [
        ("input_template_path", &config.input_template_path),
        ("input_parameters_path", &config.input_parameters_path),
    ] {
        if let Some(path) = value {
            if !path.is_file() {
                result.add_error(format!("{key}: \"{}\" 不是文件", path.display()));
            }
        }
    }

    if config.binary_output_path.is_none() {
        result.add_warning("未配置 binary_output_path，无法执行 run 命令");
    }
    if let Err(e) = config.resolve_swmm() {
        result.add_warning(format!("无法执行 run 命令: {e}"));
    }

    println!("  ✓ 配置文件格式有效");
}

fn validate_template(path: &Path, result: &mut ValidationResult) -> Option<Document> {
    println!("\n检查输入模板: {}", path.display());

    let doc = match read_path(path) {
        Ok(doc) => doc,
        Err(e) => {
            result.add_error(format!("模板解析错误: {e}"));
            return None;
        }
    };

    match unit_system(&doc) {
        Ok(system) => println!("  单位制: {system}"),
        Err(e) => result.add_error(e.to_string()),
    }

    if !doc.contains_section(sections::SUBCATCHMENTS) {
        result.add_error("模板中没有 [SUBCATCHMENTS] 段");
    }
    if !doc.contains_section(sections::LID_CONTROLS) {
        result.add_error("模板中没有 [LID_CONTROLS] 段");
    }

    match extract_polygons(&doc) {
        Ok(polygons) => {
            for (name, polygon) in polygons.iter() {
                if !polygon.is_valid() {
                    result.add_warning(format!("子汇水区 {name} 的多边形顶点少于 3 个"));
                }
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }

    println!("  ✓ 模板格式有效");
    Some(doc)
}

fn validate_parameters(path: &Path, result: &mut ValidationResult) -> Option<PlacementParameters> {
    println!("\n检查布置参数: {}", path.display());

    match PlacementParameters::load(path) {
        Ok(params) => {
            println!(
                "  ✓ {} 个设备请求, {} 个屋顶",
                params.lids.len(),
                params.roofs.len()
            );
            Some(params)
        }
        Err(e) => {
            result.add_error(e.to_string());
            None
        }
    }
}

/// 检查参数引用的子汇水区与 LID 控制是否存在
fn validate_references(doc: &Document, params: &PlacementParameters, result: &mut ValidationResult) {
    let polygons = extract_polygons(doc).unwrap_or_else(|_| AreaPolygons::new());
    let name_idx = SubcatchmentFields::resolve().map(|f| f.name).unwrap_or(0);
    let subcatchment_exists = |name: &str| {
        doc.section(sections::SUBCATCHMENTS)
            .is_some_and(|s| s.find_by(name_idx, name).is_some())
    };
    let check_location = |location: &Location, label: &str, result: &mut ValidationResult| {
        match location {
            Location::Subcatchment(name) => {
                if !subcatchment_exists(name) {
                    result.add_error(format!("{label}: 子汇水区 \"{name}\" 不存在"));
                }
            }
            Location::Map(point) => {
                if let Err(e) = polygons.locate(point) {
                    result.add_error(format!("{label}: {e}"));
                }
            }
        }
    };

    let control_name = field_index(sections::LID_CONTROLS, "Name").unwrap_or(0);
    let control_type = field_index(sections::LID_CONTROLS, "Type").unwrap_or(1);
    let controls = doc.section(sections::LID_CONTROLS);

    let mut rain_barrels = 0;
    for (idx, lid) in params.lids.iter().enumerate() {
        let label = format!("lids[{idx}]");
        check_location(&lid.location, &label, result);

        let Some(record) = controls.and_then(|s| s.find_by(control_name, &lid.lid_type)) else {
            result.add_error(format!("{label}: LID 控制 \"{}\" 未定义", lid.lid_type));
            continue;
        };
        let code = record.value(control_type).unwrap_or_default();
        match DeviceKind::from_code(code) {
            Some(kind) if kind.policy().paired_roof => rain_barrels += 1,
            Some(_) => {}
            None => result.add_warning(format!(
                "{label}: LID 类型 \"{code}\" 不受直接支持，将被跳过"
            )),
        }
    }

    for (idx, roof) in params.roofs.iter().enumerate() {
        check_location(&roof.location, &format!("roofs[{idx}]"), result);
    }

    if rain_barrels > params.roofs.len() {
        result.add_error(format!(
            "{} 个雨水桶请求，但只有 {} 条屋顶参数",
            rain_barrels,
            params.roofs.len()
        ));
    } else if rain_barrels < params.roofs.len() {
        result.add_warning(format!(
            "{} 条屋顶参数未被使用",
            params.roofs.len() - rain_barrels
        ));
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
