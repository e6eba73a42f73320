// apps/gs_cli/tests/cli_inspect.rs

//! validate 与 info 命令端到端测试

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TEMPLATE: &str = "\
[OPTIONS]
FLOW_UNITS CFS

[SUBCATCHMENTS]
S1 RG1 J1 10 50 500 0.5 0
S2 RG1 J2 4 25 200 0.5 0

[LID_CONTROLS]
PP1 PP
GS1 XX
";

/// 写出模板、参数与配置，返回配置文件路径
fn write_inputs(dir: &Path, params: &str) -> PathBuf {
    let template = dir.join("template.inp");
    let parameters = dir.join("params.json");
    fs::write(&template, TEMPLATE).unwrap();
    fs::write(&parameters, params).unwrap();

    let config = dir.join("greenswmm-config.json");
    let json = serde_json::json!({
        "input_template_path": template,
        "input_parameters_path": parameters,
        "input_path": dir.join("model.inp"),
    });
    fs::write(&config, json.to_string()).unwrap();
    config
}

fn gs_cli(args: &[&str], path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gs_cli"))
        .args(["--log-level", "error"])
        .args(args)
        .arg(path)
        .output()
        .unwrap()
}

/// 测试仅有警告时普通模式通过、严格模式失败
#[test]
fn test_validate_strict_fails_on_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        r#"{"lids": [{"location": {"subcatchment": "S1"}, "type": "GS1",
            "number": 1, "area": 10}]}"#,
    );

    let output = gs_cli(&["validate", "-c"], &config);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("GS1") || stdout.contains("XX"));

    let output = gs_cli(&["validate", "--strict", "-c"], &config);
    assert!(!output.status.success());
}

/// 测试引用错误使验证失败且不写出任何文件
#[test]
fn test_validate_reports_reference_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        r#"{"lids": [{"location": {"subcatchment": "S9"}, "type": "PP1",
            "number": 1, "area": 10}]}"#,
    );

    let output = gs_cli(&["validate", "-c"], &config);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("S9"));
    assert!(!dir.path().join("model.inp").exists());
}

/// 测试 info 显示段、单位制、子汇水区与 LID 控制
#[test]
fn test_info_lists_model_contents() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("model.inp");
    fs::write(&input, TEMPLATE).unwrap();

    let output = gs_cli(&["info", "--subcatchments"], &input);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("[SUBCATCHMENTS] 2 条记录"));
    assert!(stdout.contains("单位制: US"));
    assert!(stdout.contains("子汇水区: 2 个"));
    assert!(stdout.contains("S2"));
    assert!(stdout.contains("PP1"));
    assert!(stdout.contains("不支持"));
}
