// apps/gs_cli/tests/cli_inject.rs

//! 命令行端到端测试

use std::fs;
use std::process::Command;

const TEMPLATE: &str = "\
[OPTIONS]
FLOW_UNITS CFS

[SUBCATCHMENTS]
S1 RG1 J1 10 50 500 0.5 0

[LID_CONTROLS]
PP1 PP
";

/// 测试 inject 命令写出输入文件与汇总
#[test]
fn test_inject_command_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.inp");
    let params = dir.path().join("params.json");
    let output = dir.path().join("out").join("model.inp");
    let summary = dir.path().join("num_lid.csv");
    let config = dir.path().join("greenswmm-config.json");

    fs::write(&template, TEMPLATE).unwrap();
    fs::write(
        &params,
        r#"{"lids": [{"location": {"subcatchment": "S1"}, "type": "PP1",
            "number": 4, "area": 43560}]}"#,
    )
    .unwrap();
    let json = serde_json::json!({
        "input_template_path": template,
        "input_parameters_path": params,
        "input_path": output,
        "summary_path": summary,
    });
    fs::write(&config, json.to_string()).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_gs_cli"))
        .args(["--log-level", "warn", "inject", "--config"])
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("S1##PP1_1"));
    assert!(written.contains("[LID_USAGE]"));
    assert_eq!(
        fs::read_to_string(&summary).unwrap(),
        "Subcat_Name,PP1\nS1,4\nLid Sum,4\nExcess Lids,0\n"
    );
}

/// 测试引用不存在的 LID 控制时失败且不写出输入文件
#[test]
fn test_inject_command_fails_on_unknown_control() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.inp");
    let params = dir.path().join("params.json");
    let output = dir.path().join("model.inp");

    fs::write(&template, TEMPLATE).unwrap();
    fs::write(
        &params,
        r#"{"lids": [{"location": {"subcatchment": "S1"}, "type": "BC1",
            "number": 1, "area": 10}]}"#,
    )
    .unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_gs_cli"))
        .args(["inject", "-c"])
        .arg(&config)
        .arg("-i")
        .arg(&template)
        .arg("-p")
        .arg(&params)
        .arg("-o")
        .arg(&output)
        .arg("-s")
        .arg(dir.path().join("num_lid.csv"))
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!output.exists());
}
