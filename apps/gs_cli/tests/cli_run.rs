// apps/gs_cli/tests/cli_run.rs

//! run 命令端到端测试
//!
//! 用 shell 脚本代替 SWMM 可执行文件，记录调用参数或返回指定状态。

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TEMPLATE: &str = "\
[OPTIONS]
FLOW_UNITS CFS

[SUBCATCHMENTS]
S1 RG1 J1 10 50 500 0.5 0

[LID_CONTROLS]
PP1 PP
";

const PARAMS: &str = r#"{"lids": [{"location": {"subcatchment": "S1"}, "type": "PP1",
    "number": 2, "area": 43560}]}"#;

/// 写出可执行脚本
fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// 准备模板、参数与配置文件，返回配置文件路径
fn write_config(dir: &Path, swmm: &Path) -> PathBuf {
    let template = dir.join("template.inp");
    let params = dir.join("params.json");
    fs::write(&template, TEMPLATE).unwrap();
    fs::write(&params, PARAMS).unwrap();

    let config = dir.join("greenswmm-config.json");
    let json = serde_json::json!({
        "input_template_path": template,
        "input_parameters_path": params,
        "input_path": dir.join("out").join("model.inp"),
        "binary_output_path": dir.join("out").join("model.out"),
        "summary_path": dir.join("out").join("num_lid.csv"),
        "swmm_path": swmm,
    });
    fs::write(&config, json.to_string()).unwrap();
    config
}

fn run_cli(config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gs_cli"))
        .args(["--log-level", "warn", "run", "-c"])
        .arg(config)
        .output()
        .unwrap()
}

/// 测试 SWMM 按 输入 报告 二进制输出 的顺序被调用，报告路径由 .out 推出
#[test]
fn test_run_passes_input_report_binary() {
    let dir = tempfile::tempdir().unwrap();
    let argv_file = dir.path().join("argv.txt");
    let swmm = dir.path().join("swmm5");
    write_script(
        &swmm,
        &format!("printf '%s\\n' \"$@\" > '{}'", argv_file.display()),
    );
    let config = write_config(dir.path(), &swmm);

    let output = run_cli(&config);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out = dir.path().join("out");
    let argv = fs::read_to_string(&argv_file).unwrap();
    let args: Vec<&str> = argv.lines().collect();
    assert_eq!(
        args,
        vec![
            out.join("model.inp").to_str().unwrap(),
            out.join("model.rpt").to_str().unwrap(),
            out.join("model.out").to_str().unwrap(),
        ]
    );
    assert!(fs::read_to_string(out.join("model.inp"))
        .unwrap()
        .contains("S1##PP1_1"));
}

/// 测试 SWMM 以非零状态退出时命令失败
#[test]
fn test_run_fails_on_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let swmm = dir.path().join("swmm5");
    write_script(&swmm, "exit 1");
    let config = write_config(dir.path(), &swmm);

    let output = run_cli(&config);
    assert!(!output.status.success());
}

/// 测试找不到 SWMM 时在写出任何文件之前失败
#[test]
fn test_run_checks_simulator_before_injecting() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &dir.path().join("missing").join("swmm5"));

    let output = run_cli(&config);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("swmm_path"));
    assert!(!dir.path().join("out").join("model.inp").exists());
    assert!(!dir.path().join("out").join("num_lid.csv").exists());
}
