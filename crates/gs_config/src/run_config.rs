// crates/gs_config/src/run_config.rs

//! 运行配置
//!
//! JSON 配置文件，描述模板、参数、输出文件与 SWMM 可执行文件的位置。
//! 命令行参数可覆盖文件中的值（见 [`ConfigOverrides`]）。
//! 每个命令通过 [`RunConfig::inject_paths`] / [`RunConfig::run_paths`]
//! 取得校验过的路径集合。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "greenswmm-config.json";

/// 运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// SWMM 输入模板
    #[serde(default)]
    pub input_template_path: Option<PathBuf>,
    /// 布置参数 JSON
    #[serde(default)]
    pub input_parameters_path: Option<PathBuf>,
    /// 写出的 SWMM 输入文件
    #[serde(default)]
    pub input_path: Option<PathBuf>,
    /// SWMM 二进制输出文件
    #[serde(default)]
    pub binary_output_path: Option<PathBuf>,
    /// SWMM 报告文件（默认由二进制输出路径推出）
    #[serde(default)]
    pub report_output_path: Option<PathBuf>,
    /// 布置汇总 CSV
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
    /// SWMM 可执行文件
    #[serde(default = "default_swmm_path")]
    pub swmm_path: PathBuf,
}

fn default_summary_path() -> PathBuf {
    PathBuf::from("num_lid.csv")
}

fn default_swmm_path() -> PathBuf {
    PathBuf::from("swmm5")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_template_path: None,
            input_parameters_path: None,
            input_path: None,
            binary_output_path: None,
            report_output_path: None,
            summary_path: default_summary_path(),
            swmm_path: default_swmm_path(),
        }
    }
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// 覆盖 `input_template_path`
    pub input_template_path: Option<PathBuf>,
    /// 覆盖 `input_parameters_path`
    pub input_parameters_path: Option<PathBuf>,
    /// 覆盖 `input_path`
    pub input_path: Option<PathBuf>,
    /// 覆盖 `summary_path`
    pub summary_path: Option<PathBuf>,
}

/// 注入命令所需路径
#[derive(Debug, Clone, PartialEq)]
pub struct InjectPaths {
    /// 输入模板
    pub template: PathBuf,
    /// 布置参数
    pub parameters: PathBuf,
    /// 输出的 SWMM 输入文件
    pub output: PathBuf,
    /// 汇总 CSV
    pub summary: PathBuf,
}

/// 运行命令所需路径
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    /// 注入部分
    pub inject: InjectPaths,
    /// SWMM 可执行文件
    pub swmm: PathBuf,
    /// 报告文件
    pub report: PathBuf,
    /// 二进制输出文件
    pub binary: PathBuf,
}

impl RunConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("加载运行配置: {}", path.display());
        Ok(config)
    }

    /// 应用命令行覆盖
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(p) = overrides.input_template_path {
            self.input_template_path = Some(p);
        }
        if let Some(p) = overrides.input_parameters_path {
            self.input_parameters_path = Some(p);
        }
        if let Some(p) = overrides.input_path {
            self.input_path = Some(p);
        }
        if let Some(p) = overrides.summary_path {
            self.summary_path = p;
        }
    }

    /// 报告文件路径：未配置时将二进制输出路径的 `.out` 后缀替换为 `.rpt`
    pub fn report_path(&self) -> Option<PathBuf> {
        if let Some(report) = &self.report_output_path {
            return Some(report.clone());
        }
        let binary = self.binary_output_path.as_ref()?;
        let text = binary.to_string_lossy();
        let base = text.strip_suffix(".out").unwrap_or(&text);
        Some(PathBuf::from(format!("{base}.rpt")))
    }

    /// 校验注入所需配置：模板与参数文件必须存在，输出目录不存在时创建
    pub fn inject_paths(&self) -> ConfigResult<InjectPaths> {
        let output = require(&self.input_path, "input_path")?;
        let template = require(&self.input_template_path, "input_template_path")?;
        let parameters = require(&self.input_parameters_path, "input_parameters_path")?;

        ensure_file(&template, "input_template_path")?;
        ensure_file(&parameters, "input_parameters_path")?;
        ensure_parent_dir(&output, "input_path")?;
        ensure_parent_dir(&self.summary_path, "summary_path")?;

        Ok(InjectPaths {
            template,
            parameters,
            output,
            summary: self.summary_path.clone(),
        })
    }

    /// 解析 SWMM 可执行文件
    ///
    /// 含目录的路径必须指向已存在的文件；单独的程序名在 `PATH` 中查找。
    pub fn resolve_swmm(&self) -> ConfigResult<PathBuf> {
        let swmm = &self.swmm_path;
        if swmm.as_os_str().is_empty() {
            return Err(ConfigError::invalid("swmm_path", "", "不能为空"));
        }
        if swmm.is_absolute() || swmm.components().count() > 1 {
            ensure_file(swmm, "swmm_path")?;
            return Ok(swmm.clone());
        }

        let candidates: Vec<PathBuf> = if cfg!(windows) && swmm.extension().is_none() {
            vec![swmm.clone(), swmm.with_extension("exe")]
        } else {
            vec![swmm.clone()]
        };
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        std::env::split_paths(&search_path)
            .flat_map(|dir| candidates.iter().map(move |name| dir.join(name)))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                ConfigError::invalid("swmm_path", swmm.display(), "在 PATH 中找不到该程序")
            })
    }

    /// 校验运行所需配置（包含注入部分），在写出任何文件之前完成
    pub fn run_paths(&self) -> ConfigResult<RunPaths> {
        let binary = require(&self.binary_output_path, "binary_output_path")?;
        let swmm = self.resolve_swmm()?;
        let inject = self.inject_paths()?;
        let report = self
            .report_path()
            .ok_or_else(|| ConfigError::Missing("report_output_path".into()))?;

        ensure_parent_dir(&binary, "binary_output_path")?;
        ensure_parent_dir(&report, "report_output_path")?;

        Ok(RunPaths {
            inject,
            swmm,
            report,
            binary,
        })
    }
}

fn require(value: &Option<PathBuf>, key: &str) -> ConfigResult<PathBuf> {
    value
        .clone()
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn ensure_file(path: &Path, key: &str) -> ConfigResult<()> {
    if !path.is_file() {
        return Err(ConfigError::NotAFile {
            key: key.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// 文件所在目录不存在时创建
fn ensure_parent_dir(path: &Path, key: &str) -> ConfigResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(()),
    };
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|_| ConfigError::DirectoryUnavailable {
        key: key.to_string(),
        path: dir.to_path_buf(),
    })?;
    debug!("创建目录 {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.summary_path, PathBuf::from("num_lid.csv"));
        assert_eq!(config.swmm_path, PathBuf::from("swmm5"));
    }

    #[test]
    fn test_report_path_derived() {
        let config = RunConfig {
            binary_output_path: Some("out/model.out".into()),
            ..Default::default()
        };
        assert_eq!(config.report_path(), Some(PathBuf::from("out/model.rpt")));

        let config = RunConfig {
            binary_output_path: Some("out/model.bin".into()),
            ..Default::default()
        };
        assert_eq!(config.report_path(), Some(PathBuf::from("out/model.bin.rpt")));
    }

    #[test]
    fn test_report_path_explicit() {
        let config = RunConfig {
            binary_output_path: Some("model.out".into()),
            report_output_path: Some("custom.rpt".into()),
            ..Default::default()
        };
        assert_eq!(config.report_path(), Some(PathBuf::from("custom.rpt")));
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = RunConfig {
            input_path: Some("a.inp".into()),
            ..Default::default()
        };
        config.apply(ConfigOverrides {
            input_path: Some("b.inp".into()),
            summary_path: Some("sum.csv".into()),
            ..Default::default()
        });
        assert_eq!(config.input_path, Some(PathBuf::from("b.inp")));
        assert_eq!(config.summary_path, PathBuf::from("sum.csv"));
        assert_eq!(config.input_template_path, None);
    }

    #[test]
    fn test_swmm_path_with_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            swmm_path: dir.path().join("bin").join("swmm5"),
            ..Default::default()
        };
        let err = config.resolve_swmm().unwrap_err();
        assert_eq!(err.key(), Some("swmm_path"));

        let exe = dir.path().join("swmm5");
        std::fs::write(&exe, "").unwrap();
        let config = RunConfig {
            swmm_path: exe.clone(),
            ..Default::default()
        };
        assert_eq!(config.resolve_swmm().unwrap(), exe);
    }

    #[test]
    fn test_swmm_name_not_on_path() {
        let config = RunConfig {
            swmm_path: "greenswmm-no-such-simulator".into(),
            binary_output_path: Some("model.out".into()),
            ..Default::default()
        };
        let err = config.run_paths().unwrap_err();
        assert_eq!(err.key(), Some("swmm_path"));
    }

    #[test]
    fn test_missing_key_named() {
        let config = RunConfig::default();
        let err = config.inject_paths().unwrap_err();
        assert_eq!(err.key(), Some("input_path"));
    }
}
