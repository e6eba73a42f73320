// apps/gs_cli/src/main.rs

//! GreenSwmm 命令行界面
//!
//! 把 LID 布置参数注入 SWMM 输入模板，并可调用 SWMM 运行模型。
//!
//! - `inject`: 读取模板与参数，写出输入文件与布置汇总
//! - `run`: 注入后调用 SWMM 可执行文件
//! - `validate`: 检查配置、参数与模板
//! - `info`: 显示输入文件概况

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// GreenSwmm LID 注入工具
#[derive(Parser)]
#[command(name = "gs_cli", version, about = "Inject LID placements into SWMM input files")]
struct Cli {
    /// 日志级别
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 注入 LID 布置
    Inject(commands::inject::InjectArgs),
    /// 注入并运行 SWMM
    Run(commands::run::RunArgs),
    /// 检查配置、参数与模板
    Validate(commands::validate::ValidateArgs),
    /// 显示输入文件概况
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 诊断输出走 stderr，stdout 留给命令结果
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Inject(args) => commands::inject::execute(args),
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
