// apps/fsi_cli/src/main.rs

//! 界面插值命令行工具
//!
//! 读取包含两区域网格与耦合配置的算例文件，构建 donor 映射并检验传递结果。
//!
//! # 子命令
//!
//! - `info`: 版本、可用方法与默认选项，可附带算例概要
//! - `validate`: 检查算例文件
//! - `map`: 构建映射并输出统计
//! - `transfer`: 传递测试场与刚体运动并报告误差

mod case_file;
mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// 跨区域界面插值命令行工具
#[derive(Parser)]
#[command(name = "fsi_cli")]
#[command(author = "MariHydro Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cross-zone FSI interface interpolation", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示信息
    Info(commands::info::InfoArgs),
    /// 验证算例
    Validate(commands::validate::ValidateArgs),
    /// 构建 donor 映射并输出统计
    Map(commands::map::MapArgs),
    /// 传递测试场与刚体运动
    Transfer(commands::transfer::TransferArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志（库 crate 的 log 记录一并输出）
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()?;

    match cli.command {
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Map(args) => commands::map::execute(args),
        Commands::Transfer(args) => commands::transfer::execute(args),
    }
}
