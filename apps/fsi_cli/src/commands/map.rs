// apps/fsi_cli/src/commands/map.rs

//! 映射构建命令
//!
//! 构建 donor 映射并输出每个接收区域的统计。

use anyhow::{Context, Result};
use clap::Args;
use fsi_interp::{DonorMap, MapStatistics};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::case_file::CaseFile;
use crate::commands::OptionOverrides;

/// 映射构建参数
#[derive(Args)]
pub struct MapArgs {
    /// 算例文件路径
    pub case: PathBuf,

    #[command(flatten)]
    pub overrides: OptionOverrides,

    /// 以 JSON 输出统计
    #[arg(long)]
    pub json: bool,

    /// 列出每个接收顶点的 donor
    #[arg(long)]
    pub records: bool,
}

/// 执行映射命令
pub fn execute(args: MapArgs) -> Result<()> {
    let file = CaseFile::load(&args.case)?;
    let options = args.overrides.apply(&file.case.interpolation);
    info!(
        "构建 donor 映射: {} ({} / {})",
        file.display_name(&args.case),
        options.method,
        options.search
    );

    let start = Instant::now();
    let (_, map) = file.prepare(&options)?;
    let elapsed = start.elapsed();
    info!("映射构建完成, 耗时 {:.3} ms", elapsed.as_secs_f64() * 1e3);

    let statistics = map.statistics();
    if args.json {
        let text = serde_json::to_string_pretty(&statistics).context("统计序列化失败")?;
        println!("{}", text);
    } else {
        print_statistics(&map, &statistics);
    }

    if args.records {
        print_records(&map)?;
    }
    Ok(())
}

fn print_statistics(map: &DonorMap, statistics: &[MapStatistics]) {
    println!("=== donor 映射 ===");
    println!("方法: {}", map.method());
    println!("空间维度: {}D", map.n_dim());
    println!("界面数: {}", map.interfaces().len());
    for stats in statistics {
        let direction = if map.is_consistent(stats.zone).unwrap_or(false) {
            "一致"
        } else {
            "守恒"
        };
        println!("\n[{}] {}", direction, stats);
    }
}

fn print_records(map: &DonorMap) -> Result<()> {
    let (zone_a, zone_b) = map.zones();
    for zone in [zone_a, zone_b] {
        println!("\n=== 区域 {} 的 donor ===", zone);
        for rec in map.zone_donors(zone)?.records() {
            let donors: Vec<String> = rec
                .donors
                .iter()
                .map(|d| format!("{} ({}):{:.6}", d.vertex_handle(), d.point, d.weight))
                .collect();
            let mark = if rec.fallback { " (兜底)" } else { "" };
            println!("  {} 点 {} <- [{}]{}", rec.receiver, rec.point, donors.join(", "), mark);
        }
    }
    Ok(())
}
