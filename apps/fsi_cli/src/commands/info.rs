// apps/fsi_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、默认插值选项，以及可选的算例概要。

use anyhow::Result;
use clap::Args;
use fsi_config::{InterpolationMethod, InterpolationOptions, SearchStrategy};
use std::path::PathBuf;
use tracing::info;

use crate::case_file::CaseFile;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 算例文件路径
    #[arg(short, long)]
    pub case: Option<PathBuf>,

    /// 显示默认选项
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== FSI 界面插值信息 ===");

    if let Some(path) = &args.case {
        print_case_summary(path)?;
    }

    if args.defaults || args.case.is_none() {
        print_version();
        println!();
        print_default_options();
    }

    Ok(())
}

fn print_version() {
    println!("=== 版本 ===");
    println!("fsi_cli 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);

    println!("\n插值方法:");
    for method in [
        InterpolationMethod::NearestNeighbor,
        InterpolationMethod::ConsistentConservative,
    ] {
        println!("  - {}", method);
    }
    println!("搜索策略:");
    for search in [SearchStrategy::BruteForce, SearchStrategy::RTree] {
        println!("  - {}", search);
    }
}

fn print_default_options() {
    println!("=== 默认插值选项 ===");

    let options = InterpolationOptions::default();
    println!("方法: {}", options.method);
    println!("搜索: {}", options.search);
    println!("权重和容差: {:e}", options.weight_tolerance);
    println!("退化单元容差: {:e}", options.degenerate_tolerance);
    match options.n_variables {
        Some(n) => println!("初始变量数: {}", n),
        None => println!("初始变量数: 等于空间维度"),
    }
}

fn print_case_summary(path: &PathBuf) -> Result<()> {
    let file = CaseFile::load(path)?;
    println!("=== 算例: {} ===", file.display_name(path));
    println!(
        "插值: {} / {}",
        file.case.interpolation.method, file.case.interpolation.search
    );

    for (z, zone) in file.case.zones.iter().enumerate() {
        println!("\n区域 {} ({}): {} 个标记", z, zone.name, zone.n_markers());
        for (m, marker) in zone.markers.iter().enumerate() {
            let n_vertices = file
                .meshes
                .get(z)
                .and_then(|mesh| mesh.markers.get(m))
                .map_or(0, |data| data.points.len());
            match marker.fsi_interface {
                Some(k) => println!("  [{}] {} 界面 {}, {} 个顶点", m, marker.tag, k, n_vertices),
                None => println!("  [{}] {}, {} 个顶点", m, marker.tag, n_vertices),
            }
        }
        if let Some(mesh) = file.meshes.get(z) {
            println!(
                "  网格: {}D, {} 个点, {} 个单元",
                mesh.n_dim,
                mesh.points.len(),
                mesh.elements.len()
            );
        }
    }

    match file.case.interface_pairs() {
        Ok(pairs) => {
            println!("\n界面配对:");
            for pair in pairs {
                println!(
                    "  界面 {}: 区域 0 标记 {} <-> 区域 1 标记 {}",
                    pair.interface, pair.marker_a, pair.marker_b
                );
            }
        }
        Err(e) => println!("\n界面配对失败: {}", e),
    }
    Ok(())
}
