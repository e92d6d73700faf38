// apps/fsi_cli/src/commands/validate.rs

//! 算例验证命令
//!
//! 检查耦合配置、区域网格以及两者的一致性，最后试建 donor 映射。

use anyhow::{bail, Result};
use clap::Args;
use fsi_config::{InterpolationMethod, COUPLED_ZONES};
use fsi_foundation::index::zone;
use fsi_foundation::MarkerIndex;
use fsi_mesh::{ZoneGeometry, ZoneMesh};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::case_file::CaseFile;
use crate::commands::OptionOverrides;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 算例文件路径
    pub case: PathBuf,

    #[command(flatten)]
    pub overrides: OptionOverrides,

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
    info!("=== 算例验证: {} ===", args.case.display());

    let mut result = ValidationResult::default();
    let file = CaseFile::load(&args.case)?;
    let mut case = file.case.clone();
    case.interpolation = args.overrides.apply(&case.interpolation);

    println!("\n检查耦合配置");
    if let Err(e) = case.validate() {
        result.add_error(e.to_string());
    }
    if let Err(e) = case.interface_pairs() {
        result.add_error(e.to_string());
    }
    if result.is_ok() {
        println!("  ✓ 配置有效");
    }

    println!("\n检查区域网格");
    let meshes = check_meshes(&file, &mut result);

    if let Some(meshes) = meshes.filter(|_| result.is_ok()) {
        check_consistency(&file, &meshes, case.interpolation.method, &mut result);
        if result.is_ok() {
            check_map(&file, &meshes, &case.interpolation, &mut result);
        }
    }

    print_validation_result(&result, args.strict)
}

fn check_meshes(file: &CaseFile, result: &mut ValidationResult) -> Option<Vec<ZoneMesh>> {
    if file.meshes.len() != COUPLED_ZONES {
        result.add_error(format!(
            "需要 {} 个区域网格，实际 {}",
            COUPLED_ZONES,
            file.meshes.len()
        ));
        return None;
    }

    let mut meshes = Vec::with_capacity(COUPLED_ZONES);
    for (z, data) in file.meshes.iter().enumerate() {
        match ZoneMesh::from_data(data) {
            Ok(mesh) => {
                println!(
                    "  ✓ 区域 {}: {}D, {} 个点, {} 个单元, {} 个标记",
                    z,
                    mesh.n_dim(),
                    mesh.n_points(),
                    mesh.n_elements(),
                    mesh.n_markers()
                );
                meshes.push(mesh);
            }
            Err(e) => result.add_error(format!("区域 {} 网格无效: {}", z, e)),
        }
    }
    (meshes.len() == COUPLED_ZONES).then_some(meshes)
}

fn check_consistency(
    file: &CaseFile,
    meshes: &[ZoneMesh],
    method: InterpolationMethod,
    result: &mut ValidationResult,
) {
    if meshes[0].n_dim() != meshes[1].n_dim() {
        result.add_error(format!(
            "空间维度不一致: {}D / {}D",
            meshes[0].n_dim(),
            meshes[1].n_dim()
        ));
    }

    for (z, (mesh, config)) in meshes.iter().zip(&file.case.zones).enumerate() {
        if mesh.n_markers() != config.n_markers() {
            result.add_error(format!(
                "区域 {}: 网格有 {} 个标记，配置有 {} 个",
                z,
                mesh.n_markers(),
                config.n_markers()
            ));
            continue;
        }

        for (m, marker) in config.markers.iter().enumerate() {
            let index = MarkerIndex::from_usize(m);
            if mesh.marker_tag(index) != marker.tag {
                result.add_warning(format!(
                    "区域 {} 标记 {}: 网格名 '{}' 与配置名 '{}' 不同",
                    z,
                    m,
                    mesh.marker_tag(index),
                    marker.tag
                ));
            }
            if marker.fsi_interface.is_some() && mesh.n_vertices(index) == 0 {
                result.add_error(format!("区域 {} 界面标记 '{}' 没有顶点", z, marker.tag));
            }
        }

        if method == InterpolationMethod::ConsistentConservative && mesh.n_elements() == 0 {
            result.add_warning(format!("区域 {} 没有单元，投影将退回最近顶点", z));
        }
    }
}

fn check_map(
    file: &CaseFile,
    meshes: &[ZoneMesh],
    options: &fsi_config::InterpolationOptions,
    result: &mut ValidationResult,
) {
    println!("\n试建 donor 映射 ({})", options.method);
    let map = match file.build_map(meshes, options) {
        Ok(map) => map,
        Err(e) => {
            result.add_error(format!("{:#}", e));
            return;
        }
    };

    for stats in map.statistics() {
        if stats.n_fallbacks > 0 {
            result.add_warning(format!(
                "区域 {}: {} 个顶点使用最近顶点兜底",
                stats.zone, stats.n_fallbacks
            ));
        }
    }
    match map.check_partition_of_unity(zone(0), options.weight_tolerance) {
        Ok(bad) if !bad.is_empty() => result.add_warning(format!(
            "区域 0: {} 个顶点权重和偏离 1，例如 {}",
            bad.len(),
            bad[0]
        )),
        Ok(_) => println!("  ✓ 区域 0 权重满足单位分解"),
        Err(e) => result.add_error(e.to_string()),
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
