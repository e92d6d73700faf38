// apps/fsi_cli/src/commands/transfer.rs

//! 传递检验命令
//!
//! 在构建好的映射上传递常数场、线性场和线化刚体运动，与解析值比较并报告误差。
//! 数据与位移都由区域 1 传到区域 0（一致方向）；守恒方法另外检查区域 0 到
//! 区域 1 的总量守恒。

use anyhow::{bail, Context, Result};
use clap::Args;
use fsi_config::InterpolationMethod;
use fsi_foundation::{MarkerIndex, PointIndex, VertexIndex, ZoneIndex};
use fsi_geo::Point3D;
use fsi_interp::DonorMap;
use fsi_mesh::{ZoneGeometry, ZoneGeometryMut, ZoneMesh};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::case_file::CaseFile;
use crate::commands::OptionOverrides;

/// 传递检验参数
#[derive(Args)]
pub struct TransferArgs {
    /// 算例文件路径
    pub case: PathBuf,

    #[command(flatten)]
    pub overrides: OptionOverrides,

    /// 刚体平移 (x,y,z)
    #[arg(long, value_delimiter = ',', num_args = 1..=3, default_value = "0.01,0.0,0.0")]
    pub translation: Vec<f64>,

    /// 线化转动向量 (x,y,z)，二维只使用 z 分量
    #[arg(long, value_delimiter = ',', num_args = 1..=3, default_value = "0.0,0.0,0.01")]
    pub rotation: Vec<f64>,

    /// 转动中心 (x,y,z)
    #[arg(long, value_delimiter = ',', num_args = 1..=3, default_value = "0.0,0.0,0.0")]
    pub center: Vec<f64>,

    /// 常数场与刚体运动误差上限，超出则命令失败
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// 以 JSON 输出报告
    #[arg(long)]
    pub json: bool,
}

/// 误差报告
#[derive(Debug, Clone, Serialize)]
struct TransferReport {
    method: InterpolationMethod,
    n_receivers: usize,
    constant_error: f64,
    linear_error: f64,
    displacement_error: f64,
    conservation_error: Option<f64>,
}

/// 执行传递检验命令
pub fn execute(args: TransferArgs) -> Result<()> {
    let file = CaseFile::load(&args.case)?;
    let options = args.overrides.apply(&file.case.interpolation);
    let (mut meshes, mut map) = file.prepare(&options)?;
    let (receiver, donor) = map.zones();
    info!(
        "传递检验: {} ({}), 区域 {} <- 区域 {}",
        file.display_name(&args.case),
        options.method,
        receiver,
        donor
    );

    let motion = RigidMotion {
        translation: vector(&args.translation).context("--translation")?,
        rotation: vector(&args.rotation).context("--rotation")?,
        center: vector(&args.center).context("--center")?,
        n_dim: map.n_dim(),
    };

    map.initialize_data(&[receiver, donor], 1)?;
    let constant_error = field_error(&mut map, &meshes, |_| 1.0)?;
    let linear_error = field_error(&mut map, &meshes, |c| 1.0 + 2.0 * c.x - 0.5 * c.y + 0.25 * c.z)?;
    let displacement_error = displacement_error(&map, &mut meshes, &motion)?;
    let conservation_error = match options.method {
        InterpolationMethod::ConsistentConservative => Some(conservation_error(&mut map, &meshes)?),
        InterpolationMethod::NearestNeighbor => None,
    };

    let report = TransferReport {
        method: options.method,
        n_receivers: map.zone_donors(receiver)?.n_receivers(),
        constant_error,
        linear_error,
        displacement_error,
        conservation_error,
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("报告序列化失败")?
        );
    } else {
        print_report(&report);
    }

    if let Some(tol) = args.tolerance {
        if report.constant_error > tol || report.displacement_error > tol {
            bail!(
                "传递误差超过容差 {:e}: 常数场 {:e}, 刚体运动 {:e}",
                tol,
                report.constant_error,
                report.displacement_error
            );
        }
    }
    Ok(())
}

// =============================================================================
// 解析场
// =============================================================================

/// 线化刚体运动
struct RigidMotion {
    translation: Point3D,
    rotation: Point3D,
    center: Point3D,
    n_dim: usize,
}

impl RigidMotion {
    /// 解析位移 `t + θ × (x - c)`；二维只取 θz
    fn displacement(&self, x: Point3D) -> Point3D {
        let (t, r) = (self.translation, self.rotation);
        let l = x - self.center;
        if self.n_dim == 2 {
            Point3D::new(t.x - l.y * r.z, t.y + l.x * r.z, 0.0)
        } else {
            Point3D::new(
                t.x + r.y * l.z - r.z * l.y,
                t.y + r.z * l.x - r.x * l.z,
                t.z + r.x * l.y - r.y * l.x,
            )
        }
    }
}

fn vector(values: &[f64]) -> Result<Point3D> {
    match *values {
        [x] => Ok(Point3D::new(x, 0.0, 0.0)),
        [x, y] => Ok(Point3D::new(x, y, 0.0)),
        [x, y, z] => Ok(Point3D::new(x, y, z)),
        _ => bail!("需要 1 到 3 个分量，实际 {}", values.len()),
    }
}

/// 映射中某一侧的全部界面标记
fn interface_markers(map: &DonorMap, zone: ZoneIndex) -> Vec<MarkerIndex> {
    let (zone_a, _) = map.zones();
    map.interfaces()
        .iter()
        .map(|pair| if zone == zone_a { pair.marker_a } else { pair.marker_b })
        .collect()
}

fn interface_points(map: &DonorMap, mesh: &ZoneMesh, zone: ZoneIndex) -> Vec<PointIndex> {
    interface_markers(map, zone)
        .into_iter()
        .flat_map(|m| (0..mesh.n_vertices(m)).map(move |v| mesh.vertex_point(m, VertexIndex::from_usize(v))))
        .collect()
}

// =============================================================================
// 误差
// =============================================================================

fn field_error(
    map: &mut DonorMap,
    meshes: &[ZoneMesh],
    field: impl Fn(Point3D) -> f64,
) -> Result<f64> {
    let (receiver, donor) = map.zones();
    let (mesh_r, mesh_d) = (&meshes[receiver.as_usize()], &meshes[donor.as_usize()]);
    for p in interface_points(map, mesh_d, donor) {
        map.set_data(donor, p, 0, field(mesh_d.point_coord(p)));
    }
    map.propagate_data(receiver)?;

    Ok(interface_points(map, mesh_r, receiver)
        .into_iter()
        .map(|p| (map.data(receiver, p, 0) - field(mesh_r.point_coord(p))).abs())
        .fold(0.0, f64::max))
}

fn displacement_error(map: &DonorMap, meshes: &mut [ZoneMesh], motion: &RigidMotion) -> Result<f64> {
    let (receiver, donor) = map.zones();
    {
        let mesh_d = &mut meshes[donor.as_usize()];
        for m in interface_markers(map, donor) {
            for v in 0..mesh_d.n_vertices(m) {
                let v = VertexIndex::from_usize(v);
                let x = mesh_d.vertex_coord(m, v);
                mesh_d.set_vertex_displacement(m, v, motion.displacement(x));
                mesh_d.set_vertex_rotation(m, v, motion.rotation);
            }
        }
    }
    map.propagate_displacement(meshes, receiver)?;

    let mesh_r = &meshes[receiver.as_usize()];
    let mut max_error = 0.0_f64;
    for m in interface_markers(map, receiver) {
        for v in 0..mesh_r.n_vertices(m) {
            let v = VertexIndex::from_usize(v);
            let error = mesh_r.vertex_displacement(m, v) - motion.displacement(mesh_r.vertex_coord(m, v));
            max_error = max_error.max(error.length());
        }
    }
    Ok(max_error)
}

/// 区域 0 上的节点载荷传到区域 1 后总量之差
fn conservation_error(map: &mut DonorMap, meshes: &[ZoneMesh]) -> Result<f64> {
    let (zone_a, zone_b) = map.zones();
    let points_a = interface_points(map, &meshes[zone_a.as_usize()], zone_a);
    let points_b = interface_points(map, &meshes[zone_b.as_usize()], zone_b);
    for (i, &p) in points_a.iter().enumerate() {
        map.set_data(zone_a, p, 0, 1.0 + (i % 7) as f64);
    }
    map.propagate_data(zone_b)?;

    let total_a: f64 = points_a.iter().map(|&p| map.data(zone_a, p, 0)).sum();
    let total_b: f64 = points_b.iter().map(|&p| map.data(zone_b, p, 0)).sum();
    if (total_a - total_b).abs() > 1e-9 * total_a.abs().max(1.0) {
        warn!("总量不守恒: 区域 {} 为 {}, 区域 {} 为 {}", zone_a, total_a, zone_b, total_b);
    }
    Ok((total_a - total_b).abs())
}

fn print_report(report: &TransferReport) {
    println!("=== 传递检验 ({}) ===", report.method);
    println!("接收顶点数: {}", report.n_receivers);
    println!("常数场最大误差: {:e}", report.constant_error);
    println!("线性场最大误差: {:e}", report.linear_error);
    println!("刚体运动最大误差: {:e}", report.displacement_error);
    if let Some(error) = report.conservation_error {
        println!("总量守恒误差: {:e}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_config::CaseFormat;

    fn demo() -> (Vec<ZoneMesh>, DonorMap) {
        let file = CaseFile::parse(include_str!("../../demos/plate_case.yaml"), CaseFormat::Yaml).unwrap();
        file.prepare(&file.case.interpolation).unwrap()
    }

    #[test]
    fn test_vector_parsing() {
        assert_eq!(vector(&[1.0]).unwrap(), Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(vector(&[1.0, 2.0, 3.0]).unwrap(), Point3D::new(1.0, 2.0, 3.0));
        assert!(vector(&[]).is_err());
    }

    #[test]
    fn test_demo_transfer_errors() {
        let (mut meshes, mut map) = demo();
        let (receiver, donor) = map.zones();
        map.initialize_data(&[receiver, donor], 1).unwrap();

        assert!(field_error(&mut map, &meshes, |_| 1.0).unwrap() < 1e-12);
        // 平直界面上线性场精确再现
        let linear = field_error(&mut map, &meshes, |c| 2.0 * c.x - c.y).unwrap();
        assert!(linear < 1e-12);

        let motion = RigidMotion {
            translation: Point3D::new(0.01, 0.0, 0.0),
            rotation: Point3D::new(0.0, 0.02, 0.01),
            center: Point3D::ZERO,
            n_dim: 3,
        };
        assert!(displacement_error(&map, &mut meshes, &motion).unwrap() < 1e-12);
        assert!(conservation_error(&mut map, &meshes).unwrap() < 1e-10);
    }
}
