// crates/fsi_interp/tests/common/mod.rs

//! 集成测试共用的区域生成器

#![allow(dead_code)]

use fsi_config::{
    InterpolationMethod, InterpolationOptions, MarkerConfig, SearchStrategy, ZoneConfig,
};
use fsi_foundation::index::{marker, zone};
use fsi_foundation::{MarkerIndex, ZoneIndex};
use fsi_geo::Point3D;
use fsi_interp::DonorMap;
use fsi_mesh::{ElementKind, ZoneGeometry, ZoneMesh, ZoneMeshBuilder};

/// 区域 A（流体侧）
pub const ZONE_A: ZoneIndex = zone(0);
/// 区域 B（结构侧）
pub const ZONE_B: ZoneIndex = zone(1);
/// 区域 A 的界面标记（标记 0 为普通边界）
pub const MARKER_A: MarkerIndex = marker(1);
/// 区域 B 的界面标记
pub const MARKER_B: MarkerIndex = marker(0);

/// 二维波形曲线 `y = 0.2 sin(3x) + offset`，`n` 个点、`n - 1` 条线单元
///
/// 区域 A 额外带一个 "farfield" 标记。
pub fn curve(n: usize, x0: f64, x1: f64, offset: f64, with_farfield: bool) -> ZoneMesh {
    let coords: Vec<Point3D> = (0..n)
        .map(|i| {
            let x = x0 + (x1 - x0) * i as f64 / (n - 1) as f64;
            Point3D::new_2d(x, 0.2 * (3.0 * x).sin() + offset)
        })
        .collect();
    let mut builder = ZoneMeshBuilder::new(2).points(coords);
    for i in 0..n - 1 {
        builder = builder.element(ElementKind::Line, &[i, i + 1]);
    }
    if with_farfield {
        builder = builder.marker("farfield", &[0, n - 1]);
    }
    builder.marker("fsi", &(0..n).collect::<Vec<_>>()).build().unwrap()
}

/// 三维弯曲平板 `[0, 1]²`，`z = z0 + amplitude · sin(2x) cos(3y)`
///
/// `quads` 为 false 时每个四边形沿对角线剖分为两个三角形。
pub fn plate(
    nx: usize,
    ny: usize,
    z0: f64,
    amplitude: f64,
    quads: bool,
    with_farfield: bool,
) -> ZoneMesh {
    let idx = |i: usize, j: usize| j * (nx + 1) + i;
    let mut coords = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            let x = i as f64 / nx as f64;
            let y = j as f64 / ny as f64;
            coords.push(Point3D::new(x, y, z0 + amplitude * (2.0 * x).sin() * (3.0 * y).cos()));
        }
    }
    let n_points = coords.len();
    let mut builder = ZoneMeshBuilder::new(3).points(coords);
    for j in 0..ny {
        for i in 0..nx {
            let (n0, n1, n2, n3) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            if quads {
                builder = builder.element(ElementKind::Quadrilateral, &[n0, n1, n2, n3]);
            } else {
                builder = builder
                    .element(ElementKind::Triangle, &[n0, n1, n2])
                    .element(ElementKind::Triangle, &[n0, n2, n3]);
            }
        }
    }
    if with_farfield {
        builder = builder.marker("farfield", &(0..=nx).map(|i| idx(i, 0)).collect::<Vec<_>>());
    }
    builder.marker("fsi", &(0..n_points).collect::<Vec<_>>()).build().unwrap()
}

/// 整体缩放网格坐标
pub fn scaled(mesh: &ZoneMesh, factor: f64) -> ZoneMesh {
    let mut data = mesh.to_data();
    for p in &mut data.points {
        *p = *p * factor;
    }
    ZoneMesh::from_data(&data).unwrap()
}

/// 区域 A 带普通边界标记，区域 B 只有界面标记
pub fn configs() -> Vec<ZoneConfig> {
    vec![
        ZoneConfig::new(
            "fluid",
            vec![MarkerConfig::boundary("farfield"), MarkerConfig::interface("fsi", 1)],
        ),
        ZoneConfig::new("solid", vec![MarkerConfig::interface("fsi", 1)]),
    ]
}

/// 插值选项
pub fn options(method: InterpolationMethod, search: SearchStrategy) -> InterpolationOptions {
    InterpolationOptions::with_method(method).search(search)
}

/// 构建 A-B 映射
pub fn build_map(
    meshes: &[ZoneMesh],
    method: InterpolationMethod,
    search: SearchStrategy,
) -> DonorMap {
    DonorMap::build(meshes, &configs(), (ZONE_A, ZONE_B), 2, &options(method, search)).unwrap()
}

/// 二维测试区域对：A 细、B 粗，间隙 0.01
pub fn curve_pair() -> Vec<ZoneMesh> {
    vec![curve(41, 0.0, 2.0, 0.01, true), curve(13, -0.05, 2.05, 0.0, false)]
}

/// 三维测试区域对
pub fn plate_pair(quads_b: bool) -> Vec<ZoneMesh> {
    vec![plate(9, 7, 0.01, 0.05, false, true), plate(4, 5, 0.0, 0.05, quads_b, false)]
}

/// 所有组合
pub fn all_methods() -> [(InterpolationMethod, SearchStrategy); 4] {
    [
        (InterpolationMethod::NearestNeighbor, SearchStrategy::BruteForce),
        (InterpolationMethod::NearestNeighbor, SearchStrategy::RTree),
        (InterpolationMethod::ConsistentConservative, SearchStrategy::BruteForce),
        (InterpolationMethod::ConsistentConservative, SearchStrategy::RTree),
    ]
}

/// 界面标记上所有顶点的网格点
pub fn interface_points(mesh: &ZoneMesh, marker: MarkerIndex) -> Vec<fsi_foundation::PointIndex> {
    (0..mesh.n_vertices(marker))
        .map(|v| mesh.vertex_point(marker, fsi_foundation::VertexIndex::from_usize(v)))
        .collect()
}
