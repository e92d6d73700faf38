// crates/fsi_interp/tests/map_properties.rs

//! donor 映射与数据传递的性质测试
//!
//! # 测试覆盖
//!
//! - 每个界面顶点至少一个 donor，且 donor 位于对方区域
//! - 一致方向的单位分解
//! - 常数场不变
//! - 数据传递幂等
//! - 守恒方向总量守恒

mod common;

use common::*;
use fsi_config::{InterpolationMethod, SearchStrategy};
use fsi_foundation::PointIndex;
use fsi_interp::DonorMap;
use fsi_geo::Point3D;
use fsi_mesh::{ZoneGeometry, ZoneMesh};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// 辅助函数
// ============================================================================

fn pairs() -> Vec<(&'static str, Vec<ZoneMesh>)> {
    vec![
        ("curve", curve_pair()),
        ("plate-tri", plate_pair(false)),
        ("plate-quad", plate_pair(true)),
    ]
}

fn fill_random(map: &mut DonorMap, zone: fsi_foundation::ZoneIndex, points: &[PointIndex], rng: &mut StdRng) {
    let n_var = map.n_variables(zone);
    for &p in points {
        let row: Vec<f64> = (0..n_var).map(|_| rng.gen_range(-5.0..5.0)).collect();
        map.set_data_var(zone, p, &row);
    }
}

fn sum_over(map: &DonorMap, zone: fsi_foundation::ZoneIndex, points: &[PointIndex], var: usize) -> f64 {
    points.iter().map(|&p| map.data(zone, p, var)).sum()
}

// ============================================================================
// 结构不变量
// ============================================================================

#[test]
fn test_every_vertex_has_cross_zone_donors() {
    for (name, meshes) in pairs() {
        for (method, search) in all_methods() {
            let map = build_map(&meshes, method, search);
            for (zone, other, other_marker) in [(ZONE_A, ZONE_B, MARKER_B), (ZONE_B, ZONE_A, MARKER_A)] {
                let donors = map.zone_donors(zone).unwrap();
                assert_eq!(donors.donor_zone, other);
                let other_mesh = &meshes[other.as_usize()];
                for rec in donors.records() {
                    assert!(!rec.donors.is_empty(), "{} {}: {} 没有 donor", name, method, rec.receiver);
                    for d in &rec.donors {
                        // donor 顶点位于对方区域的界面标记上，且与网格点一致
                        let handle = d.vertex_handle();
                        assert_eq!(handle.zone, other);
                        assert_ne!(handle.zone, rec.receiver.zone);
                        assert_eq!(handle.marker, other_marker);
                        assert_eq!(other_mesh.vertex_point(handle.marker, handle.vertex), d.point);
                        assert!(d.weight >= 0.0 && d.weight <= 1.0 + 1e-12);
                    }
                }
            }
        }
    }
}

#[test]
fn test_nearest_neighbor_exactly_one_unit_donor() {
    for (_, meshes) in pairs() {
        let map = build_map(&meshes, InterpolationMethod::NearestNeighbor, SearchStrategy::RTree);
        for stats in map.statistics() {
            assert_eq!(stats.min_donors, 1);
            assert_eq!(stats.max_donors, 1);
            assert_eq!(stats.min_weight_sum, 1.0);
            assert_eq!(stats.max_weight_sum, 1.0);
            assert_eq!(stats.n_fallbacks, 0);
        }
    }
}

#[test]
fn test_partition_of_unity() {
    for (name, meshes) in pairs() {
        for (method, search) in all_methods() {
            let map = build_map(&meshes, method, search);
            assert!(
                map.check_partition_of_unity(ZONE_A, 1e-12).unwrap().is_empty(),
                "{} {}",
                name,
                method
            );
            assert!(map.is_consistent(ZONE_A).unwrap());
            if method == InterpolationMethod::NearestNeighbor {
                assert!(map.check_partition_of_unity(ZONE_B, 1e-12).unwrap().is_empty());
            }
        }
    }
}

#[test]
fn test_conservative_uses_element_donors() {
    let meshes = plate_pair(true);
    let map = build_map(
        &meshes,
        InterpolationMethod::ConsistentConservative,
        SearchStrategy::BruteForce,
    );
    let [stats_a, stats_b] = map.statistics();
    // 细网格顶点大多落在粗网格单元内部
    assert!(stats_a.max_donors >= 3);
    assert!(stats_a.mean_donors() > 1.5);
    assert_eq!(stats_a.n_fallbacks, 0);
    // 粗网格每个顶点都被细网格引用
    assert_eq!(stats_b.n_fallbacks, 0);
    assert!(!map.is_consistent(ZONE_B).unwrap());
}

#[test]
fn test_conservative_projection_independent_of_scale() {
    for h in [1.0, 1e-1, 1e-6, 1e-9] {
        for quads in [false, true] {
            let meshes: Vec<ZoneMesh> = plate_pair(quads).iter().map(|m| scaled(m, h)).collect();
            let map = build_map(
                &meshes,
                InterpolationMethod::ConsistentConservative,
                SearchStrategy::RTree,
            );
            let [stats_a, _] = map.statistics();
            assert_eq!(stats_a.n_fallbacks, 0, "h = {:e}", h);
            assert!(stats_a.max_donors >= 3, "h = {:e}", h);
            assert!(stats_a.mean_donors() > 1.5, "h = {:e}", h);
            assert!(map.check_partition_of_unity(ZONE_A, 1e-12).unwrap().is_empty());
        }
    }
}

// ============================================================================
// 数据传递
// ============================================================================

#[test]
fn test_constant_field_invariance() {
    for (name, meshes) in pairs() {
        for (method, search) in all_methods() {
            let mut map = build_map(&meshes, method, search);
            let n_var = map.n_variables(ZONE_B);
            let constant: Vec<f64> = (0..n_var).map(|i| 1.5 + i as f64).collect();
            for p in interface_points(&meshes[1], MARKER_B) {
                map.set_data_var(ZONE_B, p, &constant);
            }
            map.propagate_data(ZONE_A).unwrap();
            for p in interface_points(&meshes[0], MARKER_A) {
                for (var, &c) in constant.iter().enumerate() {
                    let got = map.data(ZONE_A, p, var);
                    assert!((got - c).abs() < 1e-12, "{} {}: {} != {}", name, method, got, c);
                }
            }

            if method == InterpolationMethod::NearestNeighbor {
                for p in interface_points(&meshes[0], MARKER_A) {
                    map.set_data_var(ZONE_A, p, &constant);
                }
                map.propagate_data(ZONE_B).unwrap();
                for p in interface_points(&meshes[1], MARKER_B) {
                    assert_eq!(map.data_var(ZONE_B, p), constant.as_slice());
                }
            }
        }
    }
}

#[test]
fn test_propagate_data_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    for (_, meshes) in pairs() {
        for (method, search) in all_methods() {
            let mut map = build_map(&meshes, method, search);
            let points_a = interface_points(&meshes[0], MARKER_A);
            let points_b = interface_points(&meshes[1], MARKER_B);
            fill_random(&mut map, ZONE_B, &points_b, &mut rng);
            // 接收方旧值不影响结果
            fill_random(&mut map, ZONE_A, &points_a, &mut rng);

            map.propagate_data(ZONE_A).unwrap();
            let first: Vec<Vec<f64>> = points_a.iter().map(|&p| map.data_var(ZONE_A, p).to_vec()).collect();
            map.propagate_data(ZONE_A).unwrap();
            let second: Vec<Vec<f64>> = points_a.iter().map(|&p| map.data_var(ZONE_A, p).to_vec()).collect();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_conservative_transfer_conserves_total() {
    let mut rng = StdRng::seed_from_u64(42);
    for (name, meshes) in pairs() {
        for search in [SearchStrategy::BruteForce, SearchStrategy::RTree] {
            let mut map = build_map(&meshes, InterpolationMethod::ConsistentConservative, search);
            let points_a = interface_points(&meshes[0], MARKER_A);
            let points_b = interface_points(&meshes[1], MARKER_B);

            // 区域 A 上的节点力
            fill_random(&mut map, ZONE_A, &points_a, &mut rng);
            map.propagate_data(ZONE_B).unwrap();

            for var in 0..map.n_variables(ZONE_A) {
                let total_a = sum_over(&map, ZONE_A, &points_a, var);
                let total_b = sum_over(&map, ZONE_B, &points_b, var);
                assert!(
                    (total_a - total_b).abs() < 1e-10 * (1.0 + total_a.abs()),
                    "{}: {} != {}",
                    name,
                    total_a,
                    total_b
                );
            }
        }
    }
}

#[test]
fn test_linear_field_reproduced_on_flat_interface() {
    // 平直界面上，四边形 donor 单元的分片线性权重精确再现线性场
    let meshes = vec![
        plate(9, 7, 0.0, 0.0, false, true),
        plate(4, 5, 0.0, 0.0, true, false),
    ];
    let mut map = build_map(
        &meshes,
        InterpolationMethod::ConsistentConservative,
        SearchStrategy::RTree,
    );
    let field = |c: Point3D| 2.0 * c.x - 3.0 * c.y + 0.5;

    for p in interface_points(&meshes[1], MARKER_B) {
        map.set_data(ZONE_B, p, 0, field(meshes[1].point_coord(p)));
    }
    map.propagate_data(ZONE_A).unwrap();
    for p in interface_points(&meshes[0], MARKER_A) {
        let expected = field(meshes[0].point_coord(p));
        let got = map.data(ZONE_A, p, 0);
        assert!((got - expected).abs() < 1e-12, "{} vs {}", got, expected);
    }
}
