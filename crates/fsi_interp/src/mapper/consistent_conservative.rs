// crates/fsi_interp/src/mapper/consistent_conservative.rs

//! 一致/守恒单元投影映射
//!
//! # 区域 A（一致方向）
//!
//! 对区域 A 的每个界面顶点：
//!
//! 1. 在区域 B 的配对标记上找最近顶点
//! 2. 检查与该顶点相连、且所有节点都在配对标记上的边界面单元
//! 3. 将顶点投影到各单元（限制在单元内），取投影距离最小者
//! 4. donor 为单元角点，权重为投影点处的形函数值
//!
//! 没有单元投影严格近于最近顶点时，以最近顶点为唯一 donor（权重 1.0）。
//! 权重和为 1。
//!
//! # 区域 B（守恒方向）
//!
//! 将区域 A 的权重转置：A 顶点引用 B 角点的权重 w，登记为 B 角点从该 A 顶点
//! 接收的权重 w。于是区域 B 上传递量的总和等于区域 A 上的总和。
//!
//! 未被任何 A 顶点引用的 B 顶点取最近的 A 顶点作为权重 0 的 donor，
//! 满足「至少一个 donor」且不破坏守恒。

use fsi_config::SearchStrategy;
use fsi_foundation::{FsiResult, VertexIndex};
use fsi_geo::Point3D;
use fsi_mesh::ZoneGeometry;

use super::{MarkerSide, PairDonors, ZonePair};
use crate::donor::{Donor, DonorRecord, MarkerDonors};
use crate::projection::{project_onto_element, Projection};
use crate::search::NearestSearch;

/// 单元最多节点数（四边形）
const MAX_SURFACE_NODES: usize = 4;

/// 一致/守恒单元投影映射
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistentConservativeMapper {
    /// 最近顶点搜索策略
    pub search: SearchStrategy,
    /// 退化单元判据
    pub degenerate_tolerance: f64,
}

impl Default for ConsistentConservativeMapper {
    fn default() -> Self {
        Self {
            search: SearchStrategy::default(),
            degenerate_tolerance: 1e-24,
        }
    }
}

/// 投影候选：单元角点与权重
struct Candidate {
    projection: Projection,
    corners: [VertexIndex; MAX_SURFACE_NODES],
}

impl ConsistentConservativeMapper {
    /// 创建映射器
    pub fn new(search: SearchStrategy, degenerate_tolerance: f64) -> Self {
        Self {
            search,
            degenerate_tolerance,
        }
    }

    /// 构建两个方向的 donor 记录
    pub fn build<G: ZoneGeometry + ?Sized>(&self, pair: &ZonePair<'_, G>) -> FsiResult<PairDonors> {
        let n_dim = pair.n_dim();
        let mut donors = pair.empty_donors();
        for interface in pair.interfaces {
            let (side_a, side_b) = pair.sides(interface);

            let search_b = side_b.search(self.search);
            let records_a = (0..side_a.n_vertices())
                .map(|v| self.project_vertex(&side_a, &side_b, &search_b, VertexIndex::from_usize(v), n_dim))
                .collect::<FsiResult<Vec<_>>>()?;
            let records_b = self.transpose(&side_a, &side_b, &records_a)?;

            donors.a.markers.push(MarkerDonors {
                interface: interface.interface,
                marker: side_a.marker,
                records: records_a,
            });
            donors.b.markers.push(MarkerDonors {
                interface: interface.interface,
                marker: side_b.marker,
                records: records_b,
            });
        }
        Ok(donors)
    }

    /// 区域 A 顶点的一致 donor
    fn project_vertex<G: ZoneGeometry + ?Sized>(
        &self,
        side_a: &MarkerSide<'_, G>,
        side_b: &MarkerSide<'_, G>,
        search_b: &NearestSearch,
        vertex: VertexIndex,
        n_dim: usize,
    ) -> FsiResult<DonorRecord> {
        let p = side_a.coord(vertex);
        let (nearest, nearest_d2) = side_b.nearest(search_b, &p)?;

        let geometry = side_b.geometry;
        let mut best: Option<Candidate> = None;
        let mut best_d2 = nearest_d2;
        let mut n_usable = 0usize;

        for &element in geometry.point_elements(side_b.point(nearest)) {
            let kind = geometry.element_kind(element);
            if !kind.is_surface_in(n_dim) {
                continue;
            }
            let nodes = geometry.element_nodes(element);
            if nodes.len() > MAX_SURFACE_NODES {
                continue;
            }

            // 所有节点都必须位于配对标记上
            let mut coords = [Point3D::ZERO; MAX_SURFACE_NODES];
            let mut corners = [VertexIndex::INVALID; MAX_SURFACE_NODES];
            let on_marker = nodes.iter().enumerate().all(|(i, &node)| {
                match geometry.point_vertex(node, side_b.marker) {
                    Some(v) => {
                        coords[i] = geometry.point_coord(node);
                        corners[i] = v;
                        true
                    }
                    None => false,
                }
            });
            if !on_marker {
                continue;
            }

            let Some(projection) = project_onto_element(
                kind,
                &p,
                &coords[..nodes.len()],
                n_dim,
                self.degenerate_tolerance,
            ) else {
                log::debug!(
                    "区域 {} 单元 {} 退化，跳过 (界面 {})",
                    side_b.zone,
                    element,
                    side_b.interface
                );
                continue;
            };

            n_usable += 1;
            if projection.distance_squared < best_d2 {
                best_d2 = projection.distance_squared;
                best = Some(Candidate { projection, corners });
            }
        }

        let mut record = side_a.receiver(vertex);
        match best {
            Some(candidate) => {
                for (&corner, &weight) in candidate
                    .corners
                    .iter()
                    .zip(candidate.projection.weights())
                {
                    if weight != 0.0 {
                        record.donors.push(side_b.donor(corner, weight));
                    }
                }
            }
            None => {
                record.donors.push(side_b.donor(nearest, 1.0));
                if n_usable == 0 {
                    record.fallback = true;
                    log::debug!(
                        "{} 没有可用的相邻单元，取最近顶点 {}",
                        record.receiver,
                        nearest
                    );
                }
            }
        }
        Ok(record)
    }

    /// 转置区域 A 的权重得到区域 B 的 donor
    fn transpose<G: ZoneGeometry + ?Sized>(
        &self,
        side_a: &MarkerSide<'_, G>,
        side_b: &MarkerSide<'_, G>,
        records_a: &[DonorRecord],
    ) -> FsiResult<Vec<DonorRecord>> {
        let mut lists: Vec<Vec<Donor>> = vec![Vec::new(); side_b.n_vertices()];
        for rec in records_a {
            for donor in &rec.donors {
                lists[donor.vertex.as_usize()].push(Donor {
                    zone: rec.receiver.zone,
                    point: rec.point,
                    marker: rec.receiver.marker,
                    vertex: rec.receiver.vertex,
                    weight: donor.weight,
                });
            }
        }

        let mut search_a: Option<NearestSearch> = None;
        let mut n_orphans = 0usize;
        let mut records_b = Vec::with_capacity(lists.len());
        for (v, donors) in lists.into_iter().enumerate() {
            let v = VertexIndex::from_usize(v);
            let mut record = side_b.receiver(v);
            if donors.is_empty() {
                let search = search_a.get_or_insert_with(|| side_a.search(self.search));
                let (nearest, _) = side_a.nearest(search, &side_b.coord(v))?;
                record.donors.push(side_a.donor(nearest, 0.0));
                record.fallback = true;
                n_orphans += 1;
            } else {
                record.donors = donors;
            }
            records_b.push(record);
        }

        if n_orphans > 0 {
            log::warn!(
                "界面 {}: 区域 {} 有 {} 个顶点未被区域 {} 引用，以零权重最近点占位",
                side_b.interface,
                side_b.zone,
                n_orphans,
                side_a.zone
            );
        }
        Ok(records_b)
    }
}
