// crates/fsi_interp/src/search.rs

//! 标记顶点最近点搜索
//!
//! 两种策略返回完全相同的结果：
//!
//! - 距离由 [`fsi_geo::squared_distance`] 在有效维度内计算
//! - 严格更小才替换，相等时保留先扫描到的（编号最小的）顶点

use fsi_config::SearchStrategy;
use fsi_foundation::{MarkerIndex, VertexIndex};
use fsi_geo::{squared_distance, Point3D};
use fsi_mesh::{VertexSearchIndex, ZoneGeometry};

/// 逐顶点扫描的最近点
///
/// 空集合返回 None。
pub fn brute_force_nearest(
    coords: &[Point3D],
    n_dim: usize,
    query: &Point3D,
) -> Option<(VertexIndex, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (v, coord) in coords.iter().enumerate() {
        let d2 = squared_distance(query, coord, n_dim);
        match best {
            Some((_, b)) if d2 >= b => {}
            _ => best = Some((v, d2)),
        }
    }
    best.map(|(v, d2)| (VertexIndex::from_usize(v), d2))
}

/// 单个标记上的最近顶点查询器
pub enum NearestSearch {
    /// 逐顶点扫描
    BruteForce {
        /// 顶点坐标（按顶点编号）
        coords: Vec<Point3D>,
        /// 有效维度
        n_dim: usize,
    },
    /// R-Tree
    RTree(VertexSearchIndex),
}

impl NearestSearch {
    /// 为区域的某个标记构建查询器
    pub fn for_marker<G: ZoneGeometry + ?Sized>(
        strategy: SearchStrategy,
        geometry: &G,
        marker: MarkerIndex,
    ) -> Self {
        match strategy {
            SearchStrategy::BruteForce => Self::BruteForce {
                coords: (0..geometry.n_vertices(marker))
                    .map(|v| geometry.vertex_coord(marker, VertexIndex::from_usize(v)))
                    .collect(),
                n_dim: geometry.n_dim(),
            },
            SearchStrategy::RTree => Self::RTree(VertexSearchIndex::from_marker(geometry, marker)),
        }
    }

    /// 最近顶点及其距离平方
    #[inline]
    pub fn nearest(&self, query: &Point3D) -> Option<(VertexIndex, f64)> {
        match self {
            Self::BruteForce { coords, n_dim } => brute_force_nearest(coords, *n_dim, query),
            Self::RTree(index) => index.nearest(query),
        }
    }
}
