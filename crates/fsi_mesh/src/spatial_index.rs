// crates/fsi_mesh/src/spatial_index.rs

//! 标记顶点空间索引
//!
//! 基于 R-Tree 的最近顶点查询，使用 rstar crate 实现。
//!
//! # 与暴力搜索的一致性
//!
//! 查询结果与逐顶点扫描完全一致：
//!
//! - 距离使用 [`fsi_geo::squared_distance`]，两种实现得到逐位相同的值
//! - 距离相等时取局部编号最小的顶点（即扫描顺序中的第一个）
//!
//! # 示例
//!
//! ```
//! use fsi_mesh::spatial_index::VertexSearchIndex;
//! use fsi_geo::Point3D;
//!
//! let coords = vec![Point3D::new_2d(0.0, 0.0), Point3D::new_2d(2.0, 0.0)];
//! let index = VertexSearchIndex::build(2, &coords);
//!
//! // (1, 0) 到两个顶点等距，取先出现的顶点 0
//! let (v, d2) = index.nearest(&Point3D::new_2d(1.0, 0.0)).unwrap();
//! assert_eq!(v.index(), 0);
//! assert_eq!(d2, 1.0);
//! ```

use fsi_foundation::{MarkerIndex, VertexIndex};
use fsi_geo::{squared_distance, Point3D};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::traits::ZoneGeometry;

/// 索引条目：一个标记顶点
#[derive(Debug, Clone)]
struct VertexEntry {
    coord: [f64; 3],
    vertex: u32,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coord)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        // 坐标已截断到有效维度，二维时 z 分量恒为 0
        squared_distance(&Point3D::from(*point), &Point3D::from(self.coord), 3)
    }
}

/// 单个标记的顶点 R-Tree
pub struct VertexSearchIndex {
    tree: RTree<VertexEntry>,
    n_dim: usize,
}

impl VertexSearchIndex {
    /// 从顶点坐标批量构建（顶点编号即切片下标）
    pub fn build(n_dim: usize, coords: &[Point3D]) -> Self {
        let entries: Vec<VertexEntry> = coords
            .iter()
            .enumerate()
            .map(|(v, c)| VertexEntry {
                coord: c.truncated(n_dim).into(),
                vertex: v as u32,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            n_dim,
        }
    }

    /// 从区域网格的某个标记构建
    pub fn from_marker<G: ZoneGeometry + ?Sized>(geometry: &G, marker: MarkerIndex) -> Self {
        let coords: Vec<Point3D> = (0..geometry.n_vertices(marker))
            .map(|v| geometry.vertex_coord(marker, VertexIndex::from_usize(v)))
            .collect();
        Self::build(geometry.n_dim(), &coords)
    }

    /// 最近顶点及其距离平方
    ///
    /// 空索引返回 None。
    pub fn nearest(&self, query: &Point3D) -> Option<(VertexIndex, f64)> {
        let q: [f64; 3] = query.truncated(self.n_dim).into();
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&q);
        let (first, best) = iter.next()?;
        let mut chosen = first.vertex;
        // 等距顶点按编号取最小，保持与顺序扫描相同的平局规则
        for (entry, d2) in iter {
            if d2 > best {
                break;
            }
            chosen = chosen.min(entry.vertex);
        }
        Some((VertexIndex::new(chosen), best))
    }

    /// 顶点数量
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
