// crates/fsi_mesh/src/zone.rs

//! 区域网格参考实现
//!
//! `ZoneMesh` 是 [`ZoneGeometry`] 的默认实现：只读的 SoA/CSR 布局，
//! 额外保存每个标记顶点的位移与转动状态。
//!
//! # 示例
//!
//! ```
//! use fsi_mesh::{ElementKind, ZoneGeometry, ZoneMeshBuilder};
//! use fsi_foundation::index::marker;
//! use fsi_geo::Point3D;
//!
//! let mesh = ZoneMeshBuilder::new(2)
//!     .point(Point3D::new_2d(0.0, 0.0))
//!     .point(Point3D::new_2d(1.0, 0.0))
//!     .element(ElementKind::Line, &[0, 1])
//!     .marker("wall", &[0, 1])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(mesh.n_vertices(marker(0)), 2);
//! ```

use std::collections::HashMap;

use fsi_foundation::{ElementIndex, MarkerIndex, PointIndex, VertexIndex};
use fsi_geo::Point3D;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::traits::{ElementKind, ZoneGeometry, ZoneGeometryMut};

// ============================================================
// 可序列化描述
// ============================================================

/// 单元描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementData {
    /// 单元类型
    pub kind: ElementKind,
    /// 节点（全局网格点编号）
    pub nodes: Vec<usize>,
}

/// 标记描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerData {
    /// 标记名
    pub tag: String,
    /// 标记上的网格点（按顶点顺序）
    pub points: Vec<usize>,
}

/// 区域网格的可序列化描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneMeshData {
    /// 空间维度
    pub n_dim: usize,
    /// 网格点坐标
    pub points: Vec<Point3D>,
    /// 单元
    #[serde(default)]
    pub elements: Vec<ElementData>,
    /// 边界标记
    #[serde(default)]
    pub markers: Vec<MarkerData>,
}

// ============================================================
// 标记
// ============================================================

#[derive(Debug, Clone)]
struct Marker {
    tag: String,
    points: Vec<PointIndex>,
    displacement: Vec<Point3D>,
    rotation: Vec<Point3D>,
    lookup: HashMap<PointIndex, VertexIndex>,
}

// ============================================================
// ZoneMesh
// ============================================================

/// 区域网格
#[derive(Debug, Clone)]
pub struct ZoneMesh {
    n_dim: usize,
    coords: Vec<Point3D>,

    element_kinds: Vec<ElementKind>,
    element_node_offsets: Vec<usize>,
    element_node_indices: Vec<PointIndex>,

    point_element_offsets: Vec<usize>,
    point_element_indices: Vec<ElementIndex>,

    markers: Vec<Marker>,
}

impl ZoneMesh {
    /// 从可序列化描述构建
    pub fn from_data(data: &ZoneMeshData) -> MeshResult<Self> {
        let mut builder = ZoneMeshBuilder::new(data.n_dim);
        for p in &data.points {
            builder = builder.point(*p);
        }
        for e in &data.elements {
            builder = builder.element(e.kind, &e.nodes);
        }
        for m in &data.markers {
            builder = builder.marker(&m.tag, &m.points);
        }
        builder.build()
    }

    /// 导出为可序列化描述
    pub fn to_data(&self) -> ZoneMeshData {
        ZoneMeshData {
            n_dim: self.n_dim,
            points: self.coords.clone(),
            elements: (0..self.element_kinds.len())
                .map(|e| ElementData {
                    kind: self.element_kinds[e],
                    nodes: self.element_nodes(ElementIndex::from_usize(e))
                        .iter()
                        .map(|p| p.as_usize())
                        .collect(),
                })
                .collect(),
            markers: self
                .markers
                .iter()
                .map(|m| MarkerData {
                    tag: m.tag.clone(),
                    points: m.points.iter().map(|p| p.as_usize()).collect(),
                })
                .collect(),
        }
    }

    /// 按名称查找标记
    pub fn marker_by_tag(&self, tag: &str) -> Option<MarkerIndex> {
        self.markers
            .iter()
            .position(|m| m.tag == tag)
            .map(MarkerIndex::from_usize)
    }

    /// 对标记上所有顶点施加同一刚体运动状态（平移 + 转动向量）
    pub fn set_marker_motion(&mut self, marker: MarkerIndex, displacement: Point3D, rotation: Point3D) {
        let m = &mut self.markers[marker.as_usize()];
        m.displacement.fill(displacement);
        m.rotation.fill(rotation);
    }

    /// 标记上所有顶点的位移
    pub fn marker_displacements(&self, marker: MarkerIndex) -> &[Point3D] {
        &self.markers[marker.as_usize()].displacement
    }
}

impl ZoneGeometry for ZoneMesh {
    #[inline]
    fn n_dim(&self) -> usize {
        self.n_dim
    }

    #[inline]
    fn n_points(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    fn point_coord(&self, point: PointIndex) -> Point3D {
        self.coords[point.as_usize()]
    }

    #[inline]
    fn point_elements(&self, point: PointIndex) -> &[ElementIndex] {
        let p = point.as_usize();
        &self.point_element_indices[self.point_element_offsets[p]..self.point_element_offsets[p + 1]]
    }

    #[inline]
    fn n_elements(&self) -> usize {
        self.element_kinds.len()
    }

    #[inline]
    fn element_kind(&self, element: ElementIndex) -> ElementKind {
        self.element_kinds[element.as_usize()]
    }

    #[inline]
    fn element_nodes(&self, element: ElementIndex) -> &[PointIndex] {
        let e = element.as_usize();
        &self.element_node_indices[self.element_node_offsets[e]..self.element_node_offsets[e + 1]]
    }

    #[inline]
    fn n_markers(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    fn marker_tag(&self, marker: MarkerIndex) -> &str {
        &self.markers[marker.as_usize()].tag
    }

    #[inline]
    fn n_vertices(&self, marker: MarkerIndex) -> usize {
        self.markers[marker.as_usize()].points.len()
    }

    #[inline]
    fn vertex_point(&self, marker: MarkerIndex, vertex: VertexIndex) -> PointIndex {
        self.markers[marker.as_usize()].points[vertex.as_usize()]
    }

    #[inline]
    fn point_vertex(&self, point: PointIndex, marker: MarkerIndex) -> Option<VertexIndex> {
        self.markers[marker.as_usize()].lookup.get(&point).copied()
    }

    #[inline]
    fn vertex_displacement(&self, marker: MarkerIndex, vertex: VertexIndex) -> Point3D {
        self.markers[marker.as_usize()].displacement[vertex.as_usize()]
    }

    #[inline]
    fn vertex_rotation(&self, marker: MarkerIndex, vertex: VertexIndex) -> Point3D {
        self.markers[marker.as_usize()].rotation[vertex.as_usize()]
    }
}

impl ZoneGeometryMut for ZoneMesh {
    #[inline]
    fn set_vertex_displacement(
        &mut self,
        marker: MarkerIndex,
        vertex: VertexIndex,
        displacement: Point3D,
    ) {
        self.markers[marker.as_usize()].displacement[vertex.as_usize()] =
            displacement.truncated(self.n_dim);
    }

    #[inline]
    fn set_vertex_rotation(&mut self, marker: MarkerIndex, vertex: VertexIndex, rotation: Point3D) {
        self.markers[marker.as_usize()].rotation[vertex.as_usize()] = rotation;
    }
}

// ============================================================
// 构建器
// ============================================================

/// 区域网格构建器
#[derive(Debug, Clone, Default)]
pub struct ZoneMeshBuilder {
    n_dim: usize,
    coords: Vec<Point3D>,
    elements: Vec<(ElementKind, Vec<usize>)>,
    markers: Vec<(String, Vec<usize>)>,
}

impl ZoneMeshBuilder {
    /// 创建构建器
    pub fn new(n_dim: usize) -> Self {
        Self {
            n_dim,
            ..Default::default()
        }
    }

    /// 添加网格点
    pub fn point(mut self, coord: Point3D) -> Self {
        self.coords.push(coord);
        self
    }

    /// 批量添加网格点
    pub fn points(mut self, coords: impl IntoIterator<Item = Point3D>) -> Self {
        self.coords.extend(coords);
        self
    }

    /// 添加单元
    pub fn element(mut self, kind: ElementKind, nodes: &[usize]) -> Self {
        self.elements.push((kind, nodes.to_vec()));
        self
    }

    /// 添加边界标记
    pub fn marker(mut self, tag: &str, points: &[usize]) -> Self {
        self.markers.push((tag.to_string(), points.to_vec()));
        self
    }

    /// 校验并构建
    pub fn build(self) -> MeshResult<ZoneMesh> {
        if self.n_dim != 2 && self.n_dim != 3 {
            return Err(MeshError::InvalidDimension { dim: self.n_dim });
        }
        let n_points = self.coords.len();

        let mut coords = Vec::with_capacity(n_points);
        for (i, c) in self.coords.iter().enumerate() {
            if !c.is_finite() {
                return Err(MeshError::NonFiniteCoordinate { point: i });
            }
            coords.push(c.truncated(self.n_dim));
        }

        // 单元 CSR
        let mut element_kinds = Vec::with_capacity(self.elements.len());
        let mut element_node_offsets = Vec::with_capacity(self.elements.len() + 1);
        let mut element_node_indices = Vec::new();
        element_node_offsets.push(0);
        for (e, (kind, nodes)) in self.elements.iter().enumerate() {
            if nodes.len() != kind.n_nodes() {
                return Err(MeshError::ElementNodeCount {
                    element: e,
                    kind: *kind,
                    expected: kind.n_nodes(),
                    actual: nodes.len(),
                });
            }
            for &n in nodes {
                if n >= n_points {
                    return Err(MeshError::point_out_of_range("element", n, n_points));
                }
                element_node_indices.push(PointIndex::from_usize(n));
            }
            element_kinds.push(*kind);
            element_node_offsets.push(element_node_indices.len());
        }

        // 点 -> 单元 邻接（CSR，两遍计数）
        let mut counts = vec![0usize; n_points + 1];
        for n in &element_node_indices {
            counts[n.as_usize() + 1] += 1;
        }
        for i in 0..n_points {
            counts[i + 1] += counts[i];
        }
        let point_element_offsets = counts.clone();
        let mut cursor = counts;
        let mut point_element_indices = vec![ElementIndex::INVALID; element_node_indices.len()];
        for e in 0..element_kinds.len() {
            for n in &element_node_indices[element_node_offsets[e]..element_node_offsets[e + 1]] {
                let slot = &mut cursor[n.as_usize()];
                point_element_indices[*slot] = ElementIndex::from_usize(e);
                *slot += 1;
            }
        }

        // 标记
        let mut markers = Vec::with_capacity(self.markers.len());
        for (tag, points) in self.markers {
            let mut lookup = HashMap::with_capacity(points.len());
            let mut indices = Vec::with_capacity(points.len());
            for (v, &p) in points.iter().enumerate() {
                if p >= n_points {
                    return Err(MeshError::point_out_of_range("marker", p, n_points));
                }
                let pi = PointIndex::from_usize(p);
                if lookup.insert(pi, VertexIndex::from_usize(v)).is_some() {
                    return Err(MeshError::DuplicateMarkerPoint { marker: tag, point: p });
                }
                indices.push(pi);
            }
            let n = indices.len();
            markers.push(Marker {
                tag,
                points: indices,
                displacement: vec![Point3D::ZERO; n],
                rotation: vec![Point3D::ZERO; n],
                lookup,
            });
        }

        Ok(ZoneMesh {
            n_dim: self.n_dim,
            coords,
            element_kinds,
            element_node_offsets,
            element_node_indices,
            point_element_offsets,
            point_element_indices,
            markers,
        })
    }
}
