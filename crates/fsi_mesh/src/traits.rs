// crates/fsi_mesh/src/traits.rs

//! 区域几何抽象接口（ZoneGeometry & ZoneGeometryMut）
//!
//! 界面插值只通过这两个 trait 访问区域网格，不依赖具体网格实现。
//!
//! # 索引约束
//!
//! - 网格点: `0..n_points()`
//! - 单元: `0..n_elements()`
//! - 标记: `0..n_markers()`，标记内顶点: `0..n_vertices(marker)`
//!
//! 越界访问属于调用方错误，实现可以直接 panic。
//!
//! # 坐标约定
//!
//! 二维区域的所有坐标、位移的 z 分量为 0；转动向量只有 z 分量有意义。

use fsi_foundation::{ElementIndex, MarkerIndex, PointIndex, VertexIndex};
use fsi_geo::Point3D;
use serde::{Deserialize, Serialize};

// =========================================================================
// 单元类型
// =========================================================================

/// 单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// 两节点线单元
    Line,
    /// 三角形
    Triangle,
    /// 四边形
    Quadrilateral,
    /// 四面体
    Tetrahedron,
    /// 六面体
    Hexahedron,
}

impl ElementKind {
    /// 节点数
    #[inline]
    pub const fn n_nodes(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quadrilateral | Self::Tetrahedron => 4,
            Self::Hexahedron => 8,
        }
    }

    /// 在给定空间维度下是否为边界面单元
    ///
    /// 二维: 线单元；三维: 三角形与四边形。
    #[inline]
    pub const fn is_surface_in(self, n_dim: usize) -> bool {
        match n_dim {
            2 => matches!(self, Self::Line),
            3 => matches!(self, Self::Triangle | Self::Quadrilateral),
            _ => false,
        }
    }
}

// =========================================================================
// ZoneGeometry - 只读访问
// =========================================================================

/// 区域几何只读访问接口
pub trait ZoneGeometry {
    // ===== 网格点 / 单元 =====

    /// 空间维度（2 或 3）
    fn n_dim(&self) -> usize;

    /// 网格点总数
    fn n_points(&self) -> usize;

    /// 网格点坐标
    fn point_coord(&self, point: PointIndex) -> Point3D;

    /// 与网格点相连的单元
    fn point_elements(&self, point: PointIndex) -> &[ElementIndex];

    /// 单元总数
    fn n_elements(&self) -> usize;

    /// 单元类型
    fn element_kind(&self, element: ElementIndex) -> ElementKind;

    /// 单元节点（有序）
    fn element_nodes(&self, element: ElementIndex) -> &[PointIndex];

    // ===== 边界标记 / 顶点 =====

    /// 标记总数
    fn n_markers(&self) -> usize;

    /// 标记名
    fn marker_tag(&self, marker: MarkerIndex) -> &str;

    /// 标记内顶点数
    fn n_vertices(&self, marker: MarkerIndex) -> usize;

    /// 顶点对应的全局网格点
    fn vertex_point(&self, marker: MarkerIndex, vertex: VertexIndex) -> PointIndex;

    /// 网格点在标记内的局部顶点（不在该标记上时为 None）
    fn point_vertex(&self, point: PointIndex, marker: MarkerIndex) -> Option<VertexIndex>;

    /// 顶点坐标
    #[inline]
    fn vertex_coord(&self, marker: MarkerIndex, vertex: VertexIndex) -> Point3D {
        self.point_coord(self.vertex_point(marker, vertex))
    }

    /// 顶点位移（由结构/网格求解器写入）
    fn vertex_displacement(&self, marker: MarkerIndex, vertex: VertexIndex) -> Point3D;

    /// 顶点转动向量
    fn vertex_rotation(&self, marker: MarkerIndex, vertex: VertexIndex) -> Point3D;
}

// =========================================================================
// ZoneGeometryMut - 位移写回
// =========================================================================

/// 区域几何写接口
///
/// 插值引擎只写顶点位移，不修改坐标与拓扑。
pub trait ZoneGeometryMut: ZoneGeometry {
    /// 覆盖顶点位移
    fn set_vertex_displacement(
        &mut self,
        marker: MarkerIndex,
        vertex: VertexIndex,
        displacement: Point3D,
    );

    /// 覆盖顶点转动向量
    fn set_vertex_rotation(&mut self, marker: MarkerIndex, vertex: VertexIndex, rotation: Point3D);
}
