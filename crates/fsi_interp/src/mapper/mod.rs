// crates/fsi_interp/src/mapper/mod.rs

//! Donor 映射构建策略
//!
//! 所有策略遵循同一构建约定：给定两个区域及其界面配对，为两侧每个界面顶点
//! 生成 donor 记录。
//!
//! # 策略
//!
//! - [`NearestNeighborMapper`]: 最近顶点，单 donor，权重 1
//! - [`ConsistentConservativeMapper`]: 单元投影 + 转置，区域 A 一致、区域 B 守恒
//!
//! 策略集合是封闭的，通过 [`Mapper`] 枚举分发。

mod consistent_conservative;
mod nearest_neighbor;

pub use consistent_conservative::ConsistentConservativeMapper;
pub use nearest_neighbor::NearestNeighborMapper;

use fsi_config::{InterfacePair, InterpolationMethod, InterpolationOptions};
use fsi_foundation::{
    FsiError, FsiResult, MarkerIndex, PointIndex, VertexHandle, VertexIndex, ZoneIndex,
};
use fsi_geo::Point3D;
use fsi_mesh::ZoneGeometry;

use crate::donor::{Donor, DonorRecord, ZoneDonors};
use crate::search::NearestSearch;

// ============================================================
// 构建上下文
// ============================================================

/// 参与耦合的两个区域
pub struct ZonePair<'a, G: ?Sized> {
    /// 区域 A 编号
    pub zone_a: ZoneIndex,
    /// 区域 A 几何
    pub geometry_a: &'a G,
    /// 区域 B 编号
    pub zone_b: ZoneIndex,
    /// 区域 B 几何
    pub geometry_b: &'a G,
    /// 界面配对（按界面索引升序）
    pub interfaces: &'a [InterfacePair],
}

impl<'a, G: ZoneGeometry + ?Sized> ZonePair<'a, G> {
    /// 空间维度（两区域已校验一致）
    #[inline]
    pub fn n_dim(&self) -> usize {
        self.geometry_a.n_dim()
    }

    /// 某个界面在两侧的标记
    pub fn sides(&self, pair: &InterfacePair) -> (MarkerSide<'a, G>, MarkerSide<'a, G>) {
        (
            MarkerSide {
                zone: self.zone_a,
                geometry: self.geometry_a,
                marker: pair.marker_a,
                interface: pair.interface,
            },
            MarkerSide {
                zone: self.zone_b,
                geometry: self.geometry_b,
                marker: pair.marker_b,
                interface: pair.interface,
            },
        )
    }

    fn empty_donors(&self) -> PairDonors {
        PairDonors {
            a: ZoneDonors::new(self.zone_a, self.zone_b),
            b: ZoneDonors::new(self.zone_b, self.zone_a),
        }
    }
}

/// 一个区域中的一个界面标记
pub struct MarkerSide<'a, G: ?Sized> {
    /// 区域编号
    pub zone: ZoneIndex,
    /// 区域几何
    pub geometry: &'a G,
    /// 标记
    pub marker: MarkerIndex,
    /// 界面配对索引
    pub interface: u32,
}

impl<'a, G: ZoneGeometry + ?Sized> MarkerSide<'a, G> {
    /// 顶点数
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.geometry.n_vertices(self.marker)
    }

    /// 顶点对应网格点
    #[inline]
    pub fn point(&self, vertex: VertexIndex) -> PointIndex {
        self.geometry.vertex_point(self.marker, vertex)
    }

    /// 顶点坐标
    #[inline]
    pub fn coord(&self, vertex: VertexIndex) -> Point3D {
        self.geometry.vertex_coord(self.marker, vertex)
    }

    /// 以本侧顶点为 donor
    #[inline]
    pub fn donor(&self, vertex: VertexIndex, weight: f64) -> Donor {
        Donor {
            zone: self.zone,
            point: self.point(vertex),
            marker: self.marker,
            vertex,
            weight,
        }
    }

    /// 以本侧顶点为接收方的空记录
    #[inline]
    pub fn receiver(&self, vertex: VertexIndex) -> DonorRecord {
        DonorRecord::new(VertexHandle::new(self.zone, self.marker, vertex), self.point(vertex))
    }

    /// 本侧标记上的最近点查询器
    pub fn search(&self, strategy: fsi_config::SearchStrategy) -> NearestSearch {
        NearestSearch::for_marker(strategy, self.geometry, self.marker)
    }

    /// 本侧标记上离 `query` 最近的顶点
    pub fn nearest(&self, search: &NearestSearch, query: &Point3D) -> FsiResult<(VertexIndex, f64)> {
        search.nearest(query).ok_or(FsiError::EmptyInterface {
            zone: self.zone.as_usize(),
            marker: self.marker.as_usize(),
            interface: self.interface,
        })
    }
}

/// 两个方向的 donor 记录
#[derive(Debug, Clone, PartialEq)]
pub struct PairDonors {
    /// 区域 A 的接收记录（donor 在 B）
    pub a: ZoneDonors,
    /// 区域 B 的接收记录（donor 在 A）
    pub b: ZoneDonors,
}

// ============================================================
// 策略分发
// ============================================================

/// 映射构建策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mapper {
    /// 最近顶点
    NearestNeighbor(NearestNeighborMapper),
    /// 一致/守恒单元投影
    ConsistentConservative(ConsistentConservativeMapper),
}

impl Mapper {
    /// 按插值选项选择策略
    pub fn from_options(options: &InterpolationOptions) -> Self {
        match options.method {
            InterpolationMethod::NearestNeighbor => {
                Self::NearestNeighbor(NearestNeighborMapper::new(options.search))
            }
            InterpolationMethod::ConsistentConservative => {
                Self::ConsistentConservative(ConsistentConservativeMapper::new(
                    options.search,
                    options.degenerate_tolerance,
                ))
            }
        }
    }

    /// 对应的插值方法
    pub fn method(&self) -> InterpolationMethod {
        match self {
            Self::NearestNeighbor(_) => InterpolationMethod::NearestNeighbor,
            Self::ConsistentConservative(_) => InterpolationMethod::ConsistentConservative,
        }
    }

    /// 区域的接收权重是否满足单位分解
    ///
    /// 守恒映射中区域 B 的权重是转置权重，不要求和为 1。
    pub fn is_consistent_for(&self, receiver_is_a: bool) -> bool {
        match self {
            Self::NearestNeighbor(_) => true,
            Self::ConsistentConservative(_) => receiver_is_a,
        }
    }

    /// 构建两个方向的 donor 记录
    pub fn build<G: ZoneGeometry + ?Sized>(&self, pair: &ZonePair<'_, G>) -> FsiResult<PairDonors> {
        match self {
            Self::NearestNeighbor(m) => m.build(pair),
            Self::ConsistentConservative(m) => m.build(pair),
        }
    }
}
