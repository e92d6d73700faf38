// crates/fsi_foundation/src/index.rs

//! 强类型索引系统
//!
//! 使用泛型 `Idx<T>` 区分耦合界面上的各类实体索引（区域/网格点/边界标记/
//! 标记顶点/单元），避免 "donor 四元组" 中各字段含义混淆。
//!
//! # 设计目标
//!
//! 1. **类型安全**: 编译期区分 Zone/Point/Marker/Vertex/Element 索引
//! 2. **零开销**: release 模式下与 u32 完全相同
//! 3. **句柄寻址**: `PointHandle` = (区域, 网格点)，作为数据场的键
//!
//! # 示例
//!
//! ```
//! use fsi_foundation::index::{PointHandle, PointIndex, ZoneIndex};
//!
//! let zone = ZoneIndex::new(1);
//! let handle = PointHandle::new(zone, PointIndex::new(7));
//! assert_eq!(handle.zone.as_usize(), 1);
//! assert_eq!(handle.point.index(), 7);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// 无效索引标记
pub const INVALID_INDEX: u32 = u32::MAX;

// ============================================================================
// 标记类型 (Phantom Types)
// ============================================================================

/// 区域（zone）索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneTag;

/// 网格点（全局节点）索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointTag;

/// 边界标记（marker）索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerTag;

/// 标记内局部顶点索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexTag;

/// 单元索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementTag;

// ============================================================================
// 泛型索引类型
// ============================================================================

/// 泛型强类型索引
///
/// 使用 Phantom Type `T` 区分不同类型的索引。网格在耦合期间拓扑不变，
/// 因此不需要代际校验。
#[derive(Serialize, Deserialize)]
#[repr(transparent)]
pub struct Idx<T> {
    /// 索引值
    index: u32,
    /// 类型标记
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Idx<T> {}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Idx<T> {
    /// 无效索引常量
    pub const INVALID: Self = Self::new(INVALID_INDEX);

    /// 创建新索引
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// 从 usize 创建
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        debug_assert!(index < INVALID_INDEX as usize, "索引 {} 超出 u32 范围", index);
        Self::new(index as u32)
    }

    /// 获取索引值
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// 获取索引值（usize）
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.index as usize
    }

    /// 判断索引是否有效
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.index != INVALID_INDEX
    }
}

// ============================================================================
// Trait 实现
// ============================================================================

impl<T> Default for Idx<T> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Idx({})", self.index)
        } else {
            write!(f, "Idx(INVALID)")
        }
    }
}

impl<T> fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.index)
        } else {
            write!(f, "INVALID")
        }
    }
}

impl<T> From<usize> for Idx<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::from_usize(index)
    }
}

impl<T> From<Idx<T>> for usize {
    #[inline]
    fn from(idx: Idx<T>) -> usize {
        idx.as_usize()
    }
}

impl<T> From<u32> for Idx<T> {
    #[inline]
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

// ============================================================================
// 类型别名
// ============================================================================

/// 区域索引
pub type ZoneIndex = Idx<ZoneTag>;

/// 全局网格点索引
pub type PointIndex = Idx<PointTag>;

/// 边界标记索引
pub type MarkerIndex = Idx<MarkerTag>;

/// 标记内局部顶点索引
pub type VertexIndex = Idx<VertexTag>;

/// 单元索引
pub type ElementIndex = Idx<ElementTag>;

// ============================================================================
// 复合句柄
// ============================================================================

/// 区域内网格点句柄 `(zone, point)`
///
/// 数据场按此句柄寻址。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointHandle {
    /// 所属区域
    pub zone: ZoneIndex,
    /// 区域内全局网格点
    pub point: PointIndex,
}

impl PointHandle {
    /// 创建句柄
    #[inline]
    pub const fn new(zone: ZoneIndex, point: PointIndex) -> Self {
        Self { zone, point }
    }
}

/// 界面顶点句柄 `(zone, marker, vertex)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexHandle {
    /// 所属区域
    pub zone: ZoneIndex,
    /// 边界标记
    pub marker: MarkerIndex,
    /// 标记内局部顶点
    pub vertex: VertexIndex,
}

impl VertexHandle {
    /// 创建句柄
    #[inline]
    pub const fn new(zone: ZoneIndex, marker: MarkerIndex, vertex: VertexIndex) -> Self {
        Self {
            zone,
            marker,
            vertex,
        }
    }
}

impl fmt::Display for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {} / marker {} / vertex {}", self.zone, self.marker, self.vertex)
    }
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 创建区域索引
#[inline]
pub const fn zone(index: u32) -> ZoneIndex {
    ZoneIndex::new(index)
}

/// 创建网格点索引
#[inline]
pub const fn point(index: u32) -> PointIndex {
    PointIndex::new(index)
}

/// 创建边界标记索引
#[inline]
pub const fn marker(index: u32) -> MarkerIndex {
    MarkerIndex::new(index)
}

/// 创建顶点索引
#[inline]
pub const fn vertex(index: u32) -> VertexIndex {
    VertexIndex::new(index)
}

/// 创建单元索引
#[inline]
pub const fn element(index: u32) -> ElementIndex {
    ElementIndex::new(index)
}

// ============================================================================
// 测试
// ============================================================================
