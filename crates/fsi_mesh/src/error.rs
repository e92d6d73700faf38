// crates/fsi_mesh/src/error.rs

//! 网格处理错误类型
//!
//! 包含区域网格构建与拓扑校验的错误定义。
//! 所有错误可转换为 `fsi_foundation::FsiError` 向上传播。

use fsi_foundation::FsiError;
use thiserror::Error;

use crate::traits::ElementKind;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 不支持的空间维度
    #[error("不支持的空间维度: {dim}")]
    InvalidDimension {
        /// 维度
        dim: usize,
    },

    /// 引用了不存在的网格点
    #[error("{context}: 网格点 {index} 超出范围 0..{len}")]
    PointOutOfRange {
        /// 出错位置
        context: &'static str,
        /// 引用的点
        index: usize,
        /// 点总数
        len: usize,
    },

    /// 单元节点数与类型不符
    #[error("单元 {element} ({kind:?}) 需要 {expected} 个节点, 提供 {actual}")]
    ElementNodeCount {
        /// 单元编号
        element: usize,
        /// 单元类型
        kind: ElementKind,
        /// 期望节点数
        expected: usize,
        /// 实际节点数
        actual: usize,
    },

    /// 同一标记中网格点重复
    #[error("标记 '{marker}' 中网格点 {point} 重复出现")]
    DuplicateMarkerPoint {
        /// 标记名
        marker: String,
        /// 重复的点
        point: usize,
    },

    /// 坐标不是有限数
    #[error("网格点 {point} 的坐标不是有限数")]
    NonFiniteCoordinate {
        /// 网格点
        point: usize,
    },
}

impl MeshError {
    /// 点越界
    pub fn point_out_of_range(context: &'static str, index: usize, len: usize) -> Self {
        Self::PointOutOfRange {
            context,
            index,
            len,
        }
    }
}

/// 转换到基础层错误
impl From<MeshError> for FsiError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::InvalidDimension { dim } => FsiError::UnsupportedDimension { dim },
            MeshError::PointOutOfRange {
                context: _,
                index,
                len,
            } => FsiError::index_out_of_bounds("Point", index, len),
            other => FsiError::invalid_mesh(other.to_string()),
        }
    }
}
