// crates/fsi_foundation/src/lib.rs

//! 界面插值基础层
//!
//! 提供整个工作空间共用的基础抽象。
//!
//! # 模块概览
//!
//! - [`index`]: 强类型索引与 `(zone, point)` 句柄
//! - [`error`]: 统一错误类型
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **类型安全**: 编译期防止索引误用

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod index;

// 重导出常用类型
pub use error::{FsiError, FsiResult};
pub use index::{
    ElementIndex, Idx, MarkerIndex, PointHandle, PointIndex, VertexHandle, VertexIndex, ZoneIndex,
};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{FsiError, FsiResult};
    pub use crate::index::{
        element, marker, point, vertex, zone, ElementIndex, Idx, MarkerIndex, PointHandle,
        PointIndex, VertexHandle, VertexIndex, ZoneIndex,
    };
}
