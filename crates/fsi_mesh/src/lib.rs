// crates/fsi_mesh/src/lib.rs

//! 区域网格模块
//!
//! 为界面插值提供区域几何的访问契约与参考实现。
//!
//! # 核心类型
//!
//! - [`ZoneGeometry`] / [`ZoneGeometryMut`]: 区域几何访问接口
//! - [`ZoneMesh`]: 只读 CSR 布局的参考实现，附带顶点位移/转动状态
//! - [`VertexSearchIndex`]: 标记顶点 R-Tree，最近顶点查询
//!
//! # 模块结构
//!
//! - [`traits`]: 访问接口与单元类型
//! - [`zone`]: 区域网格与构建器
//! - [`spatial_index`]: 空间索引
//! - [`error`]: 错误类型

pub mod error;
pub mod spatial_index;
pub mod traits;
pub mod zone;

// 重新导出核心类型
pub use error::{MeshError, MeshResult};
pub use spatial_index::VertexSearchIndex;
pub use traits::{ElementKind, ZoneGeometry, ZoneGeometryMut};
pub use zone::{ElementData, MarkerData, ZoneMesh, ZoneMeshBuilder, ZoneMeshData};
