// crates/fsi_geo/src/lib.rs

//! 界面几何基础模块
//!
//! 提供界面插值使用的 3D 点/向量类型与维度感知的距离计算。
//!
//! # 模块
//!
//! - `geometry`: `Point3D` 与 [`geometry::squared_distance`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod geometry;

// 重导出常用类型
pub use geometry::{squared_distance, Point3D};
