// crates/fsi_interp/src/lib.rs

//! 跨区域界面插值
//!
//! 两个独立剖分的区域在耦合界面上不共享节点，本 crate 为每个界面顶点建立
//! 对方区域的 donor 列表与权重，并据此传递通用数据和刚体一致的位移。
//!
//! # 核心类型
//!
//! - [`DonorMap`]: donor 记录 + 数据场，构建与传递的入口
//! - [`Mapper`]: 封闭的映射策略集合
//!   - [`NearestNeighborMapper`]: 最近顶点
//!   - [`ConsistentConservativeMapper`]: 单元投影（一致）+ 转置（守恒）
//! - [`FieldStore`]: `(zone, point)` 寻址的定长数据
//! - [`transfer`]: 无状态的传递运算
//!
//! # 模块结构
//!
//! - [`donor`]: donor 记录
//! - [`field`]: 数据场
//! - [`search`]: 最近顶点搜索（逐点扫描 / R-Tree）
//! - [`projection`]: 单元投影与形函数
//! - [`mapper`]: 映射策略
//! - [`transfer`]: 数据与位移传递
//! - [`statistics`]: 映射统计
//! - [`donor_map`]: DonorMap
//!
//! # 并发
//!
//! 单线程同步执行，无内部锁。调用方保证先更新 donor 区域，再调用传递。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod donor;
pub mod donor_map;
pub mod field;
pub mod mapper;
pub mod projection;
pub mod search;
pub mod statistics;
pub mod transfer;

// 重新导出核心类型
pub use donor::{Donor, DonorRecord, MarkerDonors, ZoneDonors};
pub use donor_map::DonorMap;
pub use field::{FieldStore, ZoneField};
pub use mapper::{ConsistentConservativeMapper, Mapper, NearestNeighborMapper};
pub use search::{brute_force_nearest, NearestSearch};
pub use statistics::MapStatistics;
