// crates/fsi_config/src/lib.rs

//! 界面耦合配置层
//!
//! 描述哪些边界标记构成耦合界面，以及 donor 映射使用的插值选项。
//!
//! # 模块概览
//!
//! - [`zone_config`]: 区域标记配置与界面配对
//! - [`options`]: 插值方法、搜索策略与容差
//! - [`case`]: 两区域算例配置，JSON/YAML 加载
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! fsi_cli      ─> CouplingCase
//! fsi_interp   ─> ZoneConfig, InterpolationOptions
//! fsi_config   ─> (本层)
//! fsi_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod error;
pub mod options;
pub mod zone_config;

// 重导出核心类型
pub use case::{CaseFormat, CouplingCase, COUPLED_ZONES};
pub use error::ConfigError;
pub use options::{InterpolationMethod, InterpolationOptions, SearchStrategy};
pub use zone_config::{pair_interfaces, InterfacePair, MarkerConfig, ZoneConfig};
