// crates/fsi_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `FsiError` 枚举和 `FsiResult` 类型别名。
//!
//! # 设计原则
//!
//! 1. **层次化**: 网格与配置层各自定义错误，并通过 `From` 汇入 `FsiError`
//! 2. **构建期暴露**: 拓扑/配置问题在构建 donor 映射时报告，传播阶段不失败
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use fsi_foundation::error::{FsiError, FsiResult};
//!
//! fn pair_markers(found: bool) -> FsiResult<()> {
//!     if !found {
//!         return Err(FsiError::missing_interface_marker(1, 3));
//!     }
//!     Ok(())
//! }
//!
//! let err = pair_markers(false).unwrap_err();
//! assert!(err.to_string().contains("no matching interface marker for index 3"));
//! ```

use thiserror::Error;

/// 统一结果类型
pub type FsiResult<T> = Result<T, FsiError>;

/// 界面插值错误类型
#[derive(Error, Debug)]
pub enum FsiError {
    // ========================================================================
    // IO / 序列化
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 配置 / 拓扑
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 某一区域缺少与界面索引匹配的标记
    #[error("区域 {zone}: no matching interface marker for index {interface}")]
    MissingInterfaceMarker {
        /// 区域编号
        zone: usize,
        /// 界面配对索引
        interface: u32,
    },

    /// 同一区域中多个标记声明了同一界面索引
    #[error("区域 {zone}: 界面索引 {interface} 被标记 {first} 与 {second} 重复声明")]
    DuplicateInterfaceMarker {
        /// 区域编号
        zone: usize,
        /// 界面配对索引
        interface: u32,
        /// 首个标记
        first: usize,
        /// 重复标记
        second: usize,
    },

    /// 区域数量不满足两区域耦合
    #[error("区域数量错误: 期望 {expected}, 实际 {actual}")]
    ZoneCount {
        /// 期望数量
        expected: usize,
        /// 实际数量
        actual: usize,
    },

    /// 区域不属于当前映射
    #[error("区域 {zone} 不属于当前 donor 映射")]
    UnknownZone {
        /// 区域编号
        zone: usize,
    },

    /// 两区域空间维度不一致
    #[error("空间维度不一致: 区域 {zone_a} 为 {dim_a}D, 区域 {zone_b} 为 {dim_b}D")]
    DimensionMismatch {
        /// 区域 A
        zone_a: usize,
        /// 区域 A 维度
        dim_a: usize,
        /// 区域 B
        zone_b: usize,
        /// 区域 B 维度
        dim_b: usize,
    },

    /// 不支持的空间维度
    #[error("不支持的空间维度: {dim} (仅支持 2 或 3)")]
    UnsupportedDimension {
        /// 实际维度
        dim: usize,
    },

    /// 界面标记为空，无法提供 donor
    #[error("区域 {zone} 的界面标记 {marker} (界面索引 {interface}) 没有顶点")]
    EmptyInterface {
        /// 区域编号
        zone: usize,
        /// 标记编号
        marker: usize,
        /// 界面配对索引
        interface: u32,
    },

    // ========================================================================
    // 数据 / 网格
    // ========================================================================
    /// 无效网格
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl FsiError {
    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 缺少界面标记
    pub fn missing_interface_marker(zone: usize, interface: u32) -> Self {
        Self::MissingInterfaceMarker { zone, interface }
    }

    /// 区域数量错误
    pub fn zone_count(expected: usize, actual: usize) -> Self {
        Self::ZoneCount { expected, actual }
    }

    /// 未知区域
    pub fn unknown_zone(zone: usize) -> Self {
        Self::UnknownZone { zone }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为构建期配置/拓扑类错误
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidConfig { .. }
                | Self::MissingInterfaceMarker { .. }
                | Self::DuplicateInterfaceMarker { .. }
                | Self::ZoneCount { .. }
                | Self::DimensionMismatch { .. }
                | Self::UnsupportedDimension { .. }
                | Self::EmptyInterface { .. }
        )
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for FsiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FsiError::config("缺少区域");
        assert!(err.to_string().contains("配置错误"));
    }

    #[test]
    fn test_missing_marker_message() {
        let err = FsiError::missing_interface_marker(0, 2);
        assert!(err.to_string().contains("no matching interface marker for index 2"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = FsiError::index_out_of_bounds("Point", 10, 5);
        let msg = err.to_string();
        assert!(msg.contains("Point"));
        assert!(msg.contains("10"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "case.json");
        let err: FsiError = io_err.into();
        assert!(matches!(err, FsiError::Io { source: Some(_), .. }));
    }
}
