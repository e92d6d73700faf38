// crates/fsi_config/src/error.rs

//! 配置层错误类型

use fsi_foundation::FsiError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 无效值
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// 转换到基础层错误
impl From<ConfigError> for FsiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => FsiError::from(e),
            ConfigError::Parse(msg) => FsiError::serialization(msg),
            ConfigError::InvalidValue { key, value, reason } => {
                FsiError::invalid_config(key, value, reason)
            }
            ConfigError::Missing(key) => FsiError::config(format!("缺失配置: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("interpolation.weight_tolerance", -1.0, "必须为正");
        assert!(err.to_string().contains("weight_tolerance"));
    }

    #[test]
    fn test_conversion() {
        let err: FsiError = ConfigError::Missing("zones".into()).into();
        assert!(err.is_config_error());
        let err: FsiError = ConfigError::Parse("bad json".into()).into();
        assert!(matches!(err, FsiError::Serialization { .. }));
    }
}
