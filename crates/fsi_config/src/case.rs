// crates/fsi_config/src/case.rs

//! CouplingCase - 两区域耦合算例配置
//!
//! 描述两个区域的边界标记与界面插值选项，可从 JSON 或 YAML 文件加载。
//!
//! # 示例
//!
//! ```
//! use fsi_config::CouplingCase;
//!
//! let case = CouplingCase::from_json_str(r#"{
//!     "zones": [
//!         {"name": "fluid", "markers": [{"tag": "wall", "fsi_interface": 1}]},
//!         {"name": "solid", "markers": [{"tag": "skin", "fsi_interface": 1}]}
//!     ],
//!     "interpolation": {"method": "consistent_conservative"}
//! }"#).unwrap();
//!
//! assert_eq!(case.interface_pairs().unwrap().len(), 1);
//! ```

use std::path::Path;

use fsi_foundation::{FsiError, FsiResult};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::InterpolationOptions;
use crate::zone_config::{pair_interfaces, InterfacePair, ZoneConfig};

/// 两区域耦合需要的区域数
pub const COUPLED_ZONES: usize = 2;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl CaseFormat {
    /// 按扩展名判断格式（`.yaml` / `.yml` 为 YAML，其余为 JSON）
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// 耦合算例配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingCase {
    /// 算例名
    #[serde(default)]
    pub name: String,

    /// 区域配置（按区域编号排列）
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,

    /// 插值选项
    #[serde(default)]
    pub interpolation: InterpolationOptions,
}

impl CouplingCase {
    /// 由两个区域配置创建
    pub fn new(zone_a: ZoneConfig, zone_b: ZoneConfig, interpolation: InterpolationOptions) -> Self {
        Self {
            name: String::new(),
            zones: vec![zone_a, zone_b],
            interpolation,
        }
    }

    /// 从文件加载并验证
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let case = match CaseFormat::from_path(path) {
            CaseFormat::Json => Self::from_json_str(&content)?,
            CaseFormat::Yaml => Self::from_yaml_str(&content)?,
        };
        log::debug!(
            "加载耦合算例 '{}': {} 个区域, 方法 {}",
            path.display(),
            case.zones.len(),
            case.interpolation.method
        );
        Ok(case)
    }

    /// 从 JSON 文本解析并验证
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let case: CouplingCase =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        case.validate()?;
        Ok(case)
    }

    /// 从 YAML 文本解析并验证
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let case: CouplingCase =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        case.validate()?;
        Ok(case)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zones.len() != COUPLED_ZONES {
            return Err(ConfigError::invalid_value(
                "zones",
                self.zones.len(),
                "界面耦合需要恰好 2 个区域",
            ));
        }

        for (z, zone) in self.zones.iter().enumerate() {
            if let Some(m) = zone.markers.iter().find(|m| m.fsi_interface == Some(0)) {
                return Err(ConfigError::invalid_value(
                    format!("zones[{}].markers.{}.fsi_interface", z, m.tag),
                    0,
                    "界面索引从 1 开始",
                ));
            }
        }

        self.interpolation.validate()
    }

    /// 区域配置
    pub fn zone(&self, zone: usize) -> FsiResult<&ZoneConfig> {
        self.zones.get(zone).ok_or_else(|| FsiError::unknown_zone(zone))
    }

    /// 两个区域之间的界面配对
    pub fn interface_pairs(&self) -> FsiResult<Vec<InterfacePair>> {
        if self.zones.len() != COUPLED_ZONES {
            return Err(FsiError::zone_count(COUPLED_ZONES, self.zones.len()));
        }
        pair_interfaces(0, &self.zones[0], 1, &self.zones[1])
    }

    /// 保存配置到文件（格式由扩展名决定）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match CaseFormat::from_path(path) {
            CaseFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            CaseFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InterpolationMethod, SearchStrategy};
    use crate::zone_config::MarkerConfig;

    fn sample() -> CouplingCase {
        CouplingCase::new(
            ZoneConfig::new(
                "fluid",
                vec![MarkerConfig::boundary("inlet"), MarkerConfig::interface("wall", 1)],
            ),
            ZoneConfig::new("solid", vec![MarkerConfig::interface("skin", 1)]),
            InterpolationOptions::with_method(InterpolationMethod::ConsistentConservative)
                .search(SearchStrategy::RTree),
        )
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(CaseFormat::from_path(Path::new("a.yaml")), CaseFormat::Yaml);
        assert_eq!(CaseFormat::from_path(Path::new("a.YML")), CaseFormat::Yaml);
        assert_eq!(CaseFormat::from_path(Path::new("a.json")), CaseFormat::Json);
        assert_eq!(CaseFormat::from_path(Path::new("case")), CaseFormat::Json);
    }

    #[test]
    fn test_validate_zone_count() {
        let mut case = sample();
        assert!(case.validate().is_ok());
        case.zones.pop();
        assert!(matches!(
            case.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "zones"
        ));
        assert!(matches!(
            case.interface_pairs(),
            Err(FsiError::ZoneCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_validate_zero_interface_index() {
        let mut case = sample();
        case.zones[1].markers.push(MarkerConfig::interface("bad", 0));
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_interface_pairs() {
        let pairs = sample().interface_pairs().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].marker_a.index(), 1);
        assert_eq!(pairs[0].marker_b.index(), 0);
    }

    #[test]
    fn test_missing_marker_reported() {
        let mut case = sample();
        case.zones[1].markers[0].fsi_interface = Some(3);
        let err = case.interface_pairs().unwrap_err();
        assert!(err.to_string().contains("no matching interface marker for index 1"));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        let case = sample();
        case.save_to_file(&path).unwrap();
        let loaded = CouplingCase::from_file(&path).unwrap();
        assert_eq!(loaded, case);
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.yaml");
        let case = sample();
        case.save_to_file(&path).unwrap();
        let loaded = CouplingCase::from_file(&path).unwrap();
        assert_eq!(loaded, case);
        assert_eq!(loaded.interpolation.search, SearchStrategy::RTree);
    }

    #[test]
    fn test_yaml_text() {
        let case = CouplingCase::from_yaml_str(
            "zones:\n  - markers:\n      - tag: a\n        fsi_interface: 1\n  - markers:\n      - tag: b\n        fsi_interface: 1\n",
        )
        .unwrap();
        assert_eq!(case.interpolation, InterpolationOptions::default());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            CouplingCase::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CouplingCase::from_file(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
