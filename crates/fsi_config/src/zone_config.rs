// crates/fsi_config/src/zone_config.rs

//! 区域边界标记配置
//!
//! 每个区域按标记顺序声明边界标记；参与流固耦合的标记带有界面配对索引
//! `fsi_interface = K`（K ≥ 1），两个区域中 K 相同的标记构成一对耦合界面。

use std::collections::BTreeSet;

use fsi_foundation::{FsiError, FsiResult, MarkerIndex};
use serde::{Deserialize, Serialize};

/// 单个边界标记的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// 标记名
    pub tag: String,
    /// 界面配对索引（None 表示不参与耦合）
    #[serde(default)]
    pub fsi_interface: Option<u32>,
}

impl MarkerConfig {
    /// 普通边界标记
    pub fn boundary(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fsi_interface: None,
        }
    }

    /// 耦合界面标记
    pub fn interface(tag: impl Into<String>, index: u32) -> Self {
        Self {
            tag: tag.into(),
            fsi_interface: Some(index),
        }
    }
}

/// 单个区域的配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// 区域名（仅用于日志）
    #[serde(default)]
    pub name: String,
    /// 边界标记，顺序与区域网格中的标记一致
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

impl ZoneConfig {
    /// 创建区域配置
    pub fn new(name: impl Into<String>, markers: Vec<MarkerConfig>) -> Self {
        Self {
            name: name.into(),
            markers,
        }
    }

    /// 标记数量
    #[inline]
    pub fn n_markers(&self) -> usize {
        self.markers.len()
    }

    /// 标记的界面配对索引
    #[inline]
    pub fn marker_interface(&self, marker: MarkerIndex) -> Option<u32> {
        self.markers
            .get(marker.as_usize())
            .and_then(|m| m.fsi_interface)
    }

    /// 标记是否为耦合界面
    #[inline]
    pub fn is_fsi_interface(&self, marker: MarkerIndex) -> bool {
        self.marker_interface(marker).is_some()
    }

    /// 耦合界面标记数量
    pub fn n_interface_markers(&self) -> usize {
        self.markers.iter().filter(|m| m.fsi_interface.is_some()).count()
    }

    /// 所有耦合界面标记
    pub fn interface_markers(&self) -> impl Iterator<Item = MarkerIndex> + '_ {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.fsi_interface.is_some())
            .map(|(i, _)| MarkerIndex::from_usize(i))
    }

    /// 本区域声明的界面配对索引（升序）
    pub fn interface_indices(&self) -> BTreeSet<u32> {
        self.markers.iter().filter_map(|m| m.fsi_interface).collect()
    }

    /// 查找界面索引 `interface` 对应的唯一标记
    ///
    /// # 错误
    /// - 没有标记声明该索引: [`FsiError::MissingInterfaceMarker`]
    /// - 多个标记声明该索引: [`FsiError::DuplicateInterfaceMarker`]
    pub fn find_interface_marker(&self, zone: usize, interface: u32) -> FsiResult<MarkerIndex> {
        let mut found: Option<usize> = None;
        for (i, m) in self.markers.iter().enumerate() {
            if m.fsi_interface != Some(interface) {
                continue;
            }
            if let Some(first) = found {
                return Err(FsiError::DuplicateInterfaceMarker {
                    zone,
                    interface,
                    first,
                    second: i,
                });
            }
            found = Some(i);
        }
        found
            .map(MarkerIndex::from_usize)
            .ok_or_else(|| FsiError::missing_interface_marker(zone, interface))
    }
}

// ============================================================
// 界面配对
// ============================================================

/// 一对耦合界面标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfacePair {
    /// 界面配对索引
    pub interface: u32,
    /// 区域 A 中的标记
    pub marker_a: MarkerIndex,
    /// 区域 B 中的标记
    pub marker_b: MarkerIndex,
}

/// 按界面索引配对两个区域的耦合标记
///
/// 任一区域声明的索引都必须在另一区域找到唯一匹配；结果按索引升序。
pub fn pair_interfaces(
    zone_a: usize,
    config_a: &ZoneConfig,
    zone_b: usize,
    config_b: &ZoneConfig,
) -> FsiResult<Vec<InterfacePair>> {
    let mut indices = config_a.interface_indices();
    indices.extend(config_b.interface_indices());
    if indices.is_empty() {
        return Err(FsiError::config(format!(
            "区域 {} 与 {} 均未声明耦合界面标记",
            zone_a, zone_b
        )));
    }

    indices
        .into_iter()
        .map(|interface| {
            Ok(InterfacePair {
                interface,
                marker_a: config_a.find_interface_marker(zone_a, interface)?,
                marker_b: config_b.find_interface_marker(zone_b, interface)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_foundation::index::marker;

    fn fluid() -> ZoneConfig {
        ZoneConfig::new(
            "fluid",
            vec![
                MarkerConfig::boundary("farfield"),
                MarkerConfig::interface("wing", 1),
                MarkerConfig::interface("flap", 2),
            ],
        )
    }

    #[test]
    fn test_interface_queries() {
        let cfg = fluid();
        assert_eq!(cfg.n_markers(), 3);
        assert_eq!(cfg.n_interface_markers(), 2);
        assert!(!cfg.is_fsi_interface(marker(0)));
        assert_eq!(cfg.marker_interface(marker(2)), Some(2));
        assert_eq!(cfg.marker_interface(marker(9)), None);
        assert_eq!(cfg.interface_indices().into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(cfg.interface_markers().collect::<Vec<_>>(), vec![marker(1), marker(2)]);
    }

    #[test]
    fn test_find_interface_marker() {
        let cfg = fluid();
        assert_eq!(cfg.find_interface_marker(0, 2).unwrap(), marker(2));

        let err = cfg.find_interface_marker(0, 7).unwrap_err();
        assert!(err.to_string().contains("no matching interface marker for index 7"));
    }

    #[test]
    fn test_duplicate_interface_marker() {
        let mut cfg = fluid();
        cfg.markers.push(MarkerConfig::interface("slat", 1));
        let err = cfg.find_interface_marker(1, 1).unwrap_err();
        assert!(matches!(
            err,
            FsiError::DuplicateInterfaceMarker { zone: 1, interface: 1, first: 1, second: 3 }
        ));
    }

    #[test]
    fn test_pair_interfaces() {
        let solid = ZoneConfig::new(
            "solid",
            vec![MarkerConfig::interface("flap_s", 2), MarkerConfig::interface("wing_s", 1)],
        );
        let pairs = pair_interfaces(0, &fluid(), 1, &solid).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], InterfacePair { interface: 1, marker_a: marker(1), marker_b: marker(1) });
        assert_eq!(pairs[1], InterfacePair { interface: 2, marker_a: marker(2), marker_b: marker(0) });
    }

    #[test]
    fn test_pair_interfaces_missing_on_one_side() {
        let solid = ZoneConfig::new("solid", vec![MarkerConfig::interface("wing_s", 1)]);
        let err = pair_interfaces(0, &fluid(), 1, &solid).unwrap_err();
        assert!(matches!(err, FsiError::MissingInterfaceMarker { zone: 1, interface: 2 }));
    }

    #[test]
    fn test_pair_interfaces_none_declared() {
        let plain = ZoneConfig::new("plain", vec![MarkerConfig::boundary("wall")]);
        let err = pair_interfaces(0, &plain, 1, &plain).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_deserialize_defaults() {
        let cfg: ZoneConfig =
            serde_json::from_str(r#"{"markers": [{"tag": "wall"}, {"tag": "fsi", "fsi_interface": 1}]}"#)
                .unwrap();
        assert_eq!(cfg.name, "");
        assert_eq!(cfg.n_interface_markers(), 1);
    }
}
