// apps/fsi_cli/src/case_file.rs

//! 算例文件
//!
//! 在 [`CouplingCase`] 的字段之外附带每个区域的网格描述，按区域编号排列。

use std::path::Path;

use anyhow::{bail, Context, Result};
use fsi_config::{CaseFormat, CouplingCase, InterpolationOptions, COUPLED_ZONES};
use fsi_foundation::index::zone;
use fsi_interp::DonorMap;
use fsi_mesh::{ZoneMesh, ZoneMeshData};
use serde::{Deserialize, Serialize};

/// 算例文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    /// 耦合配置
    #[serde(flatten)]
    pub case: CouplingCase,

    /// 区域网格
    #[serde(default)]
    pub meshes: Vec<ZoneMeshData>,
}

impl CaseFile {
    /// 读取并解析（不做语义检查）
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取算例文件: {}", path.display()))?;
        Self::parse(&content, CaseFormat::from_path(path))
            .with_context(|| format!("算例文件解析失败: {}", path.display()))
    }

    /// 解析文本
    pub fn parse(content: &str, format: CaseFormat) -> Result<Self> {
        let file = match format {
            CaseFormat::Json => serde_json::from_str(content)?,
            CaseFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(file)
    }

    /// 构建全部区域网格
    pub fn build_meshes(&self) -> Result<Vec<ZoneMesh>> {
        if self.meshes.len() != COUPLED_ZONES {
            bail!("算例需要 {} 个区域网格，实际 {}", COUPLED_ZONES, self.meshes.len());
        }
        self.meshes
            .iter()
            .enumerate()
            .map(|(z, data)| ZoneMesh::from_data(data).with_context(|| format!("区域 {} 网格无效", z)))
            .collect()
    }

    /// 检查配置并构建网格与 donor 映射
    pub fn prepare(&self, options: &InterpolationOptions) -> Result<(Vec<ZoneMesh>, DonorMap)> {
        self.case.validate().context("算例配置无效")?;
        let meshes = self.build_meshes()?;
        let map = self.build_map(&meshes, options)?;
        Ok((meshes, map))
    }

    /// 以给定选项构建区域 0 与区域 1 之间的映射
    pub fn build_map(&self, meshes: &[ZoneMesh], options: &InterpolationOptions) -> Result<DonorMap> {
        DonorMap::build(meshes, &self.case.zones, (zone(0), zone(1)), COUPLED_ZONES, options)
            .context("donor 映射构建失败")
    }

    /// 算例名（未命名时取文件名）
    pub fn display_name(&self, path: &Path) -> String {
        if self.case.name.is_empty() {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string()
        } else {
            self.case.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_config::InterpolationMethod;
    use std::io::Write;

    const CURVE_CASE: &str = include_str!("../demos/curve_case.json");
    const PLATE_CASE: &str = include_str!("../demos/plate_case.yaml");

    #[test]
    fn test_parse_demo_cases() {
        for (content, format) in [(CURVE_CASE, CaseFormat::Json), (PLATE_CASE, CaseFormat::Yaml)] {
            let file = CaseFile::parse(content, format).unwrap();
            file.case.validate().unwrap();
            let meshes = file.build_meshes().unwrap();
            let map = file.build_map(&meshes, &file.case.interpolation).unwrap();
            assert_eq!(map.interfaces().len(), 1);
        }
    }

    #[test]
    fn test_load_and_prepare() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        tmp.write_all(CURVE_CASE.as_bytes()).unwrap();
        let options = InterpolationOptions::with_method(InterpolationMethod::NearestNeighbor);
        let file = CaseFile::load(tmp.path()).unwrap();
        let (meshes, map) = file.prepare(&options).unwrap();
        assert_eq!(file.display_name(tmp.path()), "curve");
        assert_eq!(meshes.len(), 2);
        assert_eq!(map.method(), InterpolationMethod::NearestNeighbor);
    }

    #[test]
    fn test_wrong_mesh_count() {
        let mut file = CaseFile::parse(CURVE_CASE, CaseFormat::Json).unwrap();
        file.meshes.pop();
        assert!(file.build_meshes().is_err());
    }
}
