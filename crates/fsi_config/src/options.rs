// crates/fsi_config/src/options.rs

//! InterpolationOptions - 界面插值选项
//!
//! 选择 donor 映射的构建方法与最近点搜索策略，并给出构建期使用的容差。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 插值方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// 最近点（每个顶点一个 donor，权重 1）
    #[default]
    NearestNeighbor,
    /// 基于单元投影的一致/守恒插值
    ConsistentConservative,
}

impl InterpolationMethod {
    /// 方法名
    pub fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest_neighbor",
            Self::ConsistentConservative => "consistent_conservative",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 最近点搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// 逐顶点扫描
    #[default]
    BruteForce,
    /// R-Tree 加速
    #[serde(rename = "rtree")]
    RTree,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BruteForce => f.write_str("brute_force"),
            Self::RTree => f.write_str("rtree"),
        }
    }
}

/// 界面插值选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationOptions {
    /// 插值方法
    #[serde(default)]
    pub method: InterpolationMethod,

    /// 最近点搜索策略
    #[serde(default)]
    pub search: SearchStrategy,

    /// 单元权重和偏离 1 的容许量
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,

    /// 退化单元判据（无量纲：线单元相对坐标量级的长度平方，三角形夹角正弦平方）
    #[serde(default = "default_degenerate_tolerance")]
    pub degenerate_tolerance: f64,

    /// 构建后立即分配的变量数（None 时取空间维度）
    #[serde(default)]
    pub n_variables: Option<usize>,
}

fn default_weight_tolerance() -> f64 { 1e-10 }
fn default_degenerate_tolerance() -> f64 { 1e-24 }

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::default(),
            search: SearchStrategy::default(),
            weight_tolerance: default_weight_tolerance(),
            degenerate_tolerance: default_degenerate_tolerance(),
            n_variables: None,
        }
    }
}

impl InterpolationOptions {
    /// 指定方法，其余取默认
    pub fn with_method(method: InterpolationMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// 设置搜索策略
    pub fn search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// 设置初始变量数
    pub fn n_variables(mut self, n_var: usize) -> Self {
        self.n_variables = Some(n_var);
        self
    }

    /// 验证选项有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.weight_tolerance > 0.0 && self.weight_tolerance < 1.0) {
            return Err(ConfigError::invalid_value(
                "interpolation.weight_tolerance",
                self.weight_tolerance,
                "权重容差必须在 (0, 1) 范围内",
            ));
        }

        if !(self.degenerate_tolerance >= 0.0 && self.degenerate_tolerance.is_finite()) {
            return Err(ConfigError::invalid_value(
                "interpolation.degenerate_tolerance",
                self.degenerate_tolerance,
                "退化判据不能为负",
            ));
        }

        Ok(())
    }
}
