// apps/fsi_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod map;
pub mod transfer;
pub mod validate;

use clap::{Args, ValueEnum};
use fsi_config::{InterpolationMethod, InterpolationOptions, SearchStrategy};

/// 插值方法
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MethodArg {
    /// 最近顶点
    NearestNeighbor,
    /// 一致-守恒投影
    ConsistentConservative,
}

impl From<MethodArg> for InterpolationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::NearestNeighbor => Self::NearestNeighbor,
            MethodArg::ConsistentConservative => Self::ConsistentConservative,
        }
    }
}

/// 最近顶点搜索策略
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SearchArg {
    /// 逐点扫描
    BruteForce,
    /// R-Tree
    Rtree,
}

impl From<SearchArg> for SearchStrategy {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::BruteForce => Self::BruteForce,
            SearchArg::Rtree => Self::RTree,
        }
    }
}

/// 覆盖算例中的插值选项
#[derive(Args, Debug, Default)]
pub struct OptionOverrides {
    /// 插值方法
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// 搜索策略
    #[arg(long, value_enum)]
    pub search: Option<SearchArg>,
}

impl OptionOverrides {
    /// 应用到算例选项
    pub fn apply(&self, options: &InterpolationOptions) -> InterpolationOptions {
        let mut options = options.clone();
        if let Some(method) = self.method {
            options.method = method.into();
        }
        if let Some(search) = self.search {
            options.search = search.into();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let base = InterpolationOptions::default();
        let none = OptionOverrides::default();
        assert_eq!(none.apply(&base), base);

        let both = OptionOverrides {
            method: Some(MethodArg::ConsistentConservative),
            search: Some(SearchArg::Rtree),
        };
        let options = both.apply(&base);
        assert_eq!(options.method, InterpolationMethod::ConsistentConservative);
        assert_eq!(options.search, SearchStrategy::RTree);
        assert_eq!(options.weight_tolerance, base.weight_tolerance);
    }
}
