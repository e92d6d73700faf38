// crates/fsi_interp/src/statistics.rs

//! 映射统计

use fsi_foundation::ZoneIndex;
use serde::Serialize;

use crate::donor::ZoneDonors;

/// 单个接收区域的 donor 统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapStatistics {
    /// 接收区域
    pub zone: ZoneIndex,
    /// donor 区域
    pub donor_zone: ZoneIndex,
    /// 接收顶点数
    pub n_receivers: usize,
    /// donor 总数
    pub n_donors: usize,
    /// 单顶点最少 donor 数
    pub min_donors: usize,
    /// 单顶点最多 donor 数
    pub max_donors: usize,
    /// 最小权重和
    pub min_weight_sum: f64,
    /// 最大权重和
    pub max_weight_sum: f64,
    /// 最近顶点兜底数
    pub n_fallbacks: usize,
}

impl MapStatistics {
    /// 汇总一个区域的记录
    pub fn collect(donors: &ZoneDonors) -> Self {
        let mut stats = Self {
            zone: donors.zone,
            donor_zone: donors.donor_zone,
            n_receivers: 0,
            n_donors: 0,
            min_donors: usize::MAX,
            max_donors: 0,
            min_weight_sum: f64::INFINITY,
            max_weight_sum: f64::NEG_INFINITY,
            n_fallbacks: 0,
        };
        for rec in donors.records() {
            let n = rec.n_donors();
            let sum = rec.weight_sum();
            stats.n_receivers += 1;
            stats.n_donors += n;
            stats.min_donors = stats.min_donors.min(n);
            stats.max_donors = stats.max_donors.max(n);
            stats.min_weight_sum = stats.min_weight_sum.min(sum);
            stats.max_weight_sum = stats.max_weight_sum.max(sum);
            stats.n_fallbacks += usize::from(rec.fallback);
        }
        if stats.n_receivers == 0 {
            stats.min_donors = 0;
            stats.min_weight_sum = 0.0;
            stats.max_weight_sum = 0.0;
        }
        stats
    }

    /// 平均每顶点 donor 数
    pub fn mean_donors(&self) -> f64 {
        if self.n_receivers == 0 {
            0.0
        } else {
            self.n_donors as f64 / self.n_receivers as f64
        }
    }
}

impl std::fmt::Display for MapStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "区域 {} <- 区域 {}: {} 个顶点, {} 个 donor (每顶点 {}..={}, 平均 {:.2}), 权重和 [{:.6}, {:.6}], 兜底 {}",
            self.zone,
            self.donor_zone,
            self.n_receivers,
            self.n_donors,
            self.min_donors,
            self.max_donors,
            self.mean_donors(),
            self.min_weight_sum,
            self.max_weight_sum,
            self.n_fallbacks
        )
    }
}
