// crates/fsi_interp/src/field.rs

//! FieldStore - 按 `(zone, point)` 寻址的通用数据场
//!
//! 每个区域的每个网格点存储定长 `n_var` 个分量，按点连续布局。
//!
//! # 未初始化语义
//!
//! 区域未分配（或 `n_var == 0`）时：
//!
//! - 读操作返回 0.0（切片读取返回空切片）
//! - 写操作被忽略，并输出 `log::warn!` 诊断
//!
//! 越界访问属于调用方错误，仅在 debug 构建中断言。

use fsi_foundation::{PointIndex, ZoneIndex};

/// 单个区域的数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneField {
    n_points: usize,
    n_var: usize,
    values: Vec<f64>,
}

impl ZoneField {
    /// 分配并置零
    pub fn zeros(n_points: usize, n_var: usize) -> Self {
        Self {
            n_points,
            n_var,
            values: vec![0.0; n_points * n_var],
        }
    }

    /// 网格点数
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// 每点变量数
    #[inline]
    pub fn n_var(&self) -> usize {
        self.n_var
    }

    /// 是否已分配
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.n_var > 0
    }

    /// 单点数据
    #[inline]
    pub fn row(&self, point: PointIndex) -> &[f64] {
        if !self.is_allocated() {
            return &[];
        }
        let p = point.as_usize();
        debug_assert!(p < self.n_points, "网格点 {} 超出范围 0..{}", p, self.n_points);
        &self.values[p * self.n_var..(p + 1) * self.n_var]
    }

    /// 单点数据（可变）
    #[inline]
    pub fn row_mut(&mut self, point: PointIndex) -> &mut [f64] {
        if !self.is_allocated() {
            return &mut [];
        }
        let p = point.as_usize();
        debug_assert!(p < self.n_points, "网格点 {} 超出范围 0..{}", p, self.n_points);
        &mut self.values[p * self.n_var..(p + 1) * self.n_var]
    }

    /// 全部数据（点优先布局）
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// 数据场存储
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    zones: Vec<ZoneField>,
}

impl FieldStore {
    /// 为 `n_zones` 个区域创建未分配的存储
    pub fn new(n_zones: usize) -> Self {
        Self {
            zones: vec![ZoneField::default(); n_zones],
        }
    }

    /// 为区域分配 `n_var` 个分量（覆盖已有数据）
    ///
    /// `n_var == 0` 释放存储。
    pub fn allocate(&mut self, zone: ZoneIndex, n_points: usize, n_var: usize) {
        let z = zone.as_usize();
        if z >= self.zones.len() {
            self.zones.resize(z + 1, ZoneField::default());
        }
        self.zones[z] = if n_var == 0 {
            ZoneField::default()
        } else {
            ZoneField::zeros(n_points, n_var)
        };
    }

    /// 区域数据
    #[inline]
    pub fn zone(&self, zone: ZoneIndex) -> Option<&ZoneField> {
        self.zones.get(zone.as_usize())
    }

    /// 区域变量数（未分配为 0）
    #[inline]
    pub fn n_var(&self, zone: ZoneIndex) -> usize {
        self.zone(zone).map_or(0, ZoneField::n_var)
    }

    /// 区域是否已分配
    #[inline]
    pub fn is_allocated(&self, zone: ZoneIndex) -> bool {
        self.n_var(zone) > 0
    }

    /// 读取单个分量
    #[inline]
    pub fn get(&self, zone: ZoneIndex, point: PointIndex, var: usize) -> f64 {
        match self.zone(zone) {
            Some(field) if field.is_allocated() => {
                debug_assert!(var < field.n_var, "变量 {} 超出范围 0..{}", var, field.n_var);
                field.row(point)[var]
            }
            _ => 0.0,
        }
    }

    /// 读取单点全部分量
    #[inline]
    pub fn row(&self, zone: ZoneIndex, point: PointIndex) -> &[f64] {
        match self.zone(zone) {
            Some(field) => field.row(point),
            None => &[],
        }
    }

    /// 写入单个分量
    pub fn set(&mut self, zone: ZoneIndex, point: PointIndex, var: usize, value: f64) {
        match self.zones.get_mut(zone.as_usize()) {
            Some(field) if field.is_allocated() => {
                debug_assert!(var < field.n_var, "变量 {} 超出范围 0..{}", var, field.n_var);
                field.row_mut(point)[var] = value;
            }
            _ => log::warn!(
                "区域 {} 的数据场未初始化，忽略写入 (point {}, var {})",
                zone,
                point,
                var
            ),
        }
    }

    /// 写入单点全部分量（超出 `n_var` 的部分被忽略）
    pub fn set_row(&mut self, zone: ZoneIndex, point: PointIndex, values: &[f64]) {
        match self.zones.get_mut(zone.as_usize()) {
            Some(field) if field.is_allocated() => {
                debug_assert!(
                    values.len() >= field.n_var,
                    "写入 {} 个分量，少于 n_var = {}",
                    values.len(),
                    field.n_var
                );
                let row = field.row_mut(point);
                let n = row.len().min(values.len());
                row[..n].copy_from_slice(&values[..n]);
            }
            _ => log::warn!("区域 {} 的数据场未初始化，忽略写入 (point {})", zone, point),
        }
    }

    /// 同时借用接收区域（可变）与 donor 区域（只读）
    ///
    /// 两区域相同或任一不存在时返回 None。
    pub fn split_pair(
        &mut self,
        receiver: ZoneIndex,
        donor: ZoneIndex,
    ) -> Option<(&mut ZoneField, &ZoneField)> {
        let (r, d) = (receiver.as_usize(), donor.as_usize());
        if r == d || r >= self.zones.len() || d >= self.zones.len() {
            return None;
        }
        if r < d {
            let (lo, hi) = self.zones.split_at_mut(d);
            Some((&mut lo[r], &hi[0]))
        } else {
            let (lo, hi) = self.zones.split_at_mut(r);
            Some((&mut hi[0], &lo[d]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_foundation::index::{point, zone};

    #[test]
    fn test_allocate_and_access() {
        let mut store = FieldStore::new(2);
        store.allocate(zone(1), 3, 2);
        assert!(store.is_allocated(zone(1)));
        assert!(!store.is_allocated(zone(0)));

        store.set(zone(1), point(2), 1, 4.5);
        assert_eq!(store.get(zone(1), point(2), 1), 4.5);
        assert_eq!(store.row(zone(1), point(2)), &[0.0, 4.5]);

        store.set_row(zone(1), point(0), &[1.0, 2.0]);
        assert_eq!(store.zone(zone(1)).unwrap().values(), &[1.0, 2.0, 0.0, 0.0, 0.0, 4.5]);
    }

    #[test]
    fn test_uninitialized_reads_zero_and_ignores_writes() {
        let mut store = FieldStore::new(2);
        assert_eq!(store.get(zone(0), point(7), 0), 0.0);
        assert!(store.row(zone(0), point(7)).is_empty());

        store.set(zone(0), point(7), 0, 3.0);
        store.set_row(zone(0), point(7), &[3.0]);
        assert_eq!(store.get(zone(0), point(7), 0), 0.0);

        // 未知区域同样按未初始化处理
        assert_eq!(store.get(zone(9), point(0), 0), 0.0);
    }

    #[test]
    fn test_allocate_zero_releases() {
        let mut store = FieldStore::new(1);
        store.allocate(zone(0), 4, 1);
        store.set(zone(0), point(1), 0, 1.0);
        store.allocate(zone(0), 4, 0);
        assert!(!store.is_allocated(zone(0)));
        assert_eq!(store.get(zone(0), point(1), 0), 0.0);
    }

    #[test]
    fn test_split_pair() {
        let mut store = FieldStore::new(2);
        store.allocate(zone(0), 1, 1);
        store.allocate(zone(1), 1, 1);
        store.set(zone(0), point(0), 0, 2.0);

        let (recv, donor) = store.split_pair(zone(1), zone(0)).unwrap();
        recv.row_mut(point(0))[0] = donor.row(point(0))[0] * 3.0;
        assert_eq!(store.get(zone(1), point(0), 0), 6.0);

        assert!(store.split_pair(zone(0), zone(0)).is_none());
        assert!(store.split_pair(zone(0), zone(5)).is_none());
    }
}
