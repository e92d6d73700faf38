// crates/fsi_interp/src/donor_map.rs

//! DonorMap - 两区域界面插值映射
//!
//! 持有两个方向的 donor 记录与 `(zone, point)` 数据场，对外提供数据传递与
//! 位移传递操作。
//!
//! # 生命周期
//!
//! 1. [`DonorMap::build`] 校验拓扑并构建 donor 记录（每个区域对、每种拓扑一次）
//! 2. 每次耦合迭代：更新一侧的数据/位移，再调用 [`DonorMap::propagate_data`] 或
//!    [`DonorMap::propagate_displacement`] 计算另一侧
//! 3. 拓扑变化后显式调用 [`DonorMap::rebuild`]
//!
//! # 示例
//!
//! ```
//! use fsi_config::{InterpolationOptions, MarkerConfig, ZoneConfig};
//! use fsi_foundation::index::{point, zone};
//! use fsi_geo::Point3D;
//! use fsi_interp::DonorMap;
//! use fsi_mesh::ZoneMeshBuilder;
//!
//! let fluid = ZoneMeshBuilder::new(2)
//!     .points([Point3D::new_2d(0.0, 0.0), Point3D::new_2d(2.0, 0.0)])
//!     .marker("wall", &[0, 1])
//!     .build()
//!     .unwrap();
//! let solid = ZoneMeshBuilder::new(2)
//!     .points([Point3D::new_2d(1.0, 0.0)])
//!     .marker("skin", &[0])
//!     .build()
//!     .unwrap();
//! let configs = [
//!     ZoneConfig::new("fluid", vec![MarkerConfig::interface("wall", 1)]),
//!     ZoneConfig::new("solid", vec![MarkerConfig::interface("skin", 1)]),
//! ];
//!
//! let mut map = DonorMap::build(
//!     &[fluid, solid],
//!     &configs,
//!     (zone(0), zone(1)),
//!     2,
//!     &InterpolationOptions::default().n_variables(1),
//! )
//! .unwrap();
//!
//! map.set_data(zone(1), point(0), 0, 7.0);
//! map.propagate_data(zone(0)).unwrap();
//! assert_eq!(map.data(zone(0), point(1), 0), 7.0);
//! ```

use fsi_config::{pair_interfaces, InterfacePair, InterpolationMethod, InterpolationOptions, ZoneConfig};
use fsi_foundation::{
    FsiError, FsiResult, MarkerIndex, PointIndex, VertexHandle, VertexIndex, ZoneIndex,
};
use fsi_mesh::{ZoneGeometry, ZoneGeometryMut};

use crate::donor::{Donor, DonorRecord, ZoneDonors};
use crate::field::FieldStore;
use crate::mapper::{Mapper, ZonePair};
use crate::statistics::MapStatistics;
use crate::transfer;

/// 两区域耦合要求的区域数
const COUPLED_ZONES: usize = 2;

/// 界面插值映射
#[derive(Debug, Clone)]
pub struct DonorMap {
    mapper: Mapper,
    options: InterpolationOptions,
    n_zones: usize,
    n_dim: usize,
    /// 两个区域的网格点数（与 `donors` 同序）
    n_points: [usize; COUPLED_ZONES],
    interfaces: Vec<InterfacePair>,
    /// `donors[0]` 接收方为区域 A，`donors[1]` 为区域 B
    donors: [ZoneDonors; COUPLED_ZONES],
    field: FieldStore,
}

impl DonorMap {
    // =========================================================================
    // 构建
    // =========================================================================

    /// 校验拓扑并构建映射
    ///
    /// - `geometry` / `configs`: 按区域编号索引，至少覆盖 `n_zones` 个区域
    /// - `zone_pair`: `(A, B)`；守恒映射中 A 为一致方向（通常是流体侧）
    /// - `n_zones`: 问题中的区域总数，必须为 2
    ///
    /// 构建完成后按 `options.n_variables`（缺省为空间维度）分配两个区域的数据场。
    pub fn build<G: ZoneGeometry>(
        geometry: &[G],
        configs: &[ZoneConfig],
        zone_pair: (ZoneIndex, ZoneIndex),
        n_zones: usize,
        options: &InterpolationOptions,
    ) -> FsiResult<Self> {
        options.validate()?;
        let (zone_a, zone_b) = zone_pair;
        let (geometry_a, geometry_b, interfaces) =
            validate_topology(geometry, configs, zone_pair, n_zones)?;

        let mapper = Mapper::from_options(options);
        let pair = ZonePair {
            zone_a,
            geometry_a,
            zone_b,
            geometry_b,
            interfaces: &interfaces,
        };
        let donors = mapper.build(&pair)?;

        let n_dim = geometry_a.n_dim();
        let mut map = Self {
            mapper,
            options: options.clone(),
            n_zones,
            n_dim,
            n_points: [geometry_a.n_points(), geometry_b.n_points()],
            interfaces,
            donors: [donors.a, donors.b],
            field: FieldStore::new(n_zones),
        };

        let n_var = options.n_variables.unwrap_or(n_dim);
        map.initialize_data(&[zone_a, zone_b], n_var)?;
        map.log_summary();
        Ok(map)
    }

    /// 以相同选项重新构建（拓扑变化后调用）
    ///
    /// 网格点数未变的区域保留已有数据。
    pub fn rebuild<G: ZoneGeometry>(
        &mut self,
        geometry: &[G],
        configs: &[ZoneConfig],
    ) -> FsiResult<()> {
        let zone_pair = (self.donors[0].zone, self.donors[1].zone);
        let mut fresh = Self::build(geometry, configs, zone_pair, self.n_zones, &self.options)?;
        for (slot, zone) in [zone_pair.0, zone_pair.1].into_iter().enumerate() {
            let n_points = fresh.n_points[slot];
            let old_n_var = self.field.n_var(zone);
            fresh.field.allocate(zone, n_points, old_n_var);
            if old_n_var == 0 || n_points != self.n_points[slot] {
                continue;
            }
            for p in 0..n_points {
                let p = PointIndex::from_usize(p);
                fresh.field.set_row(zone, p, self.field.row(zone, p));
            }
        }
        *self = fresh;
        Ok(())
    }

    // =========================================================================
    // 数据场
    // =========================================================================

    /// 为列出的区域分配 `n_var` 个分量并置零
    ///
    /// `n_var == 0` 使存储保持未分配：读取返回 0.0，写入被忽略。
    ///
    /// 任一区域不属于本映射时返回错误，且不改动任何区域的数据。
    pub fn initialize_data(&mut self, zones: &[ZoneIndex], n_var: usize) -> FsiResult<()> {
        let slots = zones
            .iter()
            .map(|&zone| self.slot(zone))
            .collect::<FsiResult<Vec<_>>>()?;
        for (&zone, slot) in zones.iter().zip(slots) {
            self.field.allocate(zone, self.n_points[slot], n_var);
        }
        if n_var == 0 {
            log::warn!("数据场以 0 个变量初始化，读取将返回 0.0 且写入被忽略");
        }
        Ok(())
    }

    /// 读取单个分量
    #[inline]
    pub fn data(&self, zone: ZoneIndex, point: PointIndex, var: usize) -> f64 {
        self.field.get(zone, point, var)
    }

    /// 读取单点全部分量
    #[inline]
    pub fn data_var(&self, zone: ZoneIndex, point: PointIndex) -> &[f64] {
        self.field.row(zone, point)
    }

    /// 写入单个分量
    #[inline]
    pub fn set_data(&mut self, zone: ZoneIndex, point: PointIndex, var: usize, value: f64) {
        self.field.set(zone, point, var, value);
    }

    /// 写入单点全部分量
    #[inline]
    pub fn set_data_var(&mut self, zone: ZoneIndex, point: PointIndex, values: &[f64]) {
        self.field.set_row(zone, point, values);
    }

    /// 区域变量数（未分配为 0）
    #[inline]
    pub fn n_variables(&self, zone: ZoneIndex) -> usize {
        self.field.n_var(zone)
    }

    /// 数据场
    #[inline]
    pub fn field(&self) -> &FieldStore {
        &self.field
    }

    // =========================================================================
    // 传递
    // =========================================================================

    /// 由对方区域的数据计算 `zone` 所有界面顶点的数据
    ///
    /// 接收侧存储未初始化时不做任何事并输出诊断；donor 侧未初始化时按读取
    /// 为 0.0 处理，接收顶点的数据被置零。
    pub fn propagate_data(&mut self, zone: ZoneIndex) -> FsiResult<()> {
        let slot = self.slot(zone)?;
        let donors = &self.donors[slot];
        let donor_zone = donors.donor_zone;
        if !self.field.is_allocated(zone) {
            log::warn!("区域 {} 的数据场未初始化，跳过数据传递", zone);
            return Ok(());
        }
        if !self.field.is_allocated(donor_zone) {
            log::warn!("donor 区域 {} 的数据场未初始化，区域 {} 的界面数据置零", donor_zone, zone);
        }
        match self.field.split_pair(zone, donor_zone) {
            Some((receiver, donor)) => transfer::propagate_data(donors.records(), donor, receiver),
            None => return Err(FsiError::internal("接收区域与 donor 区域相同")),
        }
        Ok(())
    }

    /// 由对方区域的位移与转动计算 `zone` 所有界面顶点的位移，并写回几何
    pub fn propagate_displacement<G: ZoneGeometryMut>(
        &self,
        geometry: &mut [G],
        zone: ZoneIndex,
    ) -> FsiResult<()> {
        let slot = self.slot(zone)?;
        let donors = &self.donors[slot];
        let (r, d) = (zone.as_usize(), donors.donor_zone.as_usize());
        let receiver = geometry.get(r).ok_or_else(|| missing_geometry(r))?;
        let donor = geometry.get(d).ok_or_else(|| missing_geometry(d))?;

        let updates = transfer::interpolate_displacement(donors.records(), donor, receiver);
        let receiver = geometry.get_mut(r).ok_or_else(|| missing_geometry(r))?;
        for (marker, vertex, displacement) in updates {
            receiver.set_vertex_displacement(marker, vertex, displacement);
        }
        Ok(())
    }

    // =========================================================================
    // 查询
    // =========================================================================

    /// 插值方法
    #[inline]
    pub fn method(&self) -> InterpolationMethod {
        self.mapper.method()
    }

    /// 构建使用的选项
    #[inline]
    pub fn options(&self) -> &InterpolationOptions {
        &self.options
    }

    /// 区域对 `(A, B)`
    #[inline]
    pub fn zones(&self) -> (ZoneIndex, ZoneIndex) {
        (self.donors[0].zone, self.donors[1].zone)
    }

    /// 空间维度
    #[inline]
    pub fn n_dim(&self) -> usize {
        self.n_dim
    }

    /// 界面配对
    #[inline]
    pub fn interfaces(&self) -> &[InterfacePair] {
        &self.interfaces
    }

    /// 区域作为接收方的全部记录
    pub fn zone_donors(&self, zone: ZoneIndex) -> FsiResult<&ZoneDonors> {
        Ok(&self.donors[self.slot(zone)?])
    }

    /// 某个界面顶点的记录
    pub fn record(&self, handle: VertexHandle) -> Option<&DonorRecord> {
        let slot = self.slot(handle.zone).ok()?;
        self.donors[slot].record(handle.marker, handle.vertex)
    }

    /// 某个界面顶点的 donor 列表
    pub fn donors(&self, zone: ZoneIndex, marker: MarkerIndex, vertex: VertexIndex) -> Option<&[Donor]> {
        self.record(VertexHandle::new(zone, marker, vertex))
            .map(|r| r.donors.as_slice())
    }

    /// 区域的接收权重是否应满足单位分解
    pub fn is_consistent(&self, zone: ZoneIndex) -> FsiResult<bool> {
        Ok(self.mapper.is_consistent_for(self.slot(zone)? == 0))
    }

    // =========================================================================
    // 诊断
    // =========================================================================

    /// 两个方向的统计
    pub fn statistics(&self) -> [MapStatistics; COUPLED_ZONES] {
        [
            MapStatistics::collect(&self.donors[0]),
            MapStatistics::collect(&self.donors[1]),
        ]
    }

    /// 权重和偏离 1 超过 `tol` 的接收顶点
    pub fn check_partition_of_unity(&self, zone: ZoneIndex, tol: f64) -> FsiResult<Vec<VertexHandle>> {
        let slot = self.slot(zone)?;
        Ok(self.donors[slot]
            .records()
            .filter(|r| (r.weight_sum() - 1.0).abs() > tol)
            .map(|r| r.receiver)
            .collect())
    }

    fn slot(&self, zone: ZoneIndex) -> FsiResult<usize> {
        self.donors
            .iter()
            .position(|d| d.zone == zone)
            .ok_or_else(|| FsiError::unknown_zone(zone.as_usize()))
    }

    fn log_summary(&self) {
        for stats in self.statistics() {
            log::info!(
                "donor 映射 ({}): 区域 {} 接收 {} 个顶点, {} 个 donor (每顶点 {}..={}), 权重和 [{:.6}, {:.6}], 兜底 {}",
                self.method(),
                stats.zone,
                stats.n_receivers,
                stats.n_donors,
                stats.min_donors,
                stats.max_donors,
                stats.min_weight_sum,
                stats.max_weight_sum,
                stats.n_fallbacks
            );
        }
        if self.mapper.is_consistent_for(true) {
            let tol = self.options.weight_tolerance;
            let zone_a = self.donors[0].zone;
            if let Ok(bad) = self.check_partition_of_unity(zone_a, tol) {
                if !bad.is_empty() {
                    log::warn!("区域 {} 有 {} 个顶点的权重和偏离 1 超过 {}", zone_a, bad.len(), tol);
                }
            }
        }
    }
}

// =============================================================================
// 拓扑校验
// =============================================================================

fn missing_geometry(zone: usize) -> FsiError {
    FsiError::config(format!("缺少区域 {} 的几何", zone))
}

fn validate_topology<'g, G: ZoneGeometry>(
    geometry: &'g [G],
    configs: &[ZoneConfig],
    (zone_a, zone_b): (ZoneIndex, ZoneIndex),
    n_zones: usize,
) -> FsiResult<(&'g G, &'g G, Vec<InterfacePair>)> {
    if n_zones != COUPLED_ZONES {
        return Err(FsiError::zone_count(COUPLED_ZONES, n_zones));
    }
    if zone_a == zone_b {
        return Err(FsiError::config(format!("区域对中的两个区域相同: {}", zone_a)));
    }
    let (a, b) = (zone_a.as_usize(), zone_b.as_usize());
    for z in [a, b] {
        if z >= n_zones {
            return Err(FsiError::unknown_zone(z));
        }
    }

    let geometry_a = geometry.get(a).ok_or_else(|| missing_geometry(a))?;
    let geometry_b = geometry.get(b).ok_or_else(|| missing_geometry(b))?;
    let config_a = configs
        .get(a)
        .ok_or_else(|| FsiError::config(format!("缺少区域 {} 的配置", a)))?;
    let config_b = configs
        .get(b)
        .ok_or_else(|| FsiError::config(format!("缺少区域 {} 的配置", b)))?;

    let (dim_a, dim_b) = (geometry_a.n_dim(), geometry_b.n_dim());
    for dim in [dim_a, dim_b] {
        if dim != 2 && dim != 3 {
            return Err(FsiError::UnsupportedDimension { dim });
        }
    }
    if dim_a != dim_b {
        return Err(FsiError::DimensionMismatch {
            zone_a: a,
            dim_a,
            zone_b: b,
            dim_b,
        });
    }

    for (z, g, c) in [(a, geometry_a, config_a), (b, geometry_b, config_b)] {
        if c.n_markers() != g.n_markers() {
            return Err(FsiError::invalid_config(
                format!("zones[{}].markers", z),
                c.n_markers().to_string(),
                format!("网格有 {} 个标记", g.n_markers()),
            ));
        }
        for m in c.interface_markers() {
            if c.markers[m.as_usize()].tag != g.marker_tag(m) {
                log::warn!(
                    "区域 {} 标记 {}: 配置名 '{}' 与网格名 '{}' 不一致",
                    z,
                    m,
                    c.markers[m.as_usize()].tag,
                    g.marker_tag(m)
                );
            }
        }
    }

    let interfaces = pair_interfaces(a, config_a, b, config_b)?;
    for iface in &interfaces {
        for (z, g, m) in [(a, geometry_a, iface.marker_a), (b, geometry_b, iface.marker_b)] {
            if g.n_vertices(m) == 0 {
                return Err(FsiError::EmptyInterface {
                    zone: z,
                    marker: m.as_usize(),
                    interface: iface.interface,
                });
            }
        }
    }

    Ok((geometry_a, geometry_b, interfaces))
}
