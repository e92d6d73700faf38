// crates/fsi_interp/src/donor.rs

//! Donor 记录
//!
//! 每个界面顶点（接收方）持有一组来自对方区域的 donor 点及其权重。

use fsi_foundation::{MarkerIndex, PointHandle, PointIndex, VertexHandle, VertexIndex, ZoneIndex};

/// 单个 donor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donor {
    /// donor 所在区域
    pub zone: ZoneIndex,
    /// donor 网格点
    pub point: PointIndex,
    /// donor 所在标记
    pub marker: MarkerIndex,
    /// donor 在标记内的顶点编号
    pub vertex: VertexIndex,
    /// 传递权重
    pub weight: f64,
}

impl Donor {
    /// `(zone, point)` 句柄
    #[inline]
    pub fn point_handle(&self) -> PointHandle {
        PointHandle::new(self.zone, self.point)
    }

    /// `(zone, marker, vertex)` 句柄
    #[inline]
    pub fn vertex_handle(&self) -> VertexHandle {
        VertexHandle::new(self.zone, self.marker, self.vertex)
    }
}

/// 单个接收顶点的 donor 列表
#[derive(Debug, Clone, PartialEq)]
pub struct DonorRecord {
    /// 接收顶点
    pub receiver: VertexHandle,
    /// 接收顶点对应的网格点
    pub point: PointIndex,
    /// donor（有序）
    pub donors: Vec<Donor>,
    /// 是否为最近顶点兜底（无可用单元或无人引用）
    pub fallback: bool,
}

impl DonorRecord {
    /// 创建空记录
    pub fn new(receiver: VertexHandle, point: PointIndex) -> Self {
        Self {
            receiver,
            point,
            donors: Vec::new(),
            fallback: false,
        }
    }

    /// 单 donor 记录
    pub fn single(receiver: VertexHandle, point: PointIndex, donor: Donor) -> Self {
        Self {
            receiver,
            point,
            donors: vec![donor],
            fallback: false,
        }
    }

    /// donor 数量
    #[inline]
    pub fn n_donors(&self) -> usize {
        self.donors.len()
    }

    /// 权重和
    #[inline]
    pub fn weight_sum(&self) -> f64 {
        self.donors.iter().map(|d| d.weight).sum()
    }
}

/// 一个界面标记上所有接收顶点的记录（按顶点顺序）
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDonors {
    /// 界面配对索引
    pub interface: u32,
    /// 接收方标记
    pub marker: MarkerIndex,
    /// 第 v 项对应标记内顶点 v
    pub records: Vec<DonorRecord>,
}

/// 一个区域作为接收方的全部 donor 记录
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDonors {
    /// 接收方区域
    pub zone: ZoneIndex,
    /// donor 所在区域
    pub donor_zone: ZoneIndex,
    /// 各界面标记（按界面索引升序）
    pub markers: Vec<MarkerDonors>,
}

impl ZoneDonors {
    /// 创建空集合
    pub fn new(zone: ZoneIndex, donor_zone: ZoneIndex) -> Self {
        Self {
            zone,
            donor_zone,
            markers: Vec::new(),
        }
    }

    /// 所有接收记录
    pub fn records(&self) -> impl Iterator<Item = &DonorRecord> + '_ {
        self.markers.iter().flat_map(|m| m.records.iter())
    }

    /// 接收顶点数
    pub fn n_receivers(&self) -> usize {
        self.markers.iter().map(|m| m.records.len()).sum()
    }

    /// 查找某个接收顶点的记录
    pub fn record(&self, marker: MarkerIndex, vertex: VertexIndex) -> Option<&DonorRecord> {
        self.markers
            .iter()
            .find(|m| m.marker == marker)
            .and_then(|m| m.records.get(vertex.as_usize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_foundation::index::{marker, point, vertex, zone};

    fn donor(p: u32, w: f64) -> Donor {
        Donor {
            zone: zone(1),
            point: point(p),
            marker: marker(0),
            vertex: vertex(p),
            weight: w,
        }
    }

    #[test]
    fn test_weight_sum() {
        let mut rec = DonorRecord::new(VertexHandle::new(zone(0), marker(2), vertex(5)), point(9));
        rec.donors.push(donor(0, 0.25));
        rec.donors.push(donor(1, 0.75));
        assert_eq!(rec.n_donors(), 2);
        assert!((rec.weight_sum() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_record_lookup() {
        let receiver = VertexHandle::new(zone(0), marker(2), vertex(0));
        let mut donors = ZoneDonors::new(zone(0), zone(1));
        donors.markers.push(MarkerDonors {
            interface: 1,
            marker: marker(2),
            records: vec![DonorRecord::single(receiver, point(4), donor(3, 1.0))],
        });
        assert_eq!(donors.n_receivers(), 1);
        let rec = donors.record(marker(2), vertex(0)).unwrap();
        assert_eq!(rec.donors[0].point_handle(), PointHandle::new(zone(1), point(3)));
        assert!(donors.record(marker(1), vertex(0)).is_none());
        assert!(donors.record(marker(2), vertex(1)).is_none());
    }
}
