// crates/fsi_interp/src/mapper/nearest_neighbor.rs

//! 最近顶点映射
//!
//! 每个接收顶点取对方标记上距离最近的顶点作为唯一 donor，权重 1.0。
//! 距离相等时取编号最小的顶点。A → B 与 B → A 两个方向独立搜索。

use fsi_config::SearchStrategy;
use fsi_foundation::{FsiResult, VertexIndex};
use fsi_mesh::ZoneGeometry;

use super::{MarkerSide, PairDonors, ZonePair};
use crate::donor::{MarkerDonors, DonorRecord};

/// 最近顶点映射
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighborMapper {
    /// 搜索策略
    pub search: SearchStrategy,
}

impl NearestNeighborMapper {
    /// 创建映射器
    pub fn new(search: SearchStrategy) -> Self {
        Self { search }
    }

    /// 构建两个方向的 donor 记录
    pub fn build<G: ZoneGeometry + ?Sized>(&self, pair: &ZonePair<'_, G>) -> FsiResult<PairDonors> {
        let mut donors = pair.empty_donors();
        for interface in pair.interfaces {
            let (side_a, side_b) = pair.sides(interface);
            donors.a.markers.push(self.map_marker(&side_a, &side_b)?);
            donors.b.markers.push(self.map_marker(&side_b, &side_a)?);
        }
        Ok(donors)
    }

    fn map_marker<G: ZoneGeometry + ?Sized>(
        &self,
        receiver: &MarkerSide<'_, G>,
        donor: &MarkerSide<'_, G>,
    ) -> FsiResult<MarkerDonors> {
        let search = donor.search(self.search);
        let records = (0..receiver.n_vertices())
            .map(|v| {
                let v = VertexIndex::from_usize(v);
                let (nearest, _) = donor.nearest(&search, &receiver.coord(v))?;
                let rec = receiver.receiver(v);
                Ok(DonorRecord::single(rec.receiver, rec.point, donor.donor(nearest, 1.0)))
            })
            .collect::<FsiResult<Vec<_>>>()?;

        log::debug!(
            "最近点映射: 界面 {} 区域 {} 标记 {} <- 区域 {} 标记 {}, {} 个顶点",
            receiver.interface,
            receiver.zone,
            receiver.marker,
            donor.zone,
            donor.marker,
            records.len()
        );

        Ok(MarkerDonors {
            interface: receiver.interface,
            marker: receiver.marker,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_config::InterfacePair;
    use fsi_foundation::index::{marker, zone};
    use fsi_geo::Point3D;
    use fsi_mesh::{ZoneMesh, ZoneMeshBuilder};

    fn line_zone(xs: &[f64]) -> ZoneMesh {
        let n = xs.len();
        ZoneMeshBuilder::new(2)
            .points(xs.iter().map(|&x| Point3D::new_2d(x, 0.0)))
            .marker("fsi", &(0..n).collect::<Vec<_>>())
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_donor_weight_one() {
        let a = line_zone(&[0.0, 2.0]);
        let b = line_zone(&[1.0]);
        let interfaces = [InterfacePair { interface: 1, marker_a: marker(0), marker_b: marker(0) }];
        let pair = ZonePair {
            zone_a: zone(0),
            geometry_a: &a,
            zone_b: zone(1),
            geometry_b: &b,
            interfaces: &interfaces,
        };

        for search in [SearchStrategy::BruteForce, SearchStrategy::RTree] {
            let donors = NearestNeighborMapper::new(search).build(&pair).unwrap();

            // A 的两个顶点都取 B 的唯一顶点
            let recs = &donors.a.markers[0].records;
            assert_eq!(recs.len(), 2);
            for rec in recs {
                assert_eq!(rec.donors.len(), 1);
                assert_eq!(rec.donors[0].zone, zone(1));
                assert_eq!(rec.donors[0].weight, 1.0);
            }

            // B 的顶点到 A 两顶点等距，取先扫描的 0
            let rec = &donors.b.markers[0].records[0];
            assert_eq!(rec.donors[0].vertex.index(), 0);
            assert_eq!(rec.donors[0].zone, zone(0));
        }
    }
}
