// crates/fsi_interp/src/transfer.rs

//! 传递引擎
//!
//! 读取 donor 区域的数据或位移，按 donor 记录计算接收区域的值。
//! 不持有状态，任何映射策略生成的记录都适用。
//!
//! # 位移传递
//!
//! ```text
//! d_r = Σ w_i · (d_i + θ_i × (x_r - x_i))
//! ```
//!
//! 二维时转动只有 z 分量，转动项为 `(-l_y·θ_z, l_x·θ_z)`。
//! 对线化刚体运动 `d(x) = t + θ × (x - c)`，只要权重和为 1，结果精确。

use fsi_foundation::MarkerIndex;
use fsi_foundation::VertexIndex;
use fsi_geo::Point3D;
use fsi_mesh::ZoneGeometry;

use crate::donor::DonorRecord;
use crate::field::ZoneField;

/// 转动引起的位移项
///
/// `lever` 为接收顶点坐标减 donor 点坐标。
#[inline]
pub fn rotation_term(rotation: &Point3D, lever: &Point3D, n_dim: usize) -> Point3D {
    if n_dim == 2 {
        Point3D::new(-lever.y * rotation.z, lever.x * rotation.z, 0.0)
    } else {
        rotation.cross(lever)
    }
}

/// 传递通用数据
///
/// 对每条记录：先将接收点数据置零，再累加 `weight * donor_data`。
/// 两个区域的变量数不同时，只传递共同的分量，其余保持为零。
pub fn propagate_data<'r>(
    records: impl IntoIterator<Item = &'r DonorRecord>,
    donor: &ZoneField,
    receiver: &mut ZoneField,
) {
    for record in records {
        let out = receiver.row_mut(record.point);
        out.fill(0.0);
        for d in &record.donors {
            let src = donor.row(d.point);
            for (o, s) in out.iter_mut().zip(src) {
                *o += d.weight * s;
            }
        }
    }
}

/// 计算接收顶点的新位移
///
/// 只读取几何，结果按记录顺序返回，由调用方写回。
pub fn interpolate_displacement<'r, G: ZoneGeometry + ?Sized>(
    records: impl IntoIterator<Item = &'r DonorRecord>,
    donor: &G,
    receiver: &G,
) -> Vec<(MarkerIndex, VertexIndex, Point3D)> {
    let n_dim = receiver.n_dim();
    records
        .into_iter()
        .map(|record| {
            let handle = record.receiver;
            let x_r = receiver.vertex_coord(handle.marker, handle.vertex);
            let mut acc = [0.0f64; 3];
            for d in &record.donors {
                let lever = x_r - donor.point_coord(d.point);
                let disp = donor.vertex_displacement(d.marker, d.vertex)
                    + rotation_term(&donor.vertex_rotation(d.marker, d.vertex), &lever, n_dim);
                acc[0] += d.weight * disp.x;
                acc[1] += d.weight * disp.y;
                acc[2] += d.weight * disp.z;
            }
            (handle.marker, handle.vertex, Point3D::from(acc).truncated(n_dim))
        })
        .collect()
}
