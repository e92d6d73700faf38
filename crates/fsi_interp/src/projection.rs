// crates/fsi_interp/src/projection.rs

//! 点到边界面单元的投影与形函数权重
//!
//! 投影点被限制在单元内部（含边界），权重为投影点处的形函数值：
//!
//! - 线单元: 线性插值
//! - 三角形: 重心坐标
//! - 四边形: 沿对角线 0-2 剖分为两个三角形，取较近者的重心坐标（分片线性）
//!
//! 权重非负且和为 1。退化判据是无量纲的相对量，与网格尺度无关：
//!
//! - 线单元: `|ab|² <= tol · max(|a|², |b|²)`（相对坐标量级的长度）
//! - 三角形: `|ab × ac|² <= tol · |ab|² · |ac|²`（夹角正弦平方）
//!
//! 退化单元返回 None。

use fsi_geo::{squared_distance, Point3D};
use fsi_mesh::ElementKind;

/// 投影结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// 查询点到投影点的距离平方
    pub distance_squared: f64,
    weights: [f64; 4],
    n_nodes: usize,
}

impl Projection {
    fn new(distance_squared: f64, weights: [f64; 4], n_nodes: usize) -> Self {
        Self {
            distance_squared,
            weights,
            n_nodes,
        }
    }

    /// 单元节点权重（与节点顺序一致）
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights[..self.n_nodes]
    }
}

/// 投影到线单元 `a-b`
pub fn project_onto_line(
    p: &Point3D,
    a: &Point3D,
    b: &Point3D,
    n_dim: usize,
    degenerate_tol: f64,
) -> Option<Projection> {
    let ab = *b - *a;
    let len2 = ab.length_squared();
    let scale2 = a.length_squared().max(b.length_squared());
    if len2 <= degenerate_tol * scale2 {
        return None;
    }
    let t = ((*p - *a).dot(&ab) / len2).clamp(0.0, 1.0);
    let q = *a + ab * t;
    Some(Projection::new(
        squared_distance(p, &q, n_dim),
        [1.0 - t, t, 0.0, 0.0],
        2,
    ))
}

/// 投影到三角形 `a-b-c`
///
/// 按 Voronoi 区域分类求最近点，直接得到重心坐标。
pub fn project_onto_triangle(
    p: &Point3D,
    a: &Point3D,
    b: &Point3D,
    c: &Point3D,
    degenerate_tol: f64,
) -> Option<Projection> {
    let ab = *b - *a;
    let ac = *c - *a;
    // sin²(∠bac) 过小即为退化；两边任一为零时两侧都为 0
    if ab.cross(&ac).length_squared() <= degenerate_tol * ab.length_squared() * ac.length_squared() {
        return None;
    }

    let [u, v, w] = closest_barycentric(p, a, b, c, &ab, &ac);
    let q = *a * u + *b * v + *c * w;
    Some(Projection::new(
        squared_distance(p, &q, 3),
        [u, v, w, 0.0],
        3,
    ))
}

fn closest_barycentric(
    p: &Point3D,
    a: &Point3D,
    b: &Point3D,
    c: &Point3D,
    ab: &Point3D,
    ac: &Point3D,
) -> [f64; 3] {
    let ap = *p - *a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return [1.0, 0.0, 0.0];
    }

    let bp = *p - *b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return [0.0, 1.0, 0.0];
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return [1.0 - v, v, 0.0];
    }

    let cp = *p - *c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return [0.0, 0.0, 1.0];
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return [1.0 - w, 0.0, w];
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return [0.0, 1.0 - w, w];
    }

    // 内部
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    [1.0 - v - w, v, w]
}

/// 投影到四边形 `a-b-c-d`
pub fn project_onto_quadrilateral(
    p: &Point3D,
    corners: &[Point3D; 4],
    degenerate_tol: f64,
) -> Option<Projection> {
    let [a, b, c, d] = corners;
    let first = project_onto_triangle(p, a, b, c, degenerate_tol)
        .map(|t| Projection::new(t.distance_squared, [t.weights[0], t.weights[1], t.weights[2], 0.0], 4));
    let second = project_onto_triangle(p, a, c, d, degenerate_tol)
        .map(|t| Projection::new(t.distance_squared, [t.weights[0], 0.0, t.weights[1], t.weights[2]], 4));

    match (first, second) {
        (Some(f), Some(s)) => Some(if s.distance_squared < f.distance_squared { s } else { f }),
        (f, s) => f.or(s),
    }
}

/// 投影到任意边界面单元
///
/// 非边界面单元（相对于 `n_dim`）或退化单元返回 None。
pub fn project_onto_element(
    kind: ElementKind,
    p: &Point3D,
    corners: &[Point3D],
    n_dim: usize,
    degenerate_tol: f64,
) -> Option<Projection> {
    if !kind.is_surface_in(n_dim) || corners.len() != kind.n_nodes() {
        return None;
    }
    let p = p.truncated(n_dim);
    let c = |i: usize| corners[i].truncated(n_dim);
    match kind {
        ElementKind::Line => project_onto_line(&p, &c(0), &c(1), n_dim, degenerate_tol),
        ElementKind::Triangle => project_onto_triangle(&p, &c(0), &c(1), &c(2), degenerate_tol),
        ElementKind::Quadrilateral => {
            project_onto_quadrilateral(&p, &[c(0), c(1), c(2), c(3)], degenerate_tol)
        }
        ElementKind::Tetrahedron | ElementKind::Hexahedron => None,
    }
}
