// crates/fsi_geo/src/geometry.rs

//! 几何类型定义
//!
//! 提供项目统一的 3D 点/向量类型。二维区域同样使用 `Point3D` 存储，
//! z 分量恒为 0，距离计算通过 `n_dim` 截断到有效维度。
//!
//! # 距离约定
//!
//! 所有最近点搜索都使用 [`squared_distance`]，按 x, y(, z) 的顺序逐分量累加，
//! 保证暴力搜索与 R-tree 搜索得到逐位相同的距离值。

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ============================================================================
// Point3D - 3D点/向量
// ============================================================================

/// 3D点 - 项目统一几何类型
///
/// 用于存储顶点坐标、位移向量与转动向量。
///
/// # 示例
///
/// ```
/// use fsi_geo::geometry::Point3D;
///
/// let p1 = Point3D::new(1.0, 0.0, 0.0);
/// let p2 = Point3D::new(0.0, 1.0, 0.0);
///
/// let cross = p1.cross(&p2);
/// assert_eq!(cross, Point3D::UNIT_Z);
/// assert_eq!(p1.dot(&p2), 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
    /// Z坐标
    #[serde(default)]
    pub z: f64,
}

impl Point3D {
    /// 零点常量
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// 单位X向量
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// 单位Y向量
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// 单位Z向量
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// 创建新的3D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 创建平面点（z = 0）
    #[inline]
    #[must_use]
    pub const fn new_2d(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// 按分量索引读取（0=x, 1=y, 2=z）
    #[inline]
    #[must_use]
    pub fn component(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("分量索引 {} 超出范围 0..3", i),
        }
    }

    /// 截断到有效维度：二维时 z 置零
    #[inline]
    #[must_use]
    pub fn truncated(self, n_dim: usize) -> Self {
        if n_dim == 2 {
            Self::new(self.x, self.y, 0.0)
        } else {
            self
        }
    }

    /// 点积
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 叉积
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// 向量长度
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// 向量长度的平方
    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// 到另一点的距离平方（三维）
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    /// 标量乘法
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// 逐分量近似相等
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

/// 有效维度内的距离平方
///
/// 按 x, y(, z) 顺序累加差值平方。最近点搜索的所有实现必须只调用本函数，
/// 否则相等距离的平局判定可能不一致。
#[inline]
#[must_use]
pub fn squared_distance(a: &Point3D, b: &Point3D, n_dim: usize) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut d = dx * dx + dy * dy;
    if n_dim == 3 {
        let dz = b.z - a.z;
        d += dz * dz;
    }
    d
}

// ============================================================================
// 运算符实现
// ============================================================================

impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Point3D {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Point3D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Mul<Point3D> for f64 {
    type Output = Point3D;

    #[inline]
    fn mul(self, point: Point3D) -> Point3D {
        point.scale(self)
    }
}

// ============================================================================
// 转换实现
// ============================================================================

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 2]> for Point3D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new_2d(x, y)
    }
}

impl From<Point3D> for [f64; 3] {
    fn from(p: Point3D) -> Self {
        [p.x, p.y, p.z]
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product() {
        let c = Point3D::UNIT_Y.cross(&Point3D::UNIT_Z);
        assert_eq!(c, Point3D::UNIT_X);
        let a = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(a.cross(&a), Point3D::ZERO);
    }

    #[test]
    fn test_squared_distance_dimension() {
        let a = Point3D::new(0.0, 0.0, 5.0);
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert_eq!(squared_distance(&a, &b, 2), 25.0);
        assert_eq!(squared_distance(&a, &b, 3), 50.0);
    }

    #[test]
    fn test_operators() {
        let mut a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(0.5, 0.5, 0.5);
        assert_eq!(a - b, Point3D::new(0.5, 1.5, 2.5));
        assert_eq!(2.0 * b, Point3D::new(1.0, 1.0, 1.0));
        a += b;
        assert_eq!(a, Point3D::new(1.5, 2.5, 3.5));
        assert_eq!(-b, Point3D::new(-0.5, -0.5, -0.5));
    }

    #[test]
    fn test_truncated_and_component() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(p.truncated(2), Point3D::new_2d(1.0, 2.0));
        assert_eq!(p.truncated(3), p);
        assert_eq!(p.component(2), 3.0);
    }

    #[test]
    fn test_deserialize_without_z() {
        let p: Point3D = serde_json::from_str(r#"{"x": 1.0, "y": 2.0}"#).unwrap();
        assert_eq!(p, Point3D::new_2d(1.0, 2.0));
    }
}
