//! 数学基础类型
//!
//! 基于 nalgebra 的2D/3D点和向量别名（f64）。
//! 像素坐标与实际坐标共用同一套类型，语义由调用方区分。

/// 2D点
pub type Point2 = nalgebra::Point2<f64>;
/// 3D点
pub type Point3 = nalgebra::Point3<f64>;
/// 2D向量
pub type Vector2 = nalgebra::Vector2<f64>;
/// 3D向量
pub type Vector3 = nalgebra::Vector3<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-9;

/// 两点间欧氏距离
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// 两点的算术中点
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
