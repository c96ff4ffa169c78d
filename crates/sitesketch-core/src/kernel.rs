//! 2D几何内核
//!
//! 导出管线依赖的纯数学函数：
//! - 多边形面积（鞋带公式）
//! - 多边形形心（有向面积加权）
//! - 重心坐标点在三角形内测试
//! - 耳切法三角化
//!
//! 所有函数假定输入为简单（无自交）多边形，不做校验。
//! 非简单多边形会被错误地三角化而不报错——安全阀只保证不死循环。

use crate::math::{Point2, EPSILON};

pub use crate::math::{distance, midpoint};

/// 多边形面积（鞋带公式）
///
/// 返回绝对值，与环绕方向无关。少于3个顶点返回0。
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// 多边形有向面积
///
/// 逆时针为正（标准数学坐标系下）。
fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// 多边形形心
///
/// 标准有向面积加权公式，除数使用有向面积（非绝对值）。
/// 空序列返回原点。
///
/// 退化多边形（有向面积为零，如所有点共线）没有定义良好的
/// 面积形心，此时退回顶点算术平均，保证结果有限。
pub fn polygon_centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::new(0.0, 0.0);
    }

    let area = signed_area(points);
    if area.abs() < EPSILON {
        // 退化：顶点算术平均
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point2::new(sx / n, sy / n);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Point2::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// 点是否严格在三角形内部（重心坐标法）
///
/// 判据为 `u ≥ 0, v ≥ 0, u + v < 1`，仅作为耳检测的辅助。
pub fn point_in_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < EPSILON {
        // 退化三角形不包含任何点
        return false;
    }
    let inv = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;

    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// 耳切法三角化简单多边形
///
/// 返回指向原始顶点数组的下标三元组，不引入新顶点。
/// 耳的判据只有"三角形内不含其他在列顶点"，不检查凸性或
/// 环绕方向，因此对两种方向都适用。
///
/// 迭代上限 `3 × n`；整轮扫描找不到耳时提前停止（简单多边形
/// 不会触发，仅作为畸形输入的安全阀，此时网格会缺少部分面）。
pub fn triangulate(points: &[Point2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut remaining: Vec<usize> = (0..n).collect();

    let max_iterations = 3 * n;
    let mut iterations = 0;

    while remaining.len() > 3 && iterations < max_iterations {
        iterations += 1;

        let mut clipped = false;
        for i in 0..remaining.len() {
            let prev = remaining[(i + remaining.len() - 1) % remaining.len()];
            let curr = remaining[i];
            let next = remaining[(i + 1) % remaining.len()];

            // 三角形内含任一其他在列顶点则不是耳
            let mut is_ear = true;
            for &other in &remaining {
                if other == prev || other == curr || other == next {
                    continue;
                }
                if point_in_triangle(
                    &points[other],
                    &points[prev],
                    &points[curr],
                    &points[next],
                ) {
                    is_ear = false;
                    break;
                }
            }

            if is_ear {
                triangles.push([prev, curr, next]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            // 找不到耳：畸形输入，放弃剩余部分
            tracing::warn!(
                remaining = remaining.len(),
                "ear clipping stalled, polygon may be non-simple"
            );
            break;
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn test_unit_square_area_both_windings() {
        let ccw = square(1.0);
        let cw: Vec<Point2> = ccw.iter().rev().cloned().collect();
        assert!((polygon_area(&ccw) - 1.0).abs() < EPSILON);
        assert!((polygon_area(&cw) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point2::new(1.0, 2.0)]), 0.0);
        assert_eq!(
            polygon_area(&[Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)]),
            0.0
        );
    }

    #[test]
    fn test_centroid_square() {
        let c = polygon_centroid(&square(2.0));
        assert!((c.x - 1.0).abs() < EPSILON);
        assert!((c.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_centroid_empty() {
        let c = polygon_centroid(&[]);
        assert_eq!((c.x, c.y), (0.0, 0.0));
    }

    #[test]
    fn test_centroid_collinear_falls_back_to_mean() {
        // 共线多边形没有面积形心，应退回顶点平均而不是产生NaN
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ];
        let c = polygon_centroid(&pts);
        assert!(c.x.is_finite() && c.y.is_finite());
        assert!((c.x - 1.0).abs() < EPSILON);
        assert!((c.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let c = Point2::new(0.0, 4.0);
        assert!(point_in_triangle(&Point2::new(1.0, 1.0), &a, &b, &c));
        assert!(!point_in_triangle(&Point2::new(3.0, 3.0), &a, &b, &c));
        assert!(!point_in_triangle(&Point2::new(-1.0, 0.5), &a, &b, &c));
    }

    #[test]
    fn test_triangulate_square() {
        let tris = triangulate(&square(1.0));
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn test_triangulate_convex_count_and_area() {
        // 正六边形：n-2 个三角形，面积之和等于多边形面积
        let n = 6;
        let hex: Vec<Point2> = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                Point2::new(a.cos(), a.sin())
            })
            .collect();

        let tris = triangulate(&hex);
        assert_eq!(tris.len(), n - 2);

        let total: f64 = tris
            .iter()
            .map(|t| polygon_area(&[hex[t[0]], hex[t[1]], hex[t[2]]]))
            .sum();
        assert!((total - polygon_area(&hex)).abs() < 1e-6);
    }

    #[test]
    fn test_triangulate_concave() {
        // L形（凹多边形），凹点严格落在候选耳内部
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let tris = triangulate(&l_shape);
        assert_eq!(tris.len(), l_shape.len() - 2);

        let total: f64 = tris
            .iter()
            .map(|t| polygon_area(&[l_shape[t[0]], l_shape[t[1]], l_shape[t[2]]]))
            .sum();
        assert!((total - polygon_area(&l_shape)).abs() < 1e-6);
    }

    #[test]
    fn test_triangulate_indices_in_range() {
        let hex: Vec<Point2> = (0..8)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / 8.0;
                Point2::new(3.0 * a.cos(), 3.0 * a.sin())
            })
            .collect();
        for tri in triangulate(&hex) {
            for idx in tri {
                assert!(idx < hex.len());
            }
        }
    }

    #[test]
    fn test_triangulate_too_few_points() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_triangulate_degenerate_terminates() {
        // 全部共点：永远找不到耳，安全阀必须让循环停下
        let pts = vec![Point2::new(1.0, 1.0); 6];
        let tris = triangulate(&pts);
        // 不校验结果内容，只要求正常返回
        assert!(tris.len() <= pts.len() - 2);
    }
}
