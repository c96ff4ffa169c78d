//! 像素坐标 → 实际坐标变换
//!
//! 草图在图像坐标系中绘制：Y向下增长。实际坐标采用右手系、
//! Z向上约定（X=东，Y=北，Z=上），因此Y轴需要翻转：
//!
//! ```text
//! world_x = pixel_x × scale
//! world_y = (canvas_height − pixel_y) × scale
//! world_z = 给定高度
//! ```
//!
//! 网格（3D）与图纸（2D/2.5D）使用同一翻转和缩放，仅输出维度不同。
//! 变换是纯函数，无共享可变状态。

use crate::math::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// 像素坐标框架
///
/// 一次导出内不变的画布高度与像素→米比例。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PixelFrame {
    /// 像素→米比例
    pub scale: f64,
    /// 画布高度（像素），翻转基准
    pub canvas_height: f64,
}

impl PixelFrame {
    pub fn new(scale: f64, canvas_height: f64) -> Self {
        Self {
            scale,
            canvas_height,
        }
    }

    /// 像素点 → 3D网格坐标（Z向上）
    pub fn to_mesh(&self, p: &Point2, height: f64) -> Point3 {
        Point3::new(
            p.x * self.scale,
            (self.canvas_height - p.y) * self.scale,
            height,
        )
    }

    /// 像素点 → 图纸平面坐标
    pub fn to_plan(&self, p: &Point2) -> Point2 {
        Point2::new(p.x * self.scale, (self.canvas_height - p.y) * self.scale)
    }

    /// 像素点 → 带高程的图纸坐标（2.5D）
    pub fn to_plan_elevated(&self, p: &Point2, elevation: f64) -> Point3 {
        let xy = self.to_plan(p);
        Point3::new(xy.x, xy.y, elevation)
    }
}
