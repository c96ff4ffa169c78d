//! SiteSketch 核心几何引擎
//!
//! 提供场地草图的数据模型、2D几何计算与像素→实际坐标变换。
//!
//! # 架构设计
//!
//! 数据单向流动：
//! - `scene`: 不可变的场地快照（边界、功能区、道路、高程点）
//! - `kernel`: 纯2D数学（面积、形心、耳切三角化）
//! - `transform`: 像素坐标 → 实际米制坐标（Z向上，Y轴翻转）
//!
//! 导出器（`sitesketch-export`）只读取快照，不回调本层。
//!
//! # 示例
//!
//! ```rust
//! use sitesketch_core::prelude::*;
//!
//! let square = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! // 鞋带公式面积
//! assert!((kernel::polygon_area(&square) - 1.0).abs() < 1e-9);
//! ```

pub mod kernel;
pub mod math;
pub mod scene;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::kernel;
    pub use crate::math::{Point2, Point3, Vector2, EPSILON};
    pub use crate::scene::{ElevationPoint, Road, Scene, SketchPoint, Zone, ZoneKind};
    pub use crate::transform::PixelFrame;
}
