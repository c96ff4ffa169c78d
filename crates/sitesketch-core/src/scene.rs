//! 场地草图数据模型
//!
//! 一次导出请求对应一个不可变的场地快照（`Scene`）：
//! - 边界（隐式闭合的轮廓多边形）
//! - 功能区（水体/绿地/铺装/建筑）
//! - 道路（中心线折线）
//! - 高程点
//! - 画布尺寸（像素）与像素→米比例
//!
//! 导出器只读取快照，不修改调用方持有的几何数据。
//! 顶点数不足的实体（边界/功能区 <3 点、道路 <2 点）由导出器
//! 静默跳过——这是约定的"尽力而为"导出策略，不是错误。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 草图顶点
///
/// 像素坐标加稳定ID。ID供编辑层在修改时做引用相等判断，
/// 导出管线原样携带、不使用。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SketchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl SketchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// 像素坐标
    pub fn pixel(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// 高程点
///
/// `value` 为相对名义地面的高度（米）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElevationPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    /// 高程值（米）
    pub value: f64,
}

impl ElevationPoint {
    /// 像素坐标
    pub fn pixel(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// 功能区类型
///
/// 闭合枚举，每个变体携带导出所需的全部元数据
/// （显示名、ACI颜色、网格基准高度与拉伸高度）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// 水体（下沉 0.5 米，不拉伸）
    Water,
    /// 绿地
    Greenery,
    /// 铺装
    Paving,
    /// 建筑（拉伸为 6 米体块）
    Structure,
}

impl ZoneKind {
    /// ASCII标识，用于OBJ组名
    pub fn token(&self) -> &'static str {
        match self {
            ZoneKind::Water => "Water",
            ZoneKind::Greenery => "Greenery",
            ZoneKind::Paving => "Paving",
            ZoneKind::Structure => "Structure",
        }
    }

    /// 图纸标注用显示名
    pub fn label(&self) -> &'static str {
        match self {
            ZoneKind::Water => "水体",
            ZoneKind::Greenery => "绿地",
            ZoneKind::Paving => "铺装",
            ZoneKind::Structure => "建筑",
        }
    }

    /// 网格基准高度（米）
    pub fn base_height(&self) -> f64 {
        match self {
            ZoneKind::Water => -0.5,
            _ => 0.05,
        }
    }

    /// 拉伸高度（米），0 表示平面
    pub fn extrude_height(&self) -> f64 {
        match self {
            ZoneKind::Structure => 6.0,
            _ => 0.0,
        }
    }

    /// 是否拉伸为体块
    pub fn is_extruded(&self) -> bool {
        self.extrude_height() > 0.0
    }
}

/// 功能区
///
/// 顶点序列描述一个简单（无自交）闭合多边形。
/// 顶点顺序决定环绕方向与邻接关系，必须全程保持。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub points: Vec<SketchPoint>,
}

impl Zone {
    pub fn new(kind: ZoneKind, points: Vec<SketchPoint>) -> Self {
        Self { kind, points }
    }

    /// 像素坐标序列
    pub fn pixels(&self) -> Vec<Point2> {
        self.points.iter().map(SketchPoint::pixel).collect()
    }
}

/// 道路
///
/// `width` 仅供编辑层显示，不生成路面几何——
/// 道路按中心线折线导出。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    pub points: Vec<SketchPoint>,
    /// 显示宽度（像素）
    pub width: f64,
}

impl Road {
    pub fn new(points: Vec<SketchPoint>, width: f64) -> Self {
        Self { points, width }
    }

    /// 像素坐标序列
    pub fn pixels(&self) -> Vec<Point2> {
        self.points.iter().map(SketchPoint::pixel).collect()
    }
}

/// 场地快照
///
/// 一次导出的完整输入。边界点数 0–2 时无法得到有意义的模型，
/// 但导出仍会产出一个（近乎空的）文档而非报错。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// 场地边界（隐式闭合）
    pub boundary: Vec<SketchPoint>,
    /// 功能区
    pub zones: Vec<Zone>,
    /// 道路
    pub roads: Vec<Road>,
    /// 高程点
    pub elevations: Vec<ElevationPoint>,
    /// 画布宽度（像素）
    pub canvas_width: f64,
    /// 画布高度（像素）
    pub canvas_height: f64,
    /// 像素→米比例
    pub scale: f64,
}

impl Scene {
    /// 创建空场景
    pub fn new(canvas_width: f64, canvas_height: f64, scale: f64) -> Self {
        Self {
            boundary: Vec::new(),
            zones: Vec::new(),
            roads: Vec::new(),
            elevations: Vec::new(),
            canvas_width,
            canvas_height,
            scale,
        }
    }

    /// 由用户声明的场地实际宽度推导像素→米比例
    pub fn pixel_scale(site_width_m: f64, canvas_width_px: f64) -> f64 {
        site_width_m / canvas_width_px
    }

    /// 边界像素坐标序列
    pub fn boundary_pixels(&self) -> Vec<Point2> {
        self.boundary.iter().map(SketchPoint::pixel).collect()
    }

    /// 边界是否足以构成多边形
    pub fn has_boundary(&self) -> bool {
        self.boundary.len() >= 3
    }
}
