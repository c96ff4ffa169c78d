//! DXF 图纸导出
//!
//! 自己写DXF文本格式，不依赖外部CAD库。
//!
//! # 文档结构
//!
//! ```text
//! 0
//! SECTION
//! 2
//! HEADER          ← 单位设置（米）
//! ...
//! 0
//! ENDSEC
//! 0
//! SECTION
//! 2
//! TABLES          ← 线型与7个固定图层
//! ...
//! 0
//! ENDSEC
//! 0
//! SECTION
//! 2
//! ENTITIES        ← LWPOLYLINE / POINT / TEXT
//! ...
//! 0
//! ENDSEC
//! 0
//! EOF
//! ```
//!
//! # 组码 (Group Code)
//!
//! 每个数据项由两行组成：第一行组码，第二行值。
//! 常用组码：0 实体类型，2 名称，5 句柄，8 图层名，
//! 10/20/30 X/Y/Z坐标，40 高度，62 颜色，70 标志位，90 顶点数。
//!
//! 坐标一律按3位小数输出（米）。

use crate::error::ExportError;
use sitesketch_core::kernel;
use sitesketch_core::math::{Point2, Point3};
use sitesketch_core::scene::Scene;
use sitesketch_core::transform::PixelFrame;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 标注文字高度（米）
const LABEL_TEXT_HEIGHT: f64 = 1.0;

/// 场地面积标注文字高度（米）
const AREA_TEXT_HEIGHT: f64 = 1.5;

/// 高程标注相对高程点的平面偏移（米）
const ELEVATION_LABEL_OFFSET: f64 = 0.5;

/// 图层定义
struct PlanLayer {
    name: &'static str,
    /// AutoCAD颜色索引
    color: i32,
    linetype: &'static str,
}

/// 固定图层表：每类实体一个图层，导出前一次性声明
const LAYERS: [PlanLayer; 7] = [
    PlanLayer { name: "SITE_BOUNDARY", color: 7, linetype: "CONTINUOUS" },
    PlanLayer { name: "ROADS_CENTERLINE", color: 1, linetype: "DASHDOT" },
    PlanLayer { name: "FUNCTION_ZONES", color: 5, linetype: "CONTINUOUS" },
    PlanLayer { name: "ELEVATIONS", color: 3, linetype: "CONTINUOUS" },
    PlanLayer { name: "DIMENSIONS", color: 8, linetype: "CONTINUOUS" },
    PlanLayer { name: "ANNOTATIONS", color: 4, linetype: "CONTINUOUS" },
    PlanLayer { name: "TEXT", color: 2, linetype: "CONTINUOUS" },
];

/// DXF 写入器
pub struct DxfWriter {
    output: Vec<String>,
    handle_counter: u64,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            handle_counter: 100, // 从 100 开始分配句柄
        }
    }

    /// 写入组码-值对
    pub fn write_pair(&mut self, code: i32, value: impl std::fmt::Display) {
        self.output.push(format!("{:>3}", code));
        self.output.push(value.to_string());
    }

    /// 写入浮点值（3位小数）
    pub fn write_value(&mut self, code: i32, value: f64) {
        self.write_pair(code, format!("{:.3}", value));
    }

    /// 写入句柄（组码 5）
    pub fn write_handle(&mut self) {
        let handle = format!("{:X}", self.handle_counter);
        self.handle_counter += 1;
        self.output.push(format!("{:>3}", 5));
        self.output.push(handle);
    }

    /// 写入 SECTION 开始
    pub fn begin_section(&mut self, name: &str) {
        self.write_pair(0, "SECTION");
        self.write_pair(2, name);
    }

    /// 写入 SECTION 结束
    pub fn end_section(&mut self) {
        self.write_pair(0, "ENDSEC");
    }

    /// 写入 LWPOLYLINE 实体
    pub fn write_lwpolyline(&mut self, layer: &str, points: &[Point2], closed: bool) {
        self.write_pair(0, "LWPOLYLINE");
        self.write_handle();
        self.write_pair(100, "AcDbEntity");
        self.write_pair(8, layer);
        self.write_pair(100, "AcDbPolyline");
        self.write_pair(90, points.len());
        self.write_pair(70, if closed { 1 } else { 0 });
        for p in points {
            self.write_value(10, p.x);
            self.write_value(20, p.y);
        }
    }

    /// 写入 POINT 实体
    pub fn write_point(&mut self, layer: &str, position: &Point3) {
        self.write_pair(0, "POINT");
        self.write_handle();
        self.write_pair(100, "AcDbEntity");
        self.write_pair(8, layer);
        self.write_pair(100, "AcDbPoint");
        self.write_value(10, position.x);
        self.write_value(20, position.y);
        self.write_value(30, position.z);
    }

    /// 写入 TEXT 实体
    pub fn write_text(&mut self, layer: &str, position: &Point3, height: f64, content: &str) {
        self.write_pair(0, "TEXT");
        self.write_handle();
        self.write_pair(100, "AcDbEntity");
        self.write_pair(8, layer);
        self.write_pair(100, "AcDbText");
        self.write_value(10, position.x);
        self.write_value(20, position.y);
        self.write_value(30, position.z);
        self.write_value(40, height);
        self.write_pair(1, content);
    }

    /// 获取输出
    pub fn finish(mut self) -> String {
        self.write_pair(0, "EOF");
        self.output.join("\n")
    }

    /// 保存到文件
    pub fn save_to_file(self, path: &Path) -> Result<(), ExportError> {
        let content = self.finish();
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 导出场地快照为DXF图纸文档
///
/// 与网格导出相同的尽力而为策略：退化实体静默跳过，
/// 任何输入都产出以EOF结尾的完整文档。
pub fn export_plan(scene: &Scene) -> String {
    let frame = PixelFrame::new(scene.scale, scene.canvas_height);
    let mut w = DxfWriter::new();

    write_header(&mut w);
    write_tables(&mut w);
    write_entities(&mut w, scene, &frame);

    tracing::info!(
        "Exported plan: {} zones, {} roads, {} elevations",
        scene.zones.len(),
        scene.roads.len(),
        scene.elevations.len()
    );

    w.finish()
}

/// HEADER段：声明单位为米
fn write_header(w: &mut DxfWriter) {
    w.begin_section("HEADER");
    w.write_pair(9, "$ACADVER");
    w.write_pair(1, "AC1027"); // AutoCAD 2013
    w.write_pair(9, "$INSUNITS");
    w.write_pair(70, 6); // 米
    w.end_section();
}

/// TABLES段：线型与图层
fn write_tables(w: &mut DxfWriter) {
    w.begin_section("TABLES");

    // 线型表
    w.write_pair(0, "TABLE");
    w.write_pair(2, "LTYPE");
    w.write_pair(70, 2);

    w.write_pair(0, "LTYPE");
    w.write_pair(2, "CONTINUOUS");
    w.write_pair(70, 0);
    w.write_pair(3, "Solid line");
    w.write_pair(72, 65);
    w.write_pair(73, 0);
    w.write_value(40, 0.0);

    // 点划线：长划-点重复
    w.write_pair(0, "LTYPE");
    w.write_pair(2, "DASHDOT");
    w.write_pair(70, 0);
    w.write_pair(3, "Dash dot __ . __ . __ .");
    w.write_pair(72, 65);
    w.write_pair(73, 4);
    w.write_value(40, 2.4);
    w.write_value(49, 1.2);
    w.write_value(49, -0.6);
    w.write_value(49, 0.0);
    w.write_value(49, -0.6);

    w.write_pair(0, "ENDTAB");

    // 图层表
    w.write_pair(0, "TABLE");
    w.write_pair(2, "LAYER");
    w.write_pair(70, LAYERS.len());

    for layer in &LAYERS {
        w.write_pair(0, "LAYER");
        w.write_pair(2, layer.name);
        w.write_pair(70, 0);
        w.write_pair(62, layer.color);
        w.write_pair(6, layer.linetype);
    }

    w.write_pair(0, "ENDTAB");
    w.end_section();
}

/// ENTITIES段：边界、道路、功能区、高程点与面积标注
fn write_entities(w: &mut DxfWriter, scene: &Scene, frame: &PixelFrame) {
    w.begin_section("ENTITIES");

    // 场地边界：闭合多段线
    if !scene.boundary.is_empty() {
        let pts: Vec<Point2> = scene
            .boundary_pixels()
            .iter()
            .map(|p| frame.to_plan(p))
            .collect();
        w.write_lwpolyline("SITE_BOUNDARY", &pts, true);
    }

    // 道路：开放中心线
    for road in &scene.roads {
        if road.points.len() < 2 {
            continue;
        }
        let pts: Vec<Point2> = road.pixels().iter().map(|p| frame.to_plan(p)).collect();
        w.write_lwpolyline("ROADS_CENTERLINE", &pts, false);
    }

    // 功能区：闭合多段线 + 形心处类型标注
    for zone in &scene.zones {
        if zone.points.len() < 3 {
            continue;
        }
        let pixels = zone.pixels();
        let pts: Vec<Point2> = pixels.iter().map(|p| frame.to_plan(p)).collect();
        w.write_lwpolyline("FUNCTION_ZONES", &pts, true);

        let centroid = frame.to_plan(&kernel::polygon_centroid(&pixels));
        w.write_text(
            "TEXT",
            &Point3::new(centroid.x, centroid.y, 0.0),
            LABEL_TEXT_HEIGHT,
            zone.kind.label(),
        );
    }

    // 高程点：点实体 + 偏移标注
    for marker in &scene.elevations {
        let position = frame.to_plan_elevated(&marker.pixel(), marker.value);
        w.write_point("ELEVATIONS", &position);
        w.write_text(
            "TEXT",
            &Point3::new(
                position.x + ELEVATION_LABEL_OFFSET,
                position.y + ELEVATION_LABEL_OFFSET,
                position.z,
            ),
            LABEL_TEXT_HEIGHT,
            &format!("EL {:.2}", marker.value),
        );
    }

    // 场地总面积标注（像素面积 × 比例²）
    if scene.boundary.len() > 2 {
        let pixels = scene.boundary_pixels();
        let area = kernel::polygon_area(&pixels) * scene.scale * scene.scale;
        let centroid = frame.to_plan(&kernel::polygon_centroid(&pixels));
        w.write_text(
            "ANNOTATIONS",
            &Point3::new(centroid.x, centroid.y, 0.0),
            AREA_TEXT_HEIGHT,
            &format!("场地面积: {:.1} m2", area),
        );
    }

    w.end_section();
}
