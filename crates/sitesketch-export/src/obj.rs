//! OBJ 网格导出
//!
//! 把场地快照写成Wavefront OBJ风格的文本网格：
//! - `Site_Ground`: 边界多边形三角化的地面
//! - `Zone_<i>_<type>` / `Building_<i>`: 功能区（建筑拉伸为体块）
//! - `Roads`: 道路中心线折线
//! - `Elevations`: 高程点四棱锥标记
//!
//! 顶点编号为全文档1起连续递增，由写入器显式携带——
//! 这是管线中唯一的可变状态，仅存在于单次导出调用内。

use crate::error::ExportError;
use sitesketch_core::kernel;
use sitesketch_core::math::Point3;
use sitesketch_core::scene::Scene;
use sitesketch_core::transform::PixelFrame;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 道路折线抬升高度（米），避免与功能区表面闪烁
const ROAD_LIFT: f64 = 0.1;

/// 高程标记锥底面半宽（米）
const MARKER_HALF_SIZE: f64 = 0.5;

/// 高程标记锥底面相对锥尖的下沉（米）
const MARKER_DEPTH: f64 = 1.0;

/// OBJ 写入器
///
/// 累积输出行并携带1起的全局顶点计数器。
/// 计数器随每次`vertex`调用递增，跨组单调。
pub struct ObjWriter {
    lines: Vec<String>,
    next_vertex: usize,
}

impl ObjWriter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_vertex: 1,
        }
    }

    /// 写入注释行
    pub fn comment(&mut self, text: &str) {
        self.lines.push(format!("# {}", text));
    }

    /// 写入材质库引用
    pub fn mtllib(&mut self, name: &str) {
        self.lines.push(format!("mtllib {}", name));
    }

    /// 写入对象声明
    pub fn object(&mut self, name: &str) {
        self.lines.push(format!("o {}", name));
    }

    /// 写入组声明
    pub fn group(&mut self, name: &str) {
        self.lines.push(format!("g {}", name));
    }

    /// 写入顶点，返回其1起全局下标
    pub fn vertex(&mut self, p: &Point3) -> usize {
        self.lines
            .push(format!("v {:.3} {:.3} {:.3}", p.x, p.y, p.z));
        let index = self.next_vertex;
        self.next_vertex += 1;
        index
    }

    /// 写入三角面（1起下标）
    pub fn face(&mut self, a: usize, b: usize, c: usize) {
        self.lines.push(format!("f {} {} {}", a, b, c));
    }

    /// 写入折线（1起下标序列）
    pub fn polyline(&mut self, indices: &[usize]) {
        let joined: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
        self.lines.push(format!("l {}", joined.join(" ")));
    }

    /// 已写入的顶点总数
    pub fn vertex_count(&self) -> usize {
        self.next_vertex - 1
    }

    /// 获取输出
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// 保存到文件
    pub fn save_to_file(self, path: &Path) -> Result<(), ExportError> {
        let content = self.finish();
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Default for ObjWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 导出场地快照为OBJ网格文档
///
/// 任何输入都产出字符串：退化实体（边界/功能区 <3 点、
/// 道路 <2 点）静默跳过，其余实体照常导出。
pub fn export_mesh(scene: &Scene) -> String {
    let frame = PixelFrame::new(scene.scale, scene.canvas_height);
    let mut w = ObjWriter::new();

    w.comment("SiteSketch site plan mesh");
    w.comment(&format!("units: meters, scale: {} m/px", scene.scale));
    w.mtllib("site_plan.mtl");
    w.object("SitePlan");

    emit_ground(&mut w, scene, &frame);
    emit_zones(&mut w, scene, &frame);
    emit_roads(&mut w, scene, &frame);
    emit_elevations(&mut w, scene, &frame);

    tracing::info!(
        "Exported mesh: {} vertices, {} zones, {} roads, {} elevation markers",
        w.vertex_count(),
        scene.zones.len(),
        scene.roads.len(),
        scene.elevations.len()
    );

    w.finish()
}

/// 地面：边界多边形在高度0处三角化
fn emit_ground(w: &mut ObjWriter, scene: &Scene, frame: &PixelFrame) {
    if !scene.has_boundary() {
        return;
    }

    let pts = scene.boundary_pixels();
    w.group("Site_Ground");

    let ring: Vec<usize> = pts
        .iter()
        .map(|p| w.vertex(&frame.to_mesh(p, 0.0)))
        .collect();

    for tri in kernel::triangulate(&pts) {
        w.face(ring[tri[0]], ring[tri[1]], ring[tri[2]]);
    }
}

/// 功能区：底环 + 盖面，建筑另加顶环与侧墙
fn emit_zones(w: &mut ObjWriter, scene: &Scene, frame: &PixelFrame) {
    for (i, zone) in scene.zones.iter().enumerate() {
        if zone.points.len() < 3 {
            continue;
        }

        let pts = zone.pixels();
        let kind = zone.kind;
        let base_height = kind.base_height();

        let name = if kind.is_extruded() {
            format!("Building_{}", i + 1)
        } else {
            format!("Zone_{}_{}", i + 1, kind.token())
        };
        w.group(&name);

        let bottom: Vec<usize> = pts
            .iter()
            .map(|p| w.vertex(&frame.to_mesh(p, base_height)))
            .collect();

        let top: Option<Vec<usize>> = if kind.is_extruded() {
            let top_height = base_height + kind.extrude_height();
            Some(
                pts.iter()
                    .map(|p| w.vertex(&frame.to_mesh(p, top_height)))
                    .collect(),
            )
        } else {
            None
        };

        // 盖面：拉伸体用顶环（屋面），否则底环（平面）
        let cap = top.as_deref().unwrap_or(&bottom);
        for tri in kernel::triangulate(&pts) {
            w.face(cap[tri[0]], cap[tri[1]], cap[tri[2]]);
        }

        // 侧墙：每条边一个四边形，拆成两个三角形，末边回绕到首顶点
        if let Some(top) = &top {
            let n = pts.len();
            for j in 0..n {
                let k = (j + 1) % n;
                w.face(bottom[j], bottom[k], top[k]);
                w.face(bottom[j], top[k], top[j]);
            }
        }
    }
}

/// 道路：抬升的中心线折线
fn emit_roads(w: &mut ObjWriter, scene: &Scene, frame: &PixelFrame) {
    if !scene.roads.iter().any(|r| r.points.len() >= 2) {
        return;
    }

    w.group("Roads");
    for road in &scene.roads {
        if road.points.len() < 2 {
            continue;
        }
        let indices: Vec<usize> = road
            .pixels()
            .iter()
            .map(|p| w.vertex(&frame.to_mesh(p, ROAD_LIFT)))
            .collect();
        w.polyline(&indices);
    }
}

/// 高程点：锥尖在实际高程处的小四棱锥
fn emit_elevations(w: &mut ObjWriter, scene: &Scene, frame: &PixelFrame) {
    if scene.elevations.is_empty() {
        return;
    }

    w.group("Elevations");
    for marker in &scene.elevations {
        let pixel = marker.pixel();
        let apex = w.vertex(&frame.to_mesh(&pixel, marker.value));

        let base_center = frame.to_mesh(&pixel, marker.value - MARKER_DEPTH);
        let offsets = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let base: Vec<usize> = offsets
            .iter()
            .map(|(dx, dy)| {
                w.vertex(&Point3::new(
                    base_center.x + dx * MARKER_HALF_SIZE,
                    base_center.y + dy * MARKER_HALF_SIZE,
                    base_center.z,
                ))
            })
            .collect();

        for j in 0..4 {
            w.face(apex, base[j], base[(j + 1) % 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesketch_core::scene::{ElevationPoint, Road, SketchPoint, Zone, ZoneKind};

    fn square_points(size: f64) -> Vec<SketchPoint> {
        vec![
            SketchPoint::new(1, 0.0, 0.0),
            SketchPoint::new(2, size, 0.0),
            SketchPoint::new(3, size, size),
            SketchPoint::new(4, 0.0, size),
        ]
    }

    fn count_lines(output: &str, prefix: &str) -> usize {
        output
            .lines()
            .filter(|l| l.starts_with(prefix))
            .count()
    }

    #[test]
    fn test_writer_running_index() {
        let mut w = ObjWriter::new();
        let a = w.vertex(&Point3::new(0.0, 0.0, 0.0));
        let b = w.vertex(&Point3::new(1.0, 0.0, 0.0));
        w.group("G2");
        let c = w.vertex(&Point3::new(0.0, 1.0, 0.0));
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(w.vertex_count(), 3);
    }

    #[test]
    fn test_vertex_precision() {
        let mut w = ObjWriter::new();
        w.vertex(&Point3::new(1.0 / 3.0, 2.0, -0.5));
        let out = w.finish();
        assert!(out.contains("v 0.333 2.000 -0.500"));
    }

    #[test]
    fn test_structure_zone_full_site() {
        // 10×10像素边界，比例0.1 → 1m×1m场地，一个建筑覆盖全场
        let mut scene = Scene::new(10.0, 10.0, 0.1);
        scene.boundary = square_points(10.0);
        scene.zones = vec![Zone::new(ZoneKind::Structure, square_points(10.0))];

        let out = export_mesh(&scene);

        // 地面4顶点 + 建筑底环4 + 顶环4
        assert_eq!(count_lines(&out, "v "), 12);
        // 地面2 + 屋面2 + 4面墙×2 = 12个三角面
        assert_eq!(count_lines(&out, "f "), 12);
        assert!(out.contains("g Site_Ground"));
        assert!(out.contains("g Building_1"));
        assert!(!out.contains("g Roads"));
        assert!(!out.contains("g Elevations"));
    }

    #[test]
    fn test_vertex_count_formula() {
        // 总顶点数 = B + Σ(非拉伸区点数) + Σ(2×拉伸区点数)
        //          + Σ(道路点数) + 5×高程点数
        let mut scene = Scene::new(100.0, 100.0, 0.5);
        scene.boundary = square_points(100.0); // 4
        scene.zones = vec![
            Zone::new(ZoneKind::Water, square_points(20.0)),     // 4
            Zone::new(ZoneKind::Structure, square_points(30.0)), // 2×4
        ];
        scene.roads = vec![Road::new(
            vec![
                SketchPoint::new(10, 0.0, 50.0),
                SketchPoint::new(11, 50.0, 50.0),
                SketchPoint::new(12, 100.0, 60.0),
            ],
            4.0,
        )]; // 3
        scene.elevations = vec![ElevationPoint {
            id: 20,
            x: 50.0,
            y: 50.0,
            value: 2.0,
        }]; // 5

        let out = export_mesh(&scene);
        assert_eq!(count_lines(&out, "v "), 4 + 4 + 8 + 3 + 5);
        // 道路一条折线
        assert_eq!(count_lines(&out, "l "), 1);
        // 高程锥4个面
        assert!(out.contains("g Elevations"));
    }

    #[test]
    fn test_water_zone_sunken_flat() {
        let mut scene = Scene::new(10.0, 10.0, 1.0);
        scene.boundary = square_points(10.0);
        scene.zones = vec![Zone::new(ZoneKind::Water, square_points(10.0))];

        let out = export_mesh(&scene);
        assert!(out.contains("g Zone_1_Water"));
        // 下沉0.5米的底环，无顶环
        assert!(out.contains("-0.500"));
        assert_eq!(count_lines(&out, "v "), 8);
        // 地面2 + 水面2，无侧墙
        assert_eq!(count_lines(&out, "f "), 4);
    }

    #[test]
    fn test_degenerate_entities_skipped() {
        let mut scene = Scene::new(10.0, 10.0, 1.0);
        scene.boundary = square_points(10.0);
        // 2点功能区与1点道路应被静默跳过
        scene.zones = vec![Zone::new(
            ZoneKind::Greenery,
            vec![SketchPoint::new(1, 0.0, 0.0), SketchPoint::new(2, 5.0, 5.0)],
        )];
        scene.roads = vec![Road::new(vec![SketchPoint::new(3, 1.0, 1.0)], 2.0)];

        let out = export_mesh(&scene);
        assert!(!out.contains("g Zone_1_Greenery"));
        assert!(!out.contains("g Roads"));
        assert_eq!(count_lines(&out, "v "), 4);
    }

    #[test]
    fn test_empty_scene_still_outputs_document() {
        let scene = Scene::new(10.0, 10.0, 1.0);
        let out = export_mesh(&scene);
        assert!(out.contains("o SitePlan"));
        assert!(out.contains("mtllib"));
        assert_eq!(count_lines(&out, "v "), 0);
    }

    #[test]
    fn test_y_axis_flip_in_output() {
        // 像素(0,10)在10高画布上 → 世界Y=0；像素(0,0) → 世界Y=10
        let mut scene = Scene::new(10.0, 10.0, 1.0);
        scene.boundary = square_points(10.0);
        let out = export_mesh(&scene);
        // 第一个边界点(0,0)翻转后为 (0, 10, 0)
        let first_v = out.lines().find(|l| l.starts_with("v ")).unwrap();
        assert_eq!(first_v, "v 0.000 10.000 0.000");
    }
}
