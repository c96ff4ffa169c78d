//! SiteSketch 导出管线
//!
//! 把场地快照（`sitesketch_core::scene::Scene`）序列化为两种文本文档：
//! - `.obj` 三角化拉伸网格（`obj`模块）
//! - `.dxf` 分层矢量图纸（`dxf`模块）
//!
//! 两个导出器都是单遍、同步、无共享状态：输入一个不可变快照，
//! 返回一个完整字符串。文件写入只是薄封装，核心不做I/O。

pub mod dxf;
pub mod error;
pub mod obj;
pub mod scene_io;

pub use dxf::{export_plan, DxfWriter};
pub use error::ExportError;
pub use obj::{export_mesh, ObjWriter};
pub use scene_io::{load_scene, save_scene};
