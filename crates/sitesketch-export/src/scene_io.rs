//! 场景快照文件读写
//!
//! 场景以JSON保存，编辑层导出的快照可直接喂给命令行工具。

use crate::error::ExportError;
use sitesketch_core::scene::Scene;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// 从JSON文件加载场景快照
pub fn load_scene(path: &Path) -> Result<Scene, ExportError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let scene: Scene = serde_json::from_reader(reader)?;

    tracing::info!(
        "Loaded scene: {} boundary points, {} zones, {} roads, {} elevations from {}",
        scene.boundary.len(),
        scene.zones.len(),
        scene.roads.len(),
        scene.elevations.len(),
        path.display()
    );

    Ok(scene)
}

/// 保存场景快照为JSON文件
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, scene)?;

    tracing::info!("Saved scene to {}", path.display());
    Ok(())
}
