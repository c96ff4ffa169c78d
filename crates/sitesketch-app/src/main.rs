//! SiteSketch 命令行入口
//!
//! 读取编辑层导出的场景快照（JSON），生成3D网格（.obj）
//! 和/或2D图纸（.dxf）。导出由显式的用户动作触发，
//! 核心不做任何网络或文件I/O，写盘在这里完成。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sitesketch_export::{export_mesh, export_plan, load_scene};

#[derive(Parser)]
#[command(name = "sitesketch", about = "场地草图导出工具", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 导出3D网格（OBJ）
    Mesh {
        /// 场景快照JSON
        scene: PathBuf,
        /// 输出文件（默认与场景同名，扩展名.obj）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 导出2D图纸（DXF）
    Plan {
        /// 场景快照JSON
        scene: PathBuf,
        /// 输出文件（默认与场景同名，扩展名.dxf）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 同时导出网格与图纸
    All {
        /// 场景快照JSON
        scene: PathBuf,
        /// 输出目录（默认为场景所在目录）
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

/// 由场景路径推导输出路径
fn derive_output(scene: &PathBuf, explicit: Option<PathBuf>, ext: &str) -> PathBuf {
    explicit.unwrap_or_else(|| scene.with_extension(ext))
}

fn write_output(path: &PathBuf, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let cli = Cli::parse();

    match cli.command {
        Command::Mesh { scene, output } => {
            let snapshot = load_scene(&scene)
                .with_context(|| format!("Failed to load scene {}", scene.display()))?;
            let out_path = derive_output(&scene, output, "obj");
            write_output(&out_path, &export_mesh(&snapshot))?;
        }
        Command::Plan { scene, output } => {
            let snapshot = load_scene(&scene)
                .with_context(|| format!("Failed to load scene {}", scene.display()))?;
            let out_path = derive_output(&scene, output, "dxf");
            write_output(&out_path, &export_plan(&snapshot))?;
        }
        Command::All { scene, out_dir } => {
            let snapshot = load_scene(&scene)
                .with_context(|| format!("Failed to load scene {}", scene.display()))?;

            let stem = scene
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "site".to_string());
            let dir = out_dir.unwrap_or_else(|| {
                scene
                    .parent()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."))
            });

            write_output(&dir.join(format!("{}.obj", stem)), &export_mesh(&snapshot))?;
            write_output(&dir.join(format!("{}.dxf", stem)), &export_plan(&snapshot))?;
        }
    }

    Ok(())
}
