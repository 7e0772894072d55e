//! gltf-unpack - flat binary exporter for glTF scenes
//!
//! Extracts the one mesh primitive's POSITION/NORMAL/index data and the
//! scene-graph node array from a glTF document into positions.bin,
//! normals.bin, indices.bin, and nodes.bin.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use gltf_unpack::{export_scene, OutputLayout};

#[derive(Parser)]
#[command(name = "gltf-unpack")]
#[command(about = "Unpacks glTF mesh and scene-graph data into flat binary files")]
#[command(version)]
struct Cli {
    /// Path to the glTF scene description
    scene: PathBuf,

    /// Output directory for the packed artifacts
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    tracing::info!("Unpacking {:?} -> {:?}", cli.scene, cli.output);
    let summary = export_scene(&cli.scene, &OutputLayout::in_dir(&cli.output))?;
    tracing::info!(
        "Done! {} bytes of vertex data, {} bytes of indices, {} nodes",
        summary.position_bytes + summary.normal_bytes,
        summary.index_bytes,
        summary.node_count
    );

    Ok(())
}
