//! One-shot export orchestration.
//!
//! Drives a full run: load the document, resolve and extract the POSITION,
//! NORMAL, and index accessors, then pack the scene-graph node array. Output
//! placement is explicit configuration so tests can point a run at a
//! temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use gltf_json::mesh::Semantic;

use crate::accessor::{self, ExpectedLayout};
use crate::document::SceneDocument;
use crate::error::UnpackError;
use crate::extract;
use crate::scene;

/// Where each artifact lands: an output directory plus per-artifact
/// filenames. The defaults are the fixed names the downstream loader expects.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub positions: String,
    pub normals: String,
    pub indices: String,
    pub nodes: String,
}

impl OutputLayout {
    /// The default artifact names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            positions: "positions.bin".to_string(),
            normals: "normals.bin".to_string(),
            indices: "indices.bin".to_string(),
            nodes: "nodes.bin".to_string(),
        }
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Bytes written per artifact by one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportSummary {
    pub position_bytes: u64,
    pub normal_bytes: u64,
    pub index_bytes: u64,
    pub node_bytes: u64,
    pub node_count: usize,
}

/// Unpack one glTF document into the four flat artifacts.
///
/// Aborts on the first failure. Artifacts already written by earlier steps of
/// a failed run are left in place; this is a one-shot offline tool, not a
/// service, and the next successful run overwrites them.
pub fn export_scene(input: &Path, layout: &OutputLayout) -> Result<ExportSummary, UnpackError> {
    let document = SceneDocument::load(input)?;
    let primitive = document.sole_primitive()?;

    let position_accessor =
        document.attribute_accessor(primitive, Semantic::Positions, "POSITION")?;
    let normal_accessor = document.attribute_accessor(primitive, Semantic::Normals, "NORMAL")?;
    let index_accessor = primitive
        .indices
        .ok_or_else(|| UnpackError::MalformedDocument("primitive has no indices".to_string()))?
        .value();

    fs::create_dir_all(&layout.dir).map_err(|err| UnpackError::Io {
        path: layout.dir.clone(),
        source: err,
    })?;

    let position_bytes = extract_accessor(
        &document,
        input,
        position_accessor,
        "POSITION",
        ExpectedLayout::VEC3_F32_VERTEX,
        &layout.dir.join(&layout.positions),
        "vertices",
    )?;
    let normal_bytes = extract_accessor(
        &document,
        input,
        normal_accessor,
        "NORMAL",
        ExpectedLayout::VEC3_F32_VERTEX,
        &layout.dir.join(&layout.normals),
        "normals",
    )?;
    let index_bytes = extract_accessor(
        &document,
        input,
        index_accessor,
        "indices",
        ExpectedLayout::U16_SCALAR_INDEX,
        &layout.dir.join(&layout.indices),
        "indices",
    )?;

    let packed = scene::pack_nodes(&document.root.nodes)?;
    let nodes_path = layout.dir.join(&layout.nodes);
    let node_bytes = extract::write_output(&nodes_path, &packed)?;
    let node_count = document.root.nodes.len();
    tracing::info!(
        "scene graph: wrote {} bytes to {:?} ({} nodes)",
        node_bytes,
        nodes_path,
        node_count
    );

    Ok(ExportSummary {
        position_bytes,
        normal_bytes,
        index_bytes,
        node_bytes,
        node_count,
    })
}

/// Resolve one accessor, copy its byte range out of the source buffer file,
/// and confirm the write.
fn extract_accessor(
    document: &SceneDocument,
    input: &Path,
    accessor_index: usize,
    field: &'static str,
    expected: ExpectedLayout,
    output: &Path,
    unit: &str,
) -> Result<u64, UnpackError> {
    let slice = accessor::resolve(&document.root, accessor_index, field, expected)?;
    let source = resolve_buffer_path(input, slice.uri)?;
    let written = extract::extract_slice(&source, &slice, output)?;
    tracing::info!(
        "{}: wrote {} bytes to {:?} ({} {})",
        field,
        written,
        output,
        slice.count,
        unit
    );
    Ok(written)
}

/// Buffer URIs are relative to the document, not to the working directory.
fn resolve_buffer_path(input: &Path, uri: &str) -> Result<PathBuf, UnpackError> {
    if uri.starts_with("data:") {
        return Err(UnpackError::MalformedDocument(
            "embedded data: buffer URIs are not supported; buffers must be external files"
                .to_string(),
        ));
    }
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(uri))
}
