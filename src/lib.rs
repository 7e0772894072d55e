//! gltf-unpack library
//!
//! Resolves glTF accessors down to raw byte ranges and re-packs one mesh
//! primitive plus the scene-graph node array into flat binary files for
//! direct loading by a renderer.

pub mod accessor;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod scene;

pub use accessor::{resolve, ExpectedLayout, ResolvedSlice};
pub use document::SceneDocument;
pub use error::UnpackError;
pub use export::{export_scene, ExportSummary, OutputLayout};
pub use scene::{build_parent_map, pack_nodes, NODE_RECORD_SIZE, NO_PARENT};
