//! Document loading and primitive selection.

use std::fs;
use std::path::Path;

use gltf_json::mesh::{Primitive, Semantic};
use gltf_json::validation::Checked;
use gltf_json::Root;

use crate::error::UnpackError;

/// One parsed glTF document, read-only for the duration of a run.
pub struct SceneDocument {
    pub root: Root,
}

impl SceneDocument {
    /// Load and parse a glTF JSON document from disk.
    pub fn load(path: &Path) -> Result<Self, UnpackError> {
        let bytes = fs::read(path).map_err(|source| UnpackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Root = serde_json::from_slice(&bytes).map_err(|err| {
            UnpackError::MalformedDocument(format!("not a parseable glTF document: {err}"))
        })?;
        Ok(Self { root })
    }

    /// The one primitive this tool extracts.
    ///
    /// The document must contain exactly one mesh with exactly one primitive;
    /// anything else is rejected before any output is written.
    pub fn sole_primitive(&self) -> Result<&Primitive, UnpackError> {
        if self.root.meshes.len() != 1 {
            return Err(UnpackError::MalformedDocument(format!(
                "expected exactly one mesh, found {}",
                self.root.meshes.len()
            )));
        }
        let mesh = &self.root.meshes[0];
        if mesh.primitives.len() != 1 {
            return Err(UnpackError::MalformedDocument(format!(
                "expected exactly one primitive, found {}",
                mesh.primitives.len()
            )));
        }
        Ok(&mesh.primitives[0])
    }

    /// Accessor index of a vertex attribute on the primitive.
    pub fn attribute_accessor(
        &self,
        primitive: &Primitive,
        semantic: Semantic,
        field: &'static str,
    ) -> Result<usize, UnpackError> {
        primitive
            .attributes
            .get(&Checked::Valid(semantic))
            .map(|index| index.value())
            .ok_or_else(|| {
                UnpackError::MalformedDocument(format!("primitive has no {field} attribute"))
            })
    }
}
