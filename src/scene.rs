//! Scene-graph packing.
//!
//! Inverts the node forest's children lists into a parent map and serializes
//! one fixed-stride record per node: translation.xyz, rotation.xyzw,
//! scale.xyz as little-endian f32, then the parent index as little-endian
//! u32. Missing transform components pack as identity.

use gltf_json::scene::Node;

use crate::error::UnpackError;

/// Serialized size of one node record: 10 x f32 + 1 x u32.
pub const NODE_RECORD_SIZE: usize = 44;

/// Wire encoding for a root node's parent slot. Only the binary format uses
/// this; the in-memory parent map stores `Option<u32>`.
pub const NO_PARENT: u32 = u32::MAX;

const DEFAULT_TRANSLATION: [f32; 3] = [0.0, 0.0, 0.0];
const DEFAULT_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const DEFAULT_SCALE: [f32; 3] = [1.0, 1.0, 1.0];

/// Invert the children lists into one parent entry per node.
///
/// A child index out of range, or a node claimed as a child by two different
/// parents, is a malformed document. Visitation order does not affect the
/// result: in a well-formed forest each child slot is written exactly once.
pub fn build_parent_map(nodes: &[Node]) -> Result<Vec<Option<u32>>, UnpackError> {
    let mut parents: Vec<Option<u32>> = vec![None; nodes.len()];
    for (node_index, node) in nodes.iter().enumerate() {
        let Some(children) = &node.children else {
            continue;
        };
        for child in children {
            let child_index = child.value();
            if child_index >= nodes.len() {
                return Err(UnpackError::MalformedDocument(format!(
                    "node {node_index} lists child {child_index}, but the document has {} nodes",
                    nodes.len()
                )));
            }
            if let Some(previous) = parents[child_index] {
                return Err(UnpackError::MalformedDocument(format!(
                    "node {child_index} is claimed as a child of both node {previous} and node {node_index}"
                )));
            }
            parents[child_index] = Some(node_index as u32);
        }
    }
    Ok(parents)
}

/// Pack every node into one contiguous buffer, `NODE_RECORD_SIZE` bytes per
/// node, in document order.
pub fn pack_nodes(nodes: &[Node]) -> Result<Vec<u8>, UnpackError> {
    let parents = build_parent_map(nodes)?;

    let mut packed = Vec::with_capacity(nodes.len() * NODE_RECORD_SIZE);
    for (node, parent) in nodes.iter().zip(parents) {
        let translation = node.translation.unwrap_or(DEFAULT_TRANSLATION);
        let rotation = match &node.rotation {
            Some(quaternion) => quaternion.0,
            None => DEFAULT_ROTATION,
        };
        let scale = node.scale.unwrap_or(DEFAULT_SCALE);

        for component in translation {
            packed.extend_from_slice(&component.to_le_bytes());
        }
        for component in rotation {
            packed.extend_from_slice(&component.to_le_bytes());
        }
        for component in scale {
            packed.extend_from_slice(&component.to_le_bytes());
        }
        packed.extend_from_slice(&parent.unwrap_or(NO_PARENT).to_le_bytes());
    }
    Ok(packed)
}
