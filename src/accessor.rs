//! Accessor resolution.
//!
//! Walks the accessor -> buffer view -> buffer indirection chain of a glTF
//! document and validates the declared data layout against what the caller
//! expects, before any bytes are touched.

use std::fmt;

use gltf_json::accessor::{ComponentType, GenericComponentType, Type};
use gltf_json::buffer::Target;
use gltf_json::validation::Checked;
use gltf_json::Root;

use crate::error::UnpackError;

/// Declared layout an accessor must match before its bytes are extracted.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedLayout {
    pub component_type: ComponentType,
    pub element_type: Type,
    pub target: Target,
}

impl ExpectedLayout {
    /// 32-bit float VEC3 vertex attribute (POSITION, NORMAL).
    pub const VEC3_F32_VERTEX: Self = Self {
        component_type: ComponentType::F32,
        element_type: Type::Vec3,
        target: Target::ArrayBuffer,
    };

    /// 16-bit unsigned scalar index data.
    pub const U16_SCALAR_INDEX: Self = Self {
        component_type: ComponentType::U16,
        element_type: Type::Scalar,
        target: Target::ElementArrayBuffer,
    };
}

/// Byte range of one accessor's data within an external buffer file.
#[derive(Debug, Clone)]
pub struct ResolvedSlice<'a> {
    /// URI of the buffer file the range points into, as declared.
    pub uri: &'a str,
    /// Offset of the buffer view from the start of that file.
    pub byte_offset: u64,
    /// Length of the buffer view in bytes.
    pub byte_length: u64,
    /// Element count declared by the accessor.
    pub count: u64,
}

/// Resolve `accessor_index` down to a byte range in a source buffer file.
///
/// `field` names the attribute being resolved (e.g. `"POSITION"`) and is used
/// in diagnostics only. Validation is equality on the declared component
/// type, element type, and buffer-view target; any mismatch reports the
/// offending field together with the expected and found values. Lookup only,
/// no file access.
pub fn resolve<'a>(
    root: &'a Root,
    accessor_index: usize,
    field: &'static str,
    expected: ExpectedLayout,
) -> Result<ResolvedSlice<'a>, UnpackError> {
    let accessor = root.accessors.get(accessor_index).ok_or_else(|| {
        UnpackError::MalformedDocument(format!(
            "accessor index {accessor_index} out of range ({} accessors in document)",
            root.accessors.len()
        ))
    })?;

    let component_type = match accessor.component_type {
        Checked::Valid(GenericComponentType(ct)) => Checked::Valid(ct),
        Checked::Invalid => Checked::Invalid,
    };
    expect_valid(component_type, expected.component_type, field, "componentType")?;
    expect_valid(accessor.type_, expected.element_type, field, "type")?;

    let view_index = accessor
        .buffer_view
        .ok_or_else(|| {
            UnpackError::MalformedDocument(format!("accessor {accessor_index} has no buffer view"))
        })?
        .value();
    let view = root.buffer_views.get(view_index).ok_or_else(|| {
        UnpackError::MalformedDocument(format!(
            "buffer view index {view_index} out of range ({} buffer views in document)",
            root.buffer_views.len()
        ))
    })?;

    let target = view.target.ok_or_else(|| {
        UnpackError::MalformedDocument(format!("buffer view {view_index} has no target"))
    })?;
    expect_valid(target, expected.target, field, "target")?;

    // The extracted range is the whole buffer view. An accessor sub-offset or
    // an explicit stride does not change that range, so neither rejects the
    // document, but both are worth flagging.
    let accessor_offset = accessor.byte_offset.map_or(0, |offset| offset.0);
    if accessor_offset != 0 {
        tracing::warn!(
            "{field}: accessor {accessor_index} has byteOffset {accessor_offset}; the extracted range covers the full buffer view"
        );
    }
    if view.byte_stride.is_some() {
        tracing::warn!(
            "{field}: buffer view {view_index} declares an explicit byteStride; the extracted range covers the full buffer view"
        );
    }

    let buffer_index = view.buffer.value();
    let buffer = root.buffers.get(buffer_index).ok_or_else(|| {
        UnpackError::MalformedDocument(format!(
            "buffer index {buffer_index} out of range ({} buffers in document)",
            root.buffers.len()
        ))
    })?;
    let uri = buffer.uri.as_deref().ok_or_else(|| {
        UnpackError::MalformedDocument(format!(
            "buffer {buffer_index} has no uri; only external buffer files are supported"
        ))
    })?;

    let slice = ResolvedSlice {
        uri,
        byte_offset: view.byte_offset.map_or(0, |offset| offset.0),
        byte_length: view.byte_length.0,
        count: accessor.count.0,
    };
    tracing::debug!(
        "{field}: accessor {accessor_index} -> {} bytes at offset {} in {:?}",
        slice.byte_length,
        slice.byte_offset,
        slice.uri
    );
    Ok(slice)
}

fn expect_valid<T>(
    declared: Checked<T>,
    expected: T,
    field: &'static str,
    key: &str,
) -> Result<(), UnpackError>
where
    T: Copy + PartialEq + fmt::Debug,
{
    let found = match declared {
        Checked::Valid(value) if value == expected => return Ok(()),
        Checked::Valid(value) => format!("{key} {value:?}"),
        Checked::Invalid => format!("{key} with an unrecognized value"),
    };
    Err(UnpackError::SchemaMismatch {
        field,
        expected: format!("{key} {:?}", expected),
        found,
    })
}
