//! Programmatic glTF generation for integration tests.
//!
//! Builds a small cube scene the unpacker expects: one mesh with one
//! primitive (POSITION/NORMAL/index accessors packed into one external
//! buffer file) and a four-node scene graph.

use gltf_json as json;
use json::validation::Checked::Valid;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const BUFFER_FILE: &str = "cube.bin";
pub const SCENE_FILE: &str = "cube.gltf";

pub const VERTEX_COUNT: usize = 8;
pub const INDEX_COUNT: usize = 36;
pub const NODE_COUNT: usize = 4;

/// A complete scene plus the byte ranges each accessor occupies in the
/// buffer, so tests can assert byte-for-byte round trips.
pub struct GeneratedScene {
    pub root: json::Root,
    pub buffer_data: Vec<u8>,
    pub position_range: Range<usize>,
    pub normal_range: Range<usize>,
    pub index_range: Range<usize>,
}

/// Build the cube scene in memory.
pub fn build_cube_scene() -> GeneratedScene {
    let positions: Vec<[f32; 3]> = vec![
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    // Corner directions; magnitude is irrelevant to the copy.
    let normals: Vec<[f32; 3]> = positions
        .iter()
        .map(|p| [p[0] * 0.577, p[1] * 0.577, p[2] * 0.577])
        .collect();
    let indices: Vec<u16> = vec![
        0, 1, 2, 0, 2, 3, // back
        4, 6, 5, 4, 7, 6, // front
        0, 4, 5, 0, 5, 1, // bottom
        3, 2, 6, 3, 6, 7, // top
        0, 3, 7, 0, 7, 4, // left
        1, 5, 6, 1, 6, 2, // right
    ];
    assert_eq!(positions.len(), VERTEX_COUNT);
    assert_eq!(indices.len(), INDEX_COUNT);

    // Pack the binary buffer: positions, normals, indices back to back.
    let mut buffer = Vec::new();
    let mut views = Vec::new();

    let position_offset = buffer.len();
    for position in &positions {
        buffer.extend_from_slice(bytemuck::cast_slice(position));
    }
    let position_range = position_offset..buffer.len();
    views.push(vertex_view(position_offset, position_range.len()));

    let normal_offset = buffer.len();
    for normal in &normals {
        buffer.extend_from_slice(bytemuck::cast_slice(normal));
    }
    let normal_range = normal_offset..buffer.len();
    views.push(vertex_view(normal_offset, normal_range.len()));

    let index_offset = buffer.len();
    for index in &indices {
        buffer.extend_from_slice(&index.to_le_bytes());
    }
    let index_range = index_offset..buffer.len();
    views.push(json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: index_range.len().into(),
        byte_offset: Some(index_offset.into()),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(json::buffer::Target::ElementArrayBuffer)),
    });

    let accessors = vec![
        vec3_f32_accessor(0, positions.len()),
        vec3_f32_accessor(1, normals.len()),
        json::Accessor {
            buffer_view: Some(json::Index::new(2)),
            byte_offset: Some(0u64.into()),
            count: indices.len().into(),
            component_type: Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::U16,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(json::accessor::Type::Scalar),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
        },
    ];

    let root = build_root(accessors, views, buffer.len());

    GeneratedScene {
        root,
        buffer_data: buffer,
        position_range,
        normal_range,
        index_range,
    }
}

/// Write the scene's buffer file and JSON document into `dir`. Returns the
/// path of the written glTF document.
pub fn write_scene(dir: &Path, scene: &GeneratedScene) -> PathBuf {
    std::fs::write(dir.join(BUFFER_FILE), &scene.buffer_data)
        .expect("failed to write buffer file");

    let json_string =
        json::serialize::to_string(&scene.root).expect("failed to serialize glTF JSON");
    let gltf_path = dir.join(SCENE_FILE);
    std::fs::write(&gltf_path, json_string).expect("failed to write glTF document");
    gltf_path
}

fn vertex_view(offset: usize, length: usize) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: length.into(),
        byte_offset: Some(offset.into()),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(json::buffer::Target::ArrayBuffer)),
    }
}

fn vec3_f32_accessor(view: u32, count: usize) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(view)),
        byte_offset: Some(0u64.into()),
        count: count.into(),
        component_type: Valid(json::accessor::GenericComponentType(
            json::accessor::ComponentType::F32,
        )),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(json::accessor::Type::Vec3),
        min: None,
        max: None,
        name: None,
        normalized: false,
        sparse: None,
    }
}

fn build_root(
    accessors: Vec<json::Accessor>,
    views: Vec<json::buffer::View>,
    buffer_length: usize,
) -> json::Root {
    // Scene graph: node 2 parents nodes 0 and 1, node 3 is an isolated root
    // carrying the mesh and no explicit transform.
    let nodes = vec![
        json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: None,
            name: Some("Left".to_string()),
            rotation: None,
            scale: None,
            translation: Some([1.0, 2.0, 3.0]),
            skin: None,
            weights: None,
        },
        json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: None,
            name: Some("Right".to_string()),
            rotation: Some(json::scene::UnitQuaternion([0.1, 0.2, 0.3, 0.9])),
            scale: Some([2.0, 2.0, 2.0]),
            translation: None,
            skin: None,
            weights: None,
        },
        json::Node {
            camera: None,
            children: Some(vec![json::Index::new(0), json::Index::new(1)]),
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: None,
            name: Some("Group".to_string()),
            rotation: None,
            scale: None,
            translation: Some([0.0, -1.0, 0.0]),
            skin: None,
            weights: None,
        },
        json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(0)),
            name: Some("Cube".to_string()),
            rotation: None,
            scale: None,
            translation: None,
            skin: None,
            weights: None,
        },
    ];
    assert_eq!(nodes.len(), NODE_COUNT);

    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(0u32),
    );
    attributes.insert(Valid(json::mesh::Semantic::Normals), json::Index::new(1u32));

    let meshes = vec![json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Cube".to_string()),
        primitives: vec![json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(json::Index::new(2)),
            material: None,
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        }],
        weights: None,
    }];

    let scenes = vec![json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Scene".to_string()),
        nodes: vec![json::Index::new(2), json::Index::new(3)],
    }];

    let buffers = vec![json::Buffer {
        byte_length: buffer_length.into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: Some(BUFFER_FILE.to_string()),
    }];

    json::Root {
        accessors,
        animations: Vec::new(),
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some("gltf-unpack-test".to_string()),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers,
        buffer_views: views,
        cameras: Vec::new(),
        extensions: Default::default(),
        extras: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        images: Vec::new(),
        materials: Vec::new(),
        meshes,
        nodes,
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes,
        skins: Vec::new(),
        textures: Vec::new(),
    }
}
