//! Imports a small in-memory FBX document and prints what came out.
//!
//! Run with `cargo run --example dump_scene`. Set `RUST_LOG=debug` to watch
//! the traversal happen.

use anyhow::Result;
use cairn::import::fbx::memory::{MemoryAttribute, MemoryCursor, MemoryMaterial, MemoryNode};
use cairn::Importer;

fn cube_attribute() -> MemoryAttribute {
    MemoryAttribute::new("mesh")
        .triangulated()
        .with_vertices(vec![
            -0.5, -0.5, -0.5, //
            0.5, -0.5, -0.5, //
            0.5, 0.5, -0.5, //
            -0.5, 0.5, -0.5, //
            -0.5, -0.5, 0.5, //
            0.5, -0.5, 0.5, //
            0.5, 0.5, 0.5, //
            -0.5, 0.5, 0.5,
        ])
        .with_faces(vec![
            0, 1, 2, 0, 2, 3, // back
            4, 6, 5, 4, 7, 6, // front
            0, 4, 5, 0, 5, 1, // bottom
            3, 2, 6, 3, 6, 7, // top
            0, 3, 7, 0, 7, 4, // left
            1, 5, 6, 1, 6, 2, // right
        ])
        .with_smoothing_groups(vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6])
}

fn build_document() -> MemoryNode {
    let steel = MemoryMaterial::new("BrushedSteel")
        .with_diffuse([0.6, 0.6, 0.65, 1.0])
        .with_specular([0.9, 0.9, 0.9, 1.0])
        .with_specular_power(48.0);

    MemoryNode::new("root")
        .with_child(
            MemoryNode::new("cube_a")
                .with_attribute(cube_attribute())
                .with_material(steel.clone())
                .with_geometric_translation([-1.5, 0.0, 0.0]),
        )
        .with_child(
            MemoryNode::new("cube_b")
                .with_attribute(cube_attribute())
                .with_material(steel)
                .with_geometric_translation([1.5, 0.0, 0.0]),
        )
        .with_child(MemoryNode::new("key_light").with_attribute(MemoryAttribute::new("light")))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut importer = Importer::new(MemoryCursor::new(build_document()));
    let scene = importer.load("demo.fbx")?;

    let stats = scene.stats();
    println!(
        "imported {} node(s), {} material(s), {} vertices, {} triangles",
        stats.node_count, stats.material_count, stats.total_vertices, stats.total_triangles
    );

    for node in &scene.nodes {
        let geometry = match &node.mesh {
            Some(mesh) => format!("{} verts / {} tris", mesh.vertex_count(), mesh.triangle_count()),
            None => "no geometry".to_string(),
        };
        let material = node
            .material
            .as_deref()
            .map(|m| m.name.as_str())
            .unwrap_or("-");
        println!(
            "  [{}] {geometry}, material: {material}, {} transform(s)",
            node.name,
            node.transforms.len()
        );
    }

    Ok(())
}
