//! # FBX Import Pipeline
//!
//! Turns an FBX document into a [`SceneRoot`] in two stages:
//!
//! 1. **Materialize** ([`graph`]) - the native cursor is walked depth first
//!    exactly once and snapshotted into plain data
//! 2. **Convert** - the snapshot is turned into scene nodes: mesh buffers
//!    assembled ([`mesh`]), materials resolved and cached ([`material`]),
//!    placement composed ([`transform`])
//!
//! The binding is opened at the start and closed as soon as the snapshot
//! exists, before any conversion work runs, so every exit path out of an
//! import leaves the native runtime released.
//!
//! [`SceneRoot`]: crate::scene::SceneRoot

pub mod binding;
pub mod memory;

pub(crate) mod graph;
pub(crate) mod material;
pub(crate) mod mesh;
pub(crate) mod transform;

use std::path::Path;

use log::{info, trace, warn};

use crate::import::error::ImportError;
use crate::import::ImportConfig;
use crate::scene::{SceneNode, SceneRoot};
use binding::FbxCursor;
use graph::DocumentGraph;
use material::MaterialResolver;

/// Runs one complete import against an FBX cursor.
pub(crate) fn import<B: FbxCursor>(
    cursor: &mut B,
    path: &Path,
    config: &ImportConfig,
) -> Result<SceneRoot, ImportError> {
    let opened = match cursor.open(path) {
        Ok(opened) => opened,
        Err(error) => {
            cursor.close();
            return Err(error.into());
        }
    };

    if !opened {
        cursor.close();
        if config.open_failure_is_error {
            return Err(ImportError::OpenFailed {
                path: path.display().to_string(),
            });
        }
        warn!("could not open [{}], returning empty scene", path.display());
        return Ok(SceneRoot::new());
    }

    // Snapshot first, close immediately; conversion runs on plain data.
    let materialized = graph::materialize(cursor, config);
    cursor.close();
    let graph = materialized?;

    convert(graph)
}

/// Converts the materialized graph into the output scene.
///
/// Emits one scene node per convertible attribute, in graph preorder, the
/// same order the source document lists its nodes.
fn convert(graph: DocumentGraph) -> Result<SceneRoot, ImportError> {
    let mut resolver = MaterialResolver::new();
    let mut nodes = Vec::new();

    for index in graph.preorder() {
        let record = &graph.nodes[index];
        for attribute in &record.attributes {
            let Some(geometry) = &attribute.geometry else {
                trace!(
                    "node [{}]: no geometry for {:?} attribute",
                    record.name,
                    attribute.ty
                );
                continue;
            };

            let mesh = mesh::build_mesh(geometry)?;

            // The node attaches its first material; any further snapshotted
            // names are resolved into the session cache only.
            let mut node_material = None;
            for (slot, name) in record.material_names.iter().enumerate() {
                let resolved = resolver.resolve(&graph.materials[name])?;
                if slot == 0 {
                    node_material = Some(resolved);
                }
            }

            nodes.push(SceneNode {
                name: record.name.clone(),
                mesh,
                material: node_material,
                transforms: transform::compose_transforms(
                    record.affine,
                    record.geometric_translation,
                ),
            });
        }
    }

    let root = SceneRoot {
        nodes,
        materials: resolver.into_cache(),
    };
    let stats = root.stats();
    info!(
        "imported {} node(s), {} material(s), {} vertices",
        stats.node_count, stats.material_count, stats.total_vertices
    );
    Ok(root)
}
