//! Primitive -> Bevy mesh construction and node spawning.
//!
//! Volumes map to `Cuboid`; planar shapes are tessellated with lyon
//! (even-odd fill, so hole rings need no particular winding) and optionally
//! extruded with mirrored caps plus side quads; loops become line strips.

use super::components::MassNode;
use super::resources::ScenePalette;
use crate::synth::{MaterialTag, Primitive, Shape};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};

/// Spawn one scene node for a primitive. Returns `None` for degenerate
/// geometry (too few points, tessellation failure), which is skipped with
/// a warning rather than treated as an error.
pub fn spawn_primitive(
    commands: &mut Commands,
    prim: &Primitive,
    palette: &ScenePalette,
    meshes: &mut Assets<Mesh>,
) -> Option<Entity> {
    let mesh = match &prim.shape {
        Shape::Volume { size } => Mesh::from(Cuboid::new(size.x, size.y, size.z)),
        Shape::Planar {
            outline,
            holes,
            extrusion,
        } => match planar_mesh(outline, holes, *extrusion) {
            Some(mesh) => mesh,
            None => {
                warn!("skipping untessellatable planar primitive ({} points)", outline.len());
                return None;
            }
        },
        Shape::Loop { points } => {
            if points.len() < 2 {
                return None;
            }
            loop_mesh(points)
        }
    };

    let material = match prim.material {
        MaterialTag::Mass => palette.mass.clone(),
        MaterialTag::SiteFill => palette.site_fill.clone(),
        MaterialTag::SiteEdge => palette.site_edge.clone(),
        MaterialTag::Ground => palette.ground.clone(),
    };

    let entity = commands
        .spawn((
            MassNode,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform {
                translation: prim.translation,
                rotation: prim.rotation,
                ..default()
            },
        ))
        .id();
    Some(entity)
}

/// Build a planar (optionally extruded) mesh in local space: the shape in
/// XY, extrusion along +Z.
///
/// The plan coordinates arrive as (x, z); the primitive's -90 deg rotation
/// about X maps local (x, y, z) to world (x, z, -y), so the plan z axis is
/// negated here to land unmirrored next to the world-space outline loop.
fn planar_mesh(outline: &[Vec2], holes: &[Vec<Vec2>], extrusion: Option<f32>) -> Option<Mesh> {
    if outline.len() < 3 {
        return None;
    }

    let outline = orient(mirror(outline), true);
    let holes: Vec<Vec<Vec2>> = holes
        .iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| orient(mirror(ring), false))
        .collect();

    let (cap_verts, cap_idx) = tessellate(&outline, &holes)?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let Some(depth) = extrusion else {
        // Flat overlay: a single cap facing local +Z (world up after the
        // rotation is applied).
        positions.extend(cap_verts.iter().map(|v| [v[0], v[1], 0.0]));
        normals.extend(std::iter::repeat_n([0.0, 0.0, 1.0], cap_verts.len()));
        indices.extend_from_slice(&cap_idx);
        return Some(triangle_mesh(positions, normals, indices));
    };

    // Bottom cap at z = 0, facing -Z.
    positions.extend(cap_verts.iter().map(|v| [v[0], v[1], 0.0]));
    normals.extend(std::iter::repeat_n([0.0, 0.0, -1.0], cap_verts.len()));
    for tri in cap_idx.chunks_exact(3) {
        indices.extend_from_slice(&[tri[0], tri[2], tri[1]]);
    }

    // Top cap at z = depth, facing +Z.
    let top_base = positions.len() as u32;
    positions.extend(cap_verts.iter().map(|v| [v[0], v[1], depth]));
    normals.extend(std::iter::repeat_n([0.0, 0.0, 1.0], cap_verts.len()));
    indices.extend(cap_idx.iter().map(|i| top_base + i));

    // Side walls: one quad per ring edge, flat outward normals. The outer
    // ring runs counter-clockwise and holes clockwise, so the same edge
    // perpendicular points out of the solid on both.
    for ring in std::iter::once(&outline).chain(holes.iter()) {
        let n = ring.len();
        for i in 0..n {
            let p0 = ring[i];
            let p1 = ring[(i + 1) % n];
            let edge = p1 - p0;
            let len = edge.length();
            if len <= f32::EPSILON {
                continue;
            }
            let normal = [edge.y / len, -edge.x / len, 0.0];

            let base = positions.len() as u32;
            positions.extend_from_slice(&[
                [p0.x, p0.y, 0.0],
                [p1.x, p1.y, 0.0],
                [p1.x, p1.y, depth],
                [p0.x, p0.y, depth],
            ]);
            normals.extend(std::iter::repeat_n(normal, 4));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    Some(triangle_mesh(positions, normals, indices))
}

/// Closed polyline mesh: a line strip revisiting the first point.
fn loop_mesh(points: &[Vec3]) -> Mesh {
    let mut positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    positions.push(points[0].to_array());

    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

fn triangle_mesh(
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

/// Plan (x, z) -> local authoring plane (x, -z). See `planar_mesh`.
fn mirror(ring: &[Vec2]) -> Vec<Vec2> {
    ring.iter().map(|p| Vec2::new(p.x, -p.y)).collect()
}

/// Force a ring into counter-clockwise (`ccw = true`) or clockwise order.
fn orient(mut ring: Vec<Vec2>, ccw: bool) -> Vec<Vec2> {
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

fn signed_area(ring: &[Vec2]) -> f32 {
    let mut twice = 0.0;
    for i in 0..ring.len() {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % ring.len()];
        twice += p0.x * p1.y - p1.x * p0.y;
    }
    twice / 2.0
}

/// Triangulate the outline (minus hole rings) into a flat vertex/index
/// buffer pair.
fn tessellate(outline: &[Vec2], holes: &[Vec<Vec2>]) -> Option<(Vec<[f32; 2]>, Vec<u32>)> {
    let mut builder = Path::builder();
    for ring in std::iter::once(outline).chain(holes.iter().map(Vec::as_slice)) {
        if ring.len() < 3 {
            continue;
        }
        builder.begin(point(ring[0].x, ring[0].y));
        for p in &ring[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
        )
        .ok()?;

    if buffers.indices.is_empty() {
        return None;
    }
    Some((buffers.vertices, buffers.indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_polygon_tessellates() {
        let outline = vec![
            Vec2::new(-30.0, -20.0),
            Vec2::new(30.0, -20.0),
            Vec2::new(30.0, 20.0),
            Vec2::new(-30.0, 20.0),
        ];
        let mesh = planar_mesh(&outline, &[], None).unwrap();
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::TriangleList);
    }

    #[test]
    fn extruded_ring_has_caps_and_walls() {
        let outer = vec![
            Vec2::new(-20.0, -18.0),
            Vec2::new(20.0, -18.0),
            Vec2::new(20.0, 18.0),
            Vec2::new(-20.0, 18.0),
        ];
        let inner = vec![
            Vec2::new(-9.0, -7.0),
            Vec2::new(9.0, -7.0),
            Vec2::new(9.0, 7.0),
            Vec2::new(-9.0, 7.0),
        ];
        let mesh = planar_mesh(&outer, &[inner], Some(21.0)).unwrap();
        // Two caps plus 8 side quads (4 outer + 4 inner edges).
        let count = mesh.count_vertices();
        assert!(count >= 2 * 8 + 8 * 4, "vertex count was {count}");
    }

    #[test]
    fn degenerate_outline_is_rejected() {
        let outline = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        assert!(planar_mesh(&outline, &[], Some(5.0)).is_none());
    }

    #[test]
    fn collinear_outline_is_rejected() {
        let outline = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        ];
        assert!(planar_mesh(&outline, &[], None).is_none());
    }

    #[test]
    fn orient_flips_only_when_needed() {
        let ccw = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];
        assert!(signed_area(&orient(ccw.clone(), true)) > 0.0);
        assert!(signed_area(&orient(ccw, false)) < 0.0);
    }
}
