//! Pure geometry synthesis: `MeshDescription` -> renderable primitives.
//!
//! No scene or device state is touched here. Output primitives are value
//! objects recomputed from scratch on every description change, so callers
//! can re-run synthesis freely with no cleanup obligations.

use crate::core::MeshDescription;
use bevy_math::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Height above the ground plane at which the site outline loop is drawn,
/// keeping it clear of the overlay fill.
pub const OUTLINE_LIFT: f32 = 0.05;

/// Smaller lift for the overlay fill itself, keeping it clear of the
/// ground plane.
pub const OVERLAY_LIFT: f32 = 0.02;

/// Which shared material a primitive is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialTag {
    Mass,
    SiteFill,
    SiteEdge,
    Ground,
}

/// Base geometry of a primitive, before placement.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangular volume, centered on its local origin.
    Volume { size: Vec3 },
    /// A 2D outline with optional hole rings, optionally extruded along
    /// local +Z. Authored flat; the primitive's rotation orients it.
    Planar {
        outline: Vec<Vec2>,
        holes: Vec<Vec<Vec2>>,
        extrusion: Option<f32>,
    },
    /// A closed polyline, rendered as edges. The first point is implicitly
    /// reconnected to the last.
    Loop { points: Vec<Vec3> },
}

/// A renderable shape plus its placement and material tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub translation: Vec3,
    pub rotation: Quat,
    pub material: MaterialTag,
}

impl Primitive {
    fn volume(size: Vec3, translation: Vec3) -> Self {
        Self {
            shape: Shape::Volume { size },
            translation,
            rotation: Quat::IDENTITY,
            material: MaterialTag::Mass,
        }
    }
}

/// Lays a planar shape authored in local XY flat into the world XZ plane,
/// extrusion (local +Z) pointing up.
fn flat_rotation() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Synthesize the primitive list for one massing option.
///
/// Pure and deterministic. `None` (no option selected yet) and degenerate
/// descriptions (empty segment/block lists, too-short outlines) produce a
/// shorter or empty list rather than an error; a half-drawn state is normal
/// mid-interaction.
pub fn synthesize(mesh: Option<&MeshDescription>) -> Vec<Primitive> {
    let Some(mesh) = mesh else {
        return Vec::new();
    };

    match mesh {
        MeshDescription::Box {
            width,
            depth,
            height,
            origin,
        } => {
            let origin = Vec3::from_array(*origin);
            vec![Primitive::volume(
                Vec3::new(*width, *height, *depth),
                origin + Vec3::new(0.0, height / 2.0, 0.0),
            )]
        }
        MeshDescription::Stacked { segments, origin } => {
            let origin = Vec3::from_array(*origin);
            segments
                .iter()
                .map(|seg| {
                    // Segments stack by explicit base elevation, not by
                    // accumulated height. Overlapping bases are the
                    // caller's responsibility.
                    Primitive::volume(
                        Vec3::new(seg.width, seg.height, seg.depth),
                        origin + Vec3::new(0.0, seg.base_y + seg.height / 2.0, 0.0),
                    )
                })
                .collect()
        }
        MeshDescription::Courtyard {
            outer_width,
            outer_depth,
            inner_width,
            inner_depth,
            height,
            origin,
        } => {
            // An inner rectangle that is not strictly smaller than the
            // outer one yields a visually degenerate ring; the source
            // viewer accepted that, so no validation here.
            vec![Primitive {
                shape: Shape::Planar {
                    outline: centered_rect(*outer_width, *outer_depth),
                    holes: vec![centered_rect(*inner_width, *inner_depth)],
                    extrusion: Some(*height),
                },
                translation: Vec3::from_array(*origin),
                rotation: flat_rotation(),
                material: MaterialTag::Mass,
            }]
        }
        MeshDescription::MultiBlock {
            blocks,
            site_outline,
            origin,
        } => {
            let origin = Vec3::from_array(*origin);
            let mut primitives = Vec::with_capacity(blocks.len() + 2);

            if site_outline.len() > 2 {
                primitives.push(Primitive {
                    shape: Shape::Planar {
                        outline: site_outline.iter().map(|p| Vec2::from_array(*p)).collect(),
                        holes: Vec::new(),
                        extrusion: None,
                    },
                    translation: origin + Vec3::new(0.0, OVERLAY_LIFT, 0.0),
                    rotation: flat_rotation(),
                    material: MaterialTag::SiteFill,
                });
                primitives.push(Primitive {
                    shape: Shape::Loop {
                        points: site_outline
                            .iter()
                            .map(|[x, z]| Vec3::new(*x, OUTLINE_LIFT, *z))
                            .collect(),
                    },
                    translation: origin,
                    rotation: Quat::IDENTITY,
                    material: MaterialTag::SiteEdge,
                });
            }

            for block in blocks {
                primitives.push(Primitive::volume(
                    Vec3::new(block.width, block.height, block.depth),
                    origin + Vec3::new(block.x, block.height / 2.0, block.z),
                ));
            }

            primitives
        }
    }
}

/// Rectangle of the given plan dimensions, centered on the local origin,
/// counter-clockwise.
fn centered_rect(width: f32, depth: f32) -> Vec<Vec2> {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    vec![
        Vec2::new(-hw, -hd),
        Vec2::new(hw, -hd),
        Vec2::new(hw, hd),
        Vec2::new(-hw, hd),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Block, Segment};

    fn volume_of(prim: &Primitive) -> Vec3 {
        match &prim.shape {
            Shape::Volume { size } => *size,
            other => panic!("expected volume, got {other:?}"),
        }
    }

    #[test]
    fn absent_description_yields_nothing() {
        assert!(synthesize(None).is_empty());
    }

    #[test]
    fn box_rests_on_ground() {
        let mesh = MeshDescription::Box {
            width: 20.0,
            depth: 10.0,
            height: 15.0,
            origin: [0.0, 0.0, 0.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims.len(), 1);
        assert_eq!(volume_of(&prims[0]), Vec3::new(20.0, 15.0, 10.0));
        assert_eq!(prims[0].translation, Vec3::new(0.0, 7.5, 0.0));
        assert_eq!(prims[0].material, MaterialTag::Mass);
    }

    #[test]
    fn box_origin_offsets_placement() {
        let mesh = MeshDescription::Box {
            width: 10.0,
            depth: 10.0,
            height: 8.0,
            origin: [5.0, 2.0, -3.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims[0].translation, Vec3::new(5.0, 6.0, -3.0));
    }

    #[test]
    fn stacked_emits_one_volume_per_segment_in_order() {
        let segments = vec![
            Segment {
                width: 30.0,
                depth: 20.0,
                height: 12.0,
                base_y: 0.0,
            },
            Segment {
                width: 22.0,
                depth: 16.0,
                height: 10.0,
                base_y: 12.0,
            },
            Segment {
                width: 14.0,
                depth: 12.0,
                height: 8.0,
                base_y: 22.0,
            },
        ];
        let mesh = MeshDescription::Stacked {
            segments: segments.clone(),
            origin: [0.0, 0.0, 0.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims.len(), 3);
        for (prim, seg) in prims.iter().zip(&segments) {
            assert_eq!(volume_of(prim), Vec3::new(seg.width, seg.height, seg.depth));
            assert_eq!(prim.translation.y, seg.base_y + seg.height / 2.0);
        }
    }

    #[test]
    fn stacked_with_no_segments_is_empty() {
        let mesh = MeshDescription::Stacked {
            segments: vec![],
            origin: [0.0, 0.0, 0.0],
        };
        assert!(synthesize(Some(&mesh)).is_empty());
    }

    #[test]
    fn courtyard_is_one_extruded_ring() {
        let mesh = MeshDescription::Courtyard {
            outer_width: 40.0,
            outer_depth: 36.0,
            inner_width: 18.0,
            inner_depth: 14.0,
            height: 21.0,
            origin: [0.0, 0.0, 0.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims.len(), 1);
        let Shape::Planar {
            outline,
            holes,
            extrusion,
        } = &prims[0].shape
        else {
            panic!("expected planar shape");
        };
        assert_eq!(outline.len(), 4);
        assert_eq!(holes.len(), 1);
        assert_eq!(*extrusion, Some(21.0));
        assert_eq!(outline[2], Vec2::new(20.0, 18.0));
        assert_eq!(holes[0][2], Vec2::new(9.0, 7.0));
    }

    #[test]
    fn multi_block_without_outline_is_volumes_only() {
        let blocks = vec![
            Block {
                x: -12.0,
                z: 4.0,
                width: 14.0,
                depth: 10.0,
                height: 24.0,
            },
            Block {
                x: 8.0,
                z: -6.0,
                width: 12.0,
                depth: 12.0,
                height: 18.0,
            },
        ];
        let mesh = MeshDescription::MultiBlock {
            blocks: blocks.clone(),
            site_outline: vec![],
            origin: [0.0, 0.0, 0.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims.len(), 2);
        for (prim, block) in prims.iter().zip(&blocks) {
            assert_eq!(prim.translation.x, block.x);
            assert_eq!(prim.translation.z, block.z);
            assert_eq!(prim.translation.y, block.height / 2.0);
        }
    }

    #[test]
    fn multi_block_with_outline_adds_overlay_and_loop() {
        let blocks = vec![
            Block {
                x: -10.0,
                z: 0.0,
                width: 10.0,
                depth: 10.0,
                height: 20.0,
            },
            Block {
                x: 0.0,
                z: 0.0,
                width: 10.0,
                depth: 10.0,
                height: 26.0,
            },
            Block {
                x: 10.0,
                z: 0.0,
                width: 10.0,
                depth: 10.0,
                height: 20.0,
            },
        ];
        let outline = vec![
            [-30.0, -20.0],
            [30.0, -20.0],
            [30.0, 20.0],
            [-30.0, 20.0],
            [-30.0, -20.0],
        ];
        let mesh = MeshDescription::MultiBlock {
            blocks,
            site_outline: outline.clone(),
            origin: [0.0, 0.0, 0.0],
        };
        let prims = synthesize(Some(&mesh));
        assert_eq!(prims.len(), 5);

        let fills: Vec<_> = prims
            .iter()
            .filter(|p| p.material == MaterialTag::SiteFill)
            .collect();
        let edges: Vec<_> = prims
            .iter()
            .filter(|p| p.material == MaterialTag::SiteEdge)
            .collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(edges.len(), 1);

        let Shape::Loop { points } = &edges[0].shape else {
            panic!("expected loop shape");
        };
        assert_eq!(points.len(), outline.len());
        assert!(points.iter().all(|p| p.y == OUTLINE_LIFT));
    }

    #[test]
    fn short_outline_yields_no_overlay() {
        let mesh = MeshDescription::MultiBlock {
            blocks: vec![Block {
                x: 0.0,
                z: 0.0,
                width: 10.0,
                depth: 10.0,
                height: 12.0,
            }],
            site_outline: vec![[0.0, 0.0], [10.0, 0.0]],
            origin: [0.0, 0.0, 0.0],
        };
        assert_eq!(synthesize(Some(&mesh)).len(), 1);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let mesh = MeshDescription::Box {
            width: 12.0,
            depth: 9.0,
            height: 30.0,
            origin: [0.0, 0.0, 0.0],
        };
        assert_eq!(synthesize(Some(&mesh)), synthesize(Some(&mesh)));
    }
}
