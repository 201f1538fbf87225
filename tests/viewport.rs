//! Headless viewport lifecycle tests: rebuild, resize, and teardown
//! driven frame by frame, no window or GPU involved.

use massview::core::{Block, MeshDescription, Segment};
use massview::runtime::Viewport;

fn box_mesh() -> MeshDescription {
    MeshDescription::Box {
        width: 20.0,
        depth: 10.0,
        height: 15.0,
        origin: [0.0, 0.0, 0.0],
    }
}

fn multi_block_mesh() -> MeshDescription {
    MeshDescription::MultiBlock {
        blocks: vec![
            Block {
                x: -12.0,
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
                height: 28.0,
            },
            Block {
                x: 12.0,
                z: 0.0,
                width: 10.0,
                depth: 10.0,
                height: 20.0,
            },
        ],
        site_outline: vec![
            [-30.0, -20.0],
            [30.0, -20.0],
            [30.0, 20.0],
            [-30.0, 20.0],
            [-30.0, -20.0],
        ],
        origin: [0.0, 0.0, 0.0],
    }
}

#[test]
fn initial_mesh_is_installed_on_first_tick() {
    let mut viewport = Viewport::headless(Some(box_mesh()));
    assert_eq!(viewport.mass_node_count(), 0);

    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);
}

#[test]
fn empty_scene_renders_no_mass_nodes() {
    let mut viewport = Viewport::headless(None);
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 0);
}

#[test]
fn rebuild_with_unchanged_mesh_does_not_leak_nodes() {
    let mut viewport = Viewport::headless(Some(box_mesh()));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);

    viewport.update_mesh(Some(box_mesh()));
    viewport.tick();
    viewport.update_mesh(Some(box_mesh()));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);
}

#[test]
fn option_change_replaces_the_node_set() {
    let mut viewport = Viewport::headless(Some(box_mesh()));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);

    // Three blocks plus the site overlay and its outline loop.
    viewport.update_mesh(Some(multi_block_mesh()));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 5);

    viewport.update_mesh(None);
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 0);
}

#[test]
fn stacked_mesh_installs_one_node_per_segment() {
    let mesh = MeshDescription::Stacked {
        segments: vec![
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
        ],
        origin: [0.0, 0.0, 0.0],
    };
    let mut viewport = Viewport::headless(Some(mesh));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 2);
}

#[test]
fn courtyard_mesh_installs_a_single_ring_node() {
    let mesh = MeshDescription::Courtyard {
        outer_width: 40.0,
        outer_depth: 36.0,
        inner_width: 18.0,
        inner_depth: 14.0,
        height: 21.0,
        origin: [0.0, 0.0, 0.0],
    };
    let mut viewport = Viewport::headless(Some(mesh));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);
}

#[test]
fn dispose_is_idempotent_and_stops_ticks() {
    let mut viewport = Viewport::headless(Some(box_mesh()));
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);

    viewport.dispose();
    assert!(viewport.is_disposed());
    assert_eq!(viewport.mass_node_count(), 0);

    // Further lifecycle calls are no-ops, never errors.
    viewport.dispose();
    viewport.tick();
    viewport.update_mesh(Some(box_mesh()));
    viewport.resize(800.0, 600.0);
    assert_eq!(viewport.mass_node_count(), 0);
}

#[test]
fn resize_without_a_window_is_a_no_op() {
    let mut viewport = Viewport::headless(Some(box_mesh()));
    viewport.tick();
    viewport.resize(1280.0, 720.0);
    viewport.resize(f32::NAN, 720.0);
    viewport.tick();
    assert_eq!(viewport.mass_node_count(), 1);
}
