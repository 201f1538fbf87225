//! Open a native viewer window showing a three-block massing option on a
//! rectangular site.
//!
//! ```sh
//! cargo run --example simple
//! ```

use massview::core::{Block, MeshDescription, ViewerConfig};
use massview::runtime::run_viewer;

fn main() -> massview::Result<()> {
    let mesh = MeshDescription::MultiBlock {
        blocks: vec![
            Block {
                x: -14.0,
                z: 2.0,
                width: 12.0,
                depth: 10.0,
                height: 24.0,
            },
            Block {
                x: 0.0,
                z: -4.0,
                width: 12.0,
                depth: 10.0,
                height: 32.0,
            },
            Block {
                x: 14.0,
                z: 2.0,
                width: 12.0,
                depth: 10.0,
                height: 24.0,
            },
        ],
        site_outline: vec![
            [-28.0, -16.0],
            [28.0, -16.0],
            [28.0, 16.0],
            [-28.0, 16.0],
            [-28.0, -16.0],
        ],
        origin: [0.0, 0.0, 0.0],
    };

    run_viewer(ViewerConfig::default(), Some(mesh))
}
