pub mod core;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod synth;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

use std::fmt;

#[derive(Debug)]
pub struct MassviewError;

impl fmt::Display for MassviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MassviewError")
    }
}

impl std::error::Error for MassviewError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<MassviewError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::core::*;
    pub use crate::metrics::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::synth::*;
}
