//! Waterline Engine - interactive 2.5D water strip in WASM
//!
//! A 1-D height field follows a scrolling anchor, is stepped with a damped
//! leapfrog wave equation, is disturbed by actors crossing the surface line,
//! and drives the top row of a quad-strip mesh.
//!
//! Architecture:
//! - core/        - math primitives, safety macros
//! - domain/      - config, errors, interaction contracts, test scene
//! - spatial/     - wave fields and the rotating buffer set
//! - systems/     - anchor tracker, interaction collector, wave stepper, mesh
//! - simulation/  - per-instance orchestration and the JS facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🌊 Waterline WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{
    ActorHandle, ActorKind, InteractionItem, IntrusionQuery, IntrusionScene, SurfaceTransform, UpdateMode,
    VelocityProvider, VelocitySource, WaterConfig, WaterError,
};
pub use simulation::{
    AdvanceReport, FrameTime, PerfStats, RenderUniforms, SimulationStatus, WaterSurface, WaterSurfaceCore,
};
