//! Platform layer
//!
//! Handles what sits outside the simulation core:
//! - Frame-rate measurement from call cadence
//! - Browser binding (wasm32 only)

pub mod fps;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use fps::FpsCounter;
