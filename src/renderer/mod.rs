//! Draw-ready output
//!
//! Turns a [`crate::sim::RenderSnapshot`] into flat instance records a 2D
//! raster backend can upload and draw in one full redraw per frame.

pub mod instance;

pub use instance::{CircleInstance, FrameInstances, RectInstance, build_instances};
