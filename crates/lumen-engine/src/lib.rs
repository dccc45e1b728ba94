//! Lumen engine crate.
//!
//! A small rendering harness: one window, one GPU context, programs built
//! from annotated GLSL files, and a static quad renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
