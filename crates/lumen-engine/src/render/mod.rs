//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (programs, buffers) and record into a
//! [`RenderTarget`] whose color view was already cleared for the frame.
//!
//! Convention: geometry is given directly in normalized device coordinates.

mod ctx;
pub mod geometry;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
