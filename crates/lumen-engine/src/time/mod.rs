//! Frame timing.
//!
//! The runtime owns one [`FrameClock`] and hands each frame's [`FrameTime`]
//! to the app; nothing here depends on winit or wgpu.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
