//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - attributing GPU errors to the call that raised them ([`check`])

pub mod check;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use check::{GpuError, GpuErrorKind};
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{AdapterSummary, Gpu};
pub use init::GpuInit;
