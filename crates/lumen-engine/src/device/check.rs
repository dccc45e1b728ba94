//! Error-checked GPU calls.
//!
//! wgpu reports validation and allocation failures asynchronously through
//! error scopes instead of returning them from each call. [`call`] wraps a
//! single operation in its own scopes so a failure is attributed to the
//! operation (and the source line) that caused it.

use std::panic::Location;

/// Category of a captured GPU error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GpuErrorKind {
    Validation,
    OutOfMemory,
    Internal,
}

impl GpuErrorKind {
    fn of(err: &wgpu::Error) -> Self {
        match err {
            wgpu::Error::Validation { .. } => Self::Validation,
            wgpu::Error::OutOfMemory { .. } => Self::OutOfMemory,
            _ => Self::Internal,
        }
    }
}

/// A GPU error captured around a labelled call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[wgpu error] {kind:?}: {message} call: {label} at {location}")]
pub struct GpuError {
    /// Caller-supplied name of the operation.
    pub label: String,
    /// Source location of the `check::call` invocation.
    pub location: &'static Location<'static>,
    pub kind: GpuErrorKind,
    pub message: String,
}

impl GpuError {
    fn capture(label: &str, location: &'static Location<'static>, err: &wgpu::Error) -> Self {
        Self {
            label: label.to_string(),
            location,
            kind: GpuErrorKind::of(err),
            message: err.to_string(),
        }
    }
}

/// Runs `f` with GPU error capture and returns its value, or the first error
/// the device raised while `f` ran.
///
/// Errors raised before this call are not attributed to it: they belong to
/// whatever scope (or uncaptured-error handler) was active at the time.
#[track_caller]
pub fn call<T>(device: &wgpu::Device, label: &str, f: impl FnOnce() -> T) -> Result<T, GpuError> {
    let location = Location::caller();

    let internal = device.push_error_scope(wgpu::ErrorFilter::Internal);
    let oom = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    let validation = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let value = f();

    // Scopes pop in reverse push order.
    let validation = pollster::block_on(validation.pop());
    let oom = pollster::block_on(oom.pop());
    let internal = pollster::block_on(internal.pop());

    match validation.or(oom).or(internal) {
        None => Ok(value),
        Some(err) => {
            let err = GpuError::capture(label, location, &err);
            log::error!("{err}");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_label_and_location() {
        let location = Location::caller();
        let err = GpuError {
            label: "draw quad".into(),
            location,
            kind: GpuErrorKind::Validation,
            message: "index buffer too small".into(),
        };

        let text = err.to_string();
        assert!(text.starts_with("[wgpu error] Validation: index buffer too small"));
        assert!(text.contains("call: draw quad"));
        assert!(text.contains(location.file()));
        assert!(text.contains(&format!(":{}:", location.line())));
    }
}
