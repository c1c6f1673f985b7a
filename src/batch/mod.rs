//! Batch variant rendering over a [`Host`](crate::host::Host): paint, wheel
//! selection, engine setup and one render per camera angle.

mod config;
mod driver;
mod engine;
mod invoke;
mod paint;
mod wheels;

pub use config::*;
pub use driver::*;
pub use engine::*;
pub use invoke::*;
pub use paint::*;
pub use wheels::*;

/// Fatal errors of a batch run, every one of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("camera not found: '{0}'")]
    CameraNotFound(String),

    #[error("invalid hex color '{0}', expected '#RRGGBB'")]
    InvalidHexColor(String),
}
