//! Error types for the pipeline.
//!
//! [`BuilderError`] covers configuration construction, [`Error`] covers
//! flush-time failures. Every flush-time failure is fatal by policy: the
//! caller logs a diagnostic and aborts instead of retrying, since a failed
//! write mid-frame leaves no well-defined partial state to recover.

use crate::interface::PanelInterface;

/// Errors that can occur during a flush cycle.
///
/// Generic over the panel interface type to preserve the specific
/// hardware error for diagnostics.
#[derive(Debug)]
pub enum Error<P: PanelInterface> {
    /// The external panel driver reported a write failure.
    Panel(P::Error),
    /// The supplied pixel block is shorter than the dirty region.
    BufferTooSmall {
        /// Samples the region requires
        required: usize,
        /// Samples the block provides
        provided: usize,
    },
}

impl<P: PanelInterface> core::fmt::Display for Error<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Panel(_) => write!(f, "Panel write failed"),
            Error::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Pixel block too small: required {required} samples, provided {provided}"
                )
            }
        }
    }
}

impl<P: PanelInterface + core::fmt::Debug> core::error::Error for Error<P> {}

/// Errors that can occur when building configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Panel geometry was not specified.
    ///
    /// [`Builder::geometry()`](crate::config::Builder::geometry) must be
    /// called before building.
    MissingGeometry,
    /// Geometry outside the supported extents.
    ///
    /// See [`Geometry::new()`](crate::config::Geometry::new) for the
    /// constraints.
    InvalidGeometry {
        /// Logical width requested
        width: u32,
        /// Logical height requested
        height: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingGeometry => write!(f, "Panel geometry must be specified"),
            BuilderError::InvalidGeometry { width, height } => {
                write!(
                    f,
                    "Invalid geometry {width}x{height} (extents must be 1..={})",
                    crate::config::MAX_EXTENT
                )
            }
        }
    }
}

impl core::error::Error for BuilderError {}
