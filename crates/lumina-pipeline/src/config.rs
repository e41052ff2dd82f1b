//! Panel geometry and pipeline configuration.

pub use crate::error::BuilderError;

/// Largest logical extent the pipeline supports on either axis.
pub const MAX_EXTENT: u32 = 1024;

/// Default partial-render buffer height, in logical rows.
///
/// Sized so two RGB565 buffers of `width * DEFAULT_DRAW_BUF_LINES` samples
/// fit comfortably in DMA-capable memory on the target (a third of the
/// 456-row panel).
pub const DEFAULT_DRAW_BUF_LINES: u32 = 152;

/// Fixed panel geometry as the rendering runtime sees it.
///
/// Immutable for the process lifetime. The native addressing of the panel
/// may have its axes swapped relative to this; see [`Orientation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Logical width in pixels
    pub logical_width: u32,
    /// Logical height in pixels
    pub logical_height: u32,
}

impl Geometry {
    /// Create a geometry with validation.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidGeometry`] if either extent is zero
    /// or exceeds [`MAX_EXTENT`].
    pub fn new(logical_width: u32, logical_height: u32) -> Result<Self, BuilderError> {
        if logical_width == 0
            || logical_width > MAX_EXTENT
            || logical_height == 0
            || logical_height > MAX_EXTENT
        {
            return Err(BuilderError::InvalidGeometry {
                width: logical_width,
                height: logical_height,
            });
        }
        Ok(Self {
            logical_width,
            logical_height,
        })
    }
}

/// Relationship between the logical orientation and the panel's native
/// scan order, selected once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Logical and native addressing agree; regions are forwarded as-is.
    #[default]
    Identity,
    /// The panel is mounted a quarter turn from the logical orientation;
    /// regions are re-tiled through the scratch buffer on the way out.
    Rotate90,
}

/// Pipeline configuration. Use [`Builder`] to create one.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Panel geometry in logical orientation
    pub geometry: Geometry,
    /// Mount orientation
    pub orientation: Orientation,
    /// Partial-render buffer height in logical rows
    pub draw_buf_lines: u32,
}

impl Config {
    /// Panel dimensions as the native addressing sees them.
    pub fn native_dimensions(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Identity => (self.geometry.logical_width, self.geometry.logical_height),
            Orientation::Rotate90 => (self.geometry.logical_height, self.geometry.logical_width),
        }
    }

    /// Length of one partial-render pixel buffer, in RGB565 samples.
    pub fn buffer_len(&self) -> usize {
        self.geometry.logical_width as usize * self.draw_buf_lines as usize
    }
}

/// Builder for pipeline configuration.
///
/// # Example
///
/// ```
/// use lumina_pipeline::{Builder, Geometry, Orientation};
///
/// let config = Builder::new()
///     .geometry(Geometry::new(280, 456).unwrap())
///     .orientation(Orientation::Rotate90)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.native_dimensions(), (456, 280));
/// ```
#[derive(Default)]
pub struct Builder {
    geometry: Option<Geometry>,
    orientation: Orientation,
    draw_buf_lines: Option<u32>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel geometry (required).
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set mount orientation. Defaults to [`Orientation::Identity`].
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the partial-render buffer height in logical rows.
    /// Defaults to [`DEFAULT_DRAW_BUF_LINES`].
    pub fn draw_buf_lines(mut self, lines: u32) -> Self {
        self.draw_buf_lines = Some(lines);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingGeometry`] if geometry was not set.
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            geometry: self.geometry.ok_or(BuilderError::MissingGeometry)?,
            orientation: self.orientation,
            draw_buf_lines: self.draw_buf_lines.unwrap_or(DEFAULT_DRAW_BUF_LINES),
        })
    }
}
