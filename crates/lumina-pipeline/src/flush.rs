//! Flush cycle orchestration.
//!
//! Ties the quantizer, normalizer, and remapper together: the rendering
//! runtime reports a dirty region and its pixel block, the driver runs it
//! through the pipeline, forwards it to the panel, and signals completion
//! exactly once before returning control to the main loop.

use crate::config::{Config, Orientation};
use crate::error::Error;
use crate::format;
use crate::interface::PanelInterface;
use crate::region::Region;
use crate::remap::ScanlineRemapper;

/// Where the driver is inside a flush cycle.
///
/// One cycle runs Idle -> Quantizing -> Normalizing -> Remapping ->
/// Transmitting -> Idle. There is no error state: every failure is
/// surfaced as a fatal [`Error`] for the caller to log and abort on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlushState {
    #[default]
    Idle,
    Quantizing,
    Normalizing,
    Remapping,
    Transmitting,
}

/// Drives dirty regions from the rendering runtime out to the panel.
///
/// Holds the external panel driver by explicit handle, injected at
/// construction. The rendering runtime talks to the driver through the
/// named operations [`on_quantize`](FlushDriver::on_quantize) and
/// [`on_dirty_region`](FlushDriver::on_dirty_region).
pub struct FlushDriver<P: PanelInterface> {
    panel: P,
    config: Config,
    remapper: ScanlineRemapper,
    state: FlushState,
    completed_cycles: u32,
}

impl<P: PanelInterface> FlushDriver<P> {
    pub fn new(panel: P, config: Config) -> Self {
        log::info!(
            "flush driver: {}x{} logical, {:?}, {} draw lines",
            config.geometry.logical_width,
            config.geometry.logical_height,
            config.orientation,
            config.draw_buf_lines
        );
        Self {
            panel,
            config,
            remapper: ScanlineRemapper::new(config.geometry.logical_width),
            state: FlushState::Idle,
            completed_cycles: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> FlushState {
        self.state
    }

    /// Flush cycles completed since startup (diagnostics).
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Adjust a dirty rectangle before the rendering runtime finalizes it.
    ///
    /// Repairs inverted bounds, snaps to the hardware alignment unit, and
    /// clamps the overshoot at the panel extents.
    pub fn on_quantize(&self, region: Region) -> Region {
        region.normalized().quantized().clamped(
            self.config.geometry.logical_width,
            self.config.geometry.logical_height,
        )
    }

    /// Run one full flush cycle for a rendered region.
    ///
    /// `pixels` is the region's pixel block in logical row-major order; it
    /// is byte-swapped in place to the wire format, re-tiled when the
    /// mount is rotated, and handed to the panel driver (one write per
    /// band in the rotated case). Completion is signaled exactly once,
    /// synchronously, before this returns.
    ///
    /// # Errors
    ///
    /// [`Error::BufferTooSmall`] if the block is shorter than the region,
    /// [`Error::Panel`] if the panel driver rejects a write. Both are
    /// fatal by policy; the driver makes no retry attempt.
    pub fn on_dirty_region(
        &mut self,
        region: Region,
        pixels: &mut [u16],
    ) -> Result<(), Error<P>> {
        self.state = FlushState::Quantizing;
        // The runtime already saw on_quantize; re-run the defensive clamp
        // so a malformed rectangle cannot write out of bounds on a
        // transposed axis.
        let region = self.on_quantize(region);
        let required = region.pixel_count();
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }

        self.state = FlushState::Normalizing;
        format::swap_bytes(&mut pixels[..required]);

        match self.config.orientation {
            Orientation::Identity => {
                self.state = FlushState::Transmitting;
                self.remapper
                    .write_direct(&mut self.panel, region, pixels)?;
            }
            Orientation::Rotate90 => {
                self.state = FlushState::Remapping;
                self.remapper.write_rotated(
                    &mut self.panel,
                    region,
                    pixels,
                    self.config.geometry.logical_height,
                )?;
            }
        }

        self.flush_ready(region);
        Ok(())
    }

    /// Signal flush completion back to the rendering runtime.
    fn flush_ready(&mut self, region: Region) {
        self.state = FlushState::Idle;
        self.completed_cycles = self.completed_cycles.wrapping_add(1);
        log::trace!(
            "flush cycle {} complete: ({},{})..({},{})",
            self.completed_cycles,
            region.x1,
            region.y1,
            region.x2,
            region.y2
        );
    }
}
