//! Panel driver seam.
//!
//! The pipeline never talks to hardware directly; it issues write-window
//! commands through [`PanelInterface`]. The firmware implements this over
//! `esp_lcd_panel_draw_bitmap`, tests implement it with a recording mock.
//! Electrical bring-up (reset, init sequence, display-on) belongs to the
//! implementor and happens once at startup, before the pipeline runs.

use core::fmt::Debug;

/// Write access to the physical panel in its native scan order.
pub trait PanelInterface {
    /// Error type for panel operations.
    ///
    /// Must implement [`Debug`] for error reporting. A failed write leaves
    /// no well-defined partial frame, so the pipeline propagates it as
    /// fatal rather than retrying.
    type Error: Debug;

    /// Write a rectangular block of RGB565 samples.
    ///
    /// `x_end` and `y_end` are exclusive. `pixels` must hold exactly
    /// `(x_end - x_start) * (y_end - y_start)` samples, already in the wire
    /// byte order, laid out in the panel's native scan order for that
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transfer fails.
    fn write_bitmap(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        pixels: &[u16],
    ) -> Result<(), Self::Error>;
}
