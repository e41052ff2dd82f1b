//! Demo scene standing in for the UI runtime.
//!
//! Produces the same traffic a widget runtime would: an initial paint
//! split into draw-buffer-sized slabs, then small dirty rectangles as a
//! marker sweeps across the screen, timed off the frame clock.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use lumina_pipeline::{Region, Rgb565Frame};

use crate::{DRAW_BUF_LINES, LCD_H_RES, LCD_V_RES};

const BOX_W: u32 = 48;
const BOX_H: u32 = 40;
const BOX_Y: i32 = 200;
/// One full sweep and back, in milliseconds.
const SWEEP_PERIOD_MS: u32 = 4000;

const BACKGROUND: Rgb565 = Rgb565::new(4, 10, 12);
const MARKER: Rgb565 = Rgb565::WHITE;

/// Marker position for a point in time: a triangle wave across the track.
fn marker_x(now_ms: u32) -> i32 {
    let track = LCD_H_RES - BOX_W;
    let phase = now_ms % SWEEP_PERIOD_MS;
    let half = SWEEP_PERIOD_MS / 2;
    let pos = if phase < half {
        phase * track / half
    } else {
        (SWEEP_PERIOD_MS - phase) * track / half
    };
    pos as i32
}

pub struct Scene {
    painted_rows: u32,
    marker_x: i32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            painted_rows: 0,
            marker_x: 0,
        }
    }

    /// Next region that needs repainting, or `None` when nothing changed.
    ///
    /// The initial paint is reported slab by slab so each region fits one
    /// partial-render buffer; afterwards only the marker's old and new
    /// positions are invalidated.
    pub fn next_dirty(&mut self, now_ms: u32) -> Option<Region> {
        if self.painted_rows < LCD_V_RES {
            let y1 = self.painted_rows as i32;
            let rows = DRAW_BUF_LINES.min(LCD_V_RES - self.painted_rows);
            self.painted_rows += rows;
            return Some(Region::new(0, y1, LCD_H_RES as i32 - 1, y1 + rows as i32 - 1));
        }

        let x = marker_x(now_ms);
        if x == self.marker_x {
            return None;
        }
        let old = self.marker_x;
        self.marker_x = x;
        Some(Region::new(
            old.min(x),
            BOX_Y,
            old.max(x) + BOX_W as i32 - 1,
            BOX_Y + BOX_H as i32 - 1,
        ))
    }

    /// Render `region` into a region-sized pixel block.
    pub fn render(&self, region: Region, pixels: &mut [u16]) {
        let mut frame = Rgb565Frame::new(pixels, region.width(), region.height());
        // Scene coordinates are absolute; shift them into the block.
        let mut canvas = frame.translated(Point::new(-region.x1, -region.y1));

        Rectangle::from(region)
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(&mut canvas)
            .ok();
        Rectangle::new(
            Point::new(self.marker_x, BOX_Y),
            Size::new(BOX_W, BOX_H),
        )
        .into_styled(PrimitiveStyle::with_fill(MARKER))
        .draw(&mut canvas)
        .ok();
    }
}
