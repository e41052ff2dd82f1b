//! Scanline remapping between logical orientation and native scan order.
//!
//! The rotated path re-tiles a dirty region through a bounded scratch
//! buffer instead of a full-frame intermediate: the region is processed in
//! horizontal bands of up to [`BAND_ROWS`] logical rows, each band is
//! transposed into the scratch tile and pushed out as one native write
//! window. A full-frame transpose of the 280x456 panel would need 255 KiB;
//! the scratch tile caps the footprint at `logical_width * BAND_ROWS`
//! samples regardless of region size.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::interface::PanelInterface;
use crate::region::Region;

/// Band height of the rotated path, in logical rows.
///
/// One native write window per band is `native_height * BAND_ROWS * 2`
/// bytes at most, which fits the DMA transfer budget with room to spare.
/// Matches the 8-pixel window alignment, so aligned regions split into
/// whole bands except possibly the last.
pub const BAND_ROWS: usize = 8;

/// Reorders rendered pixel blocks into the panel's native addressing.
///
/// Owns the scratch tile exclusively; it is allocated once at construction
/// and reused per invocation, never retained across flushes in any
/// stateful way.
pub struct ScanlineRemapper {
    scratch: Vec<u16>,
    logical_width: usize,
}

impl ScanlineRemapper {
    /// Allocate a remapper for a panel `logical_width` pixels wide.
    pub fn new(logical_width: u32) -> Self {
        Self {
            scratch: vec![0; logical_width as usize * BAND_ROWS],
            logical_width: logical_width as usize,
        }
    }

    /// Forward a block unchanged (identity orientation).
    ///
    /// Issues a single write at the region's own coordinates, far edges
    /// exclusive.
    pub fn write_direct<P: PanelInterface>(
        &self,
        panel: &mut P,
        region: Region,
        pixels: &[u16],
    ) -> Result<(), Error<P>> {
        let required = region.pixel_count();
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }
        panel
            .write_bitmap(
                region.x1,
                region.y1,
                region.x2 + 1,
                region.y2 + 1,
                &pixels[..required],
            )
            .map_err(Error::Panel)
    }

    /// Re-tile a block for a panel mounted a quarter turn from the logical
    /// orientation, writing one native window per band.
    ///
    /// Logical pixel `(x, y)` lands at native `(logical_height - 1 - y, x)`:
    /// logical rows become native columns (reversed), logical columns
    /// become native rows. The band covering logical rows
    /// `[region.y1 + n, region.y1 + n + rows)` therefore maps to native
    /// columns `[native_offset - rows, native_offset)` where
    /// `native_offset = logical_height - region.y1 - n`, and spans the
    /// region's columns along the native row axis. A short final band is
    /// handled without reading past the block.
    ///
    /// Returns the number of bands written.
    pub fn write_rotated<P: PanelInterface>(
        &mut self,
        panel: &mut P,
        region: Region,
        pixels: &[u16],
        logical_height: u32,
    ) -> Result<usize, Error<P>> {
        let region_w = region.width() as usize;
        let region_h = region.height() as usize;
        let required = region_w * region_h;
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }
        debug_assert!(region_w <= self.logical_width);

        let mut bands = 0;
        let mut n = 0;
        while n < region_h {
            let rows = BAND_ROWS.min(region_h - n);

            // Transpose the band: logical (x, n+y) -> scratch column-major
            // tile in native scan order, rows reversed within the band.
            for x in 0..region_w {
                for y in 0..rows {
                    self.scratch[x * rows + (rows - 1 - y)] = pixels[(n + y) * region_w + x];
                }
            }

            let native_offset = logical_height as i32 - region.y1 - n as i32;
            panel
                .write_bitmap(
                    native_offset - rows as i32,
                    region.x1,
                    native_offset,
                    region.x2 + 1,
                    &self.scratch[..region_w * rows],
                )
                .map_err(Error::Panel)?;

            bands += 1;
            n += rows;
        }
        log::trace!(
            "remapped {}x{} region at ({},{}) in {} bands",
            region_w,
            region_h,
            region.x1,
            region.y1,
            bands
        );
        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingPanel;

    const W: u32 = 16;
    const H: u32 = 24;

    /// Synthetic frame where each sample encodes its logical (x, y).
    fn synthetic_frame(region: Region) -> Vec<u16> {
        let mut pixels = Vec::with_capacity(region.pixel_count());
        for y in region.y1..=region.y2 {
            for x in region.x1..=region.x2 {
                pixels.push((y as u16) << 8 | x as u16);
            }
        }
        pixels
    }

    /// Invert the geometric transform on recorded band writes and rebuild
    /// the logical frame.
    fn reconstruct(panel: &RecordingPanel, logical_height: u32) -> alloc::collections::BTreeMap<(i32, i32), u16> {
        let mut frame = alloc::collections::BTreeMap::new();
        for write in &panel.writes {
            let cols = (write.x_end - write.x_start) as usize;
            for j in 0..(write.y_end - write.y_start) as usize {
                for i in 0..cols {
                    let native_x = write.x_start + i as i32;
                    let logical_x = write.y_start + j as i32;
                    let logical_y = logical_height as i32 - 1 - native_x;
                    let prev = frame.insert((logical_x, logical_y), write.pixels[j * cols + i]);
                    assert!(prev.is_none(), "pixel written twice");
                }
            }
        }
        frame
    }

    #[test]
    fn rotated_round_trip_full_frame() {
        let region = Region::new(0, 0, W as i32 - 1, H as i32 - 1);
        let pixels = synthetic_frame(region);

        let mut panel = RecordingPanel::new();
        let mut remapper = ScanlineRemapper::new(W);
        let bands = remapper
            .write_rotated(&mut panel, region, &pixels, H)
            .unwrap();
        assert_eq!(bands, 3); // 24 rows / 8

        let frame = reconstruct(&panel, H);
        assert_eq!(frame.len(), (W * H) as usize);
        for ((x, y), px) in frame {
            assert_eq!(px, (y as u16) << 8 | x as u16, "mismatch at ({x},{y})");
        }
    }

    #[test]
    fn rotated_handles_short_final_band() {
        // 13 rows: one full band plus a 5-row tail
        let region = Region::new(4, 6, 11, 18);
        let pixels = synthetic_frame(region);

        let mut panel = RecordingPanel::new();
        let mut remapper = ScanlineRemapper::new(W);
        let bands = remapper
            .write_rotated(&mut panel, region, &pixels, H)
            .unwrap();
        assert_eq!(bands, 2);

        assert_eq!(panel.writes[0].x_end - panel.writes[0].x_start, 8);
        assert_eq!(panel.writes[1].x_end - panel.writes[1].x_start, 5);

        let frame = reconstruct(&panel, H);
        assert_eq!(frame.len(), region.pixel_count());
        for ((x, y), px) in frame {
            assert_eq!(px, (y as u16) << 8 | x as u16);
        }
    }

    #[test]
    fn rotated_band_windows_follow_native_offset() {
        // Aligned 48x16 region at (8, 0) on a 280x456 logical panel
        let region = Region::new(8, 0, 55, 15);
        let pixels = vec![0u16; region.pixel_count()];

        let mut panel = RecordingPanel::new();
        let mut remapper = ScanlineRemapper::new(280);
        let bands = remapper
            .write_rotated(&mut panel, region, &pixels, 456)
            .unwrap();
        assert_eq!(bands, 2);

        // Band n=0 covers native columns [448, 456), band n=8 [440, 448);
        // both span the region's columns along the native row axis.
        let windows: Vec<_> = panel
            .writes
            .iter()
            .map(|w| (w.x_start, w.y_start, w.x_end, w.y_end))
            .collect();
        assert_eq!(windows, vec![(448, 8, 456, 56), (440, 8, 448, 56)]);
    }

    #[test]
    fn direct_write_forwards_region_coordinates() {
        let region = Region::new(8, 0, 55, 15);
        let pixels = synthetic_frame(region);

        let mut panel = RecordingPanel::new();
        let remapper = ScanlineRemapper::new(280);
        remapper.write_direct(&mut panel, region, &pixels).unwrap();

        assert_eq!(panel.writes.len(), 1);
        let write = &panel.writes[0];
        assert_eq!(
            (write.x_start, write.y_start, write.x_end, write.y_end),
            (8, 0, 56, 16)
        );
        assert_eq!(write.pixels, pixels);
    }

    #[test]
    fn short_block_is_rejected_before_any_write() {
        let region = Region::new(0, 0, 15, 15);
        let pixels = vec![0u16; 100]; // needs 256

        let mut panel = RecordingPanel::new();
        let mut remapper = ScanlineRemapper::new(W);
        assert!(matches!(
            remapper.write_rotated(&mut panel, region, &pixels, H),
            Err(Error::BufferTooSmall {
                required: 256,
                provided: 100
            })
        ));
        assert!(matches!(
            remapper.write_direct(&mut panel, region, &pixels),
            Err(Error::BufferTooSmall { .. })
        ));
        assert!(panel.writes.is_empty());
    }
}
