//! Dirty-region arithmetic and hardware alignment.
//!
//! Regions use inclusive bounds in logical pixel coordinates, matching the
//! invalidation rectangles the rendering runtime reports.

/// Update granularity of the panel's write window, in pixels.
///
/// The panel rejects (or visibly mangles) windows that are not aligned to
/// this unit on every edge, so dirty rectangles are snapped outward to it
/// before rendering is finalized.
pub const ALIGN_PX: i32 = 8;

/// Inclusive rectangle in logical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width in pixels. Zero for inverted bounds.
    pub fn width(self) -> u32 {
        (self.x2 - self.x1 + 1).max(0) as u32
    }

    /// Height in pixels. Zero for inverted bounds.
    pub fn height(self) -> u32 {
        (self.y2 - self.y1 + 1).max(0) as u32
    }

    pub fn pixel_count(self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Repair inverted bounds by swapping them.
    ///
    /// The rendering runtime is trusted to hand over well-formed rectangles,
    /// but an inverted rectangle on a transposed axis would turn into an
    /// out-of-bounds write, so this is checked rather than assumed.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Snap to the hardware alignment unit: origin rounded down, far edge
    /// rounded up to the next multiple of [`ALIGN_PX`] minus one.
    ///
    /// Always succeeds and never shrinks the region. The far edge can
    /// overshoot the panel by up to `ALIGN_PX - 1` pixels; callers clamp it
    /// with [`Region::clamped`] before a bitmap write.
    pub fn quantized(self) -> Self {
        const MASK: i32 = !(ALIGN_PX - 1);
        Self {
            x1: self.x1 & MASK,
            y1: self.y1 & MASK,
            x2: (self.x2 & MASK) + (ALIGN_PX - 1),
            y2: (self.y2 & MASK) + (ALIGN_PX - 1),
        }
    }

    /// Clamp to the addressable extents of a `width` x `height` frame.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        Self {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(width as i32 - 1),
            y2: self.y2.min(height as i32 - 1),
        }
    }

    pub fn contains(self, other: Self) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use embedded_graphics_core::geometry::{Point, Size};
    use embedded_graphics_core::primitives::Rectangle;

    use super::Region;

    impl From<Rectangle> for Region {
        fn from(rect: Rectangle) -> Self {
            Region {
                x1: rect.top_left.x,
                y1: rect.top_left.y,
                x2: rect.top_left.x + rect.size.width.max(1) as i32 - 1,
                y2: rect.top_left.y + rect.size.height.max(1) as i32 - 1,
            }
        }
    }

    impl From<Region> for Rectangle {
        fn from(region: Region) -> Self {
            Rectangle::new(
                Point::new(region.x1, region.y1),
                Size::new(region.width(), region.height()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_aligns_all_edges() {
        let r = Region::new(10, 3, 50, 9).quantized();
        assert_eq!(r, Region::new(8, 0, 55, 15));
        assert_eq!(r.x1 % 8, 0);
        assert_eq!(r.y1 % 8, 0);
        assert_eq!(r.x2 % 8, 7);
        assert_eq!(r.y2 % 8, 7);
    }

    #[test]
    fn quantize_contains_input() {
        for (x1, y1, x2, y2) in [(0, 0, 0, 0), (1, 1, 6, 6), (7, 15, 8, 16), (120, 33, 279, 455)] {
            let r = Region::new(x1, y1, x2, y2);
            let q = r.quantized();
            assert!(q.contains(r), "{r:?} not contained in {q:?}");
        }
    }

    #[test]
    fn quantize_is_idempotent() {
        let r = Region::new(10, 3, 50, 9).quantized();
        assert_eq!(r, r.quantized());
    }

    #[test]
    fn normalized_swaps_inverted_bounds() {
        let r = Region::new(50, 9, 10, 3).normalized();
        assert_eq!(r, Region::new(10, 3, 50, 9));
        assert_eq!(r, r.normalized());
    }

    #[test]
    fn clamp_cuts_overshoot_at_panel_extent() {
        // 280x456 frame: quantization of a far-edge region overshoots by 7
        let q = Region::new(272, 448, 279, 455).quantized();
        assert_eq!(q.x2, 279);
        assert_eq!(q.y2, 455);

        let q = Region::new(274, 450, 278, 454).quantized();
        assert_eq!(q, Region::new(272, 448, 279, 455));

        let overshoot = Region::new(250, 440, 279, 455).quantized();
        assert_eq!(overshoot.x2, 279);
        let clamped = Region::new(248, 440, 287, 463).clamped(280, 456);
        assert_eq!(clamped, Region::new(248, 440, 279, 455));
    }

    #[test]
    fn pixel_count_is_inclusive() {
        assert_eq!(Region::new(8, 0, 55, 15).pixel_count(), 48 * 16);
        assert_eq!(Region::new(3, 3, 3, 3).pixel_count(), 1);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn rectangle_round_trip() {
        use embedded_graphics_core::geometry::{Point, Size};
        use embedded_graphics_core::primitives::Rectangle;

        let rect = Rectangle::new(Point::new(10, 3), Size::new(41, 7));
        let region = Region::from(rect);
        assert_eq!(region, Region::new(10, 3, 50, 9));
        assert_eq!(Rectangle::from(region), rect);
    }
}
