//! RGB565 wire-format helpers.

/// Swap the two bytes of every 16-bit sample in place.
///
/// The renderer composes RGB565 in host byte order; the panel's serial
/// interface expects the opposite endianness, so each sample is permuted
/// once on the way out. Self-inverse, O(n), no allocation.
pub fn swap_bytes(pixels: &mut [u16]) {
    for px in pixels.iter_mut() {
        *px = px.swap_bytes();
    }
}

#[cfg(feature = "graphics")]
pub use self::graphics::Rgb565Frame;

#[cfg(feature = "graphics")]
mod graphics {
    use core::convert::Infallible;

    use embedded_graphics_core::draw_target::DrawTarget;
    use embedded_graphics_core::geometry::{OriginDimensions, Size};
    use embedded_graphics_core::pixelcolor::{IntoStorage, Rgb565};
    use embedded_graphics_core::Pixel;

    /// `DrawTarget` view over a raw RGB565 sample slice.
    ///
    /// Lets scenes be composed with embedded-graphics directly into a
    /// region-sized pixel block before it enters the flush pipeline.
    /// Out-of-bounds pixels are dropped rather than panicking, so scenes
    /// that draw a background and then overdraw on top work unchanged.
    pub struct Rgb565Frame<'a> {
        pixels: &'a mut [u16],
        width: u32,
        height: u32,
    }

    impl<'a> Rgb565Frame<'a> {
        /// Wrap `pixels` as a `width` x `height` frame.
        ///
        /// The slice must hold at least `width * height` samples; pixels
        /// beyond the frame are ignored.
        pub fn new(pixels: &'a mut [u16], width: u32, height: u32) -> Self {
            debug_assert!(pixels.len() >= (width * height) as usize);
            Self {
                pixels,
                width,
                height,
            }
        }
    }

    impl DrawTarget for Rgb565Frame<'_> {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(coord, color) in pixels {
                if coord.x >= 0
                    && coord.y >= 0
                    && (coord.x as u32) < self.width
                    && (coord.y as u32) < self.height
                {
                    let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                    if let Some(px) = self.pixels.get_mut(idx) {
                        *px = color.into_storage();
                    }
                }
            }
            Ok(())
        }
    }

    impl OriginDimensions for Rgb565Frame<'_> {
        fn size(&self) -> Size {
            Size::new(self.width, self.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_bytes_is_self_inverse() {
        let original: alloc::vec::Vec<u16> = (0..64u16).map(|i| i.wrapping_mul(0x1357)).collect();
        let mut buf = original.clone();
        swap_bytes(&mut buf);
        assert_ne!(buf, original);
        swap_bytes(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn swap_bytes_permutes_each_sample() {
        let mut buf = [0x1234u16, 0xABCD];
        swap_bytes(&mut buf);
        assert_eq!(buf, [0x3412, 0xCDAB]);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn frame_writes_row_major_samples() {
        use embedded_graphics_core::draw_target::DrawTarget;
        use embedded_graphics_core::geometry::Point;
        use embedded_graphics_core::pixelcolor::{IntoStorage, Rgb565, RgbColor};
        use embedded_graphics_core::Pixel;

        let mut buf = [0u16; 12];
        let mut frame = Rgb565Frame::new(&mut buf, 4, 3);
        frame
            .draw_iter([
                Pixel(Point::new(1, 2), Rgb565::RED),
                Pixel(Point::new(4, 0), Rgb565::GREEN), // out of bounds, dropped
                Pixel(Point::new(-1, 0), Rgb565::GREEN), // out of bounds, dropped
            ])
            .unwrap();
        assert_eq!(buf[2 * 4 + 1], Rgb565::RED.into_storage());
        assert_eq!(buf.iter().filter(|&&px| px != 0).count(), 1);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn frame_supports_embedded_graphics_primitives() {
        use embedded_graphics::pixelcolor::Rgb565;
        use embedded_graphics::prelude::*;
        use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

        let mut buf = [0u16; 64];
        let mut frame = Rgb565Frame::new(&mut buf, 8, 8);
        Rectangle::new(Point::new(2, 2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut frame)
            .unwrap();

        let lit = buf
            .iter()
            .filter(|&&px| px == Rgb565::WHITE.into_storage())
            .count();
        assert_eq!(lit, 16);
    }
}
