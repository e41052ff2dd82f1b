//! Double-buffered partial-render hand-off.
//!
//! Two pixel buffers alternate between the rendering runtime (being
//! written) and the flush path (being transmitted). Ownership moves on
//! flush-start and flush-complete boundaries only; the two sides never
//! hold the same buffer at the same instant, and the borrow checker
//! enforces that here instead of any runtime lock.

/// Coordinator over two alternating pixel buffers.
///
/// Generic over the storage so the firmware can supply DMA-capable
/// allocations while tests use plain `Vec<u16>`. Buffers are allocated
/// once at startup and live for the process lifetime; the coordinator
/// only ever hands out borrows.
pub struct BufferPair<B> {
    buffers: [B; 2],
    render_idx: usize,
}

impl<B> BufferPair<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    pub fn new(first: B, second: B) -> Self {
        Self {
            buffers: [first, second],
            render_idx: 0,
        }
    }

    /// Exclusive write access to the buffer the renderer owns this cycle.
    pub fn render_target(&mut self) -> &mut [u16] {
        self.buffers[self.render_idx].as_mut()
    }

    /// Read access to the buffer the flush path owns this cycle.
    pub fn transmit_source(&self) -> &[u16] {
        self.buffers[1 - self.render_idx].as_ref()
    }

    /// Both sides at once: `(transmit, render)`.
    ///
    /// Lets the renderer prepare the next region while the previous
    /// frame's remaining regions are still being transmitted.
    pub fn split(&mut self) -> (&[u16], &mut [u16]) {
        let [first, second] = &mut self.buffers;
        if self.render_idx == 0 {
            ((*second).as_ref(), first.as_mut())
        } else {
            ((*first).as_ref(), second.as_mut())
        }
    }

    /// Swap roles at a full refresh-cycle boundary (not per region).
    pub fn advance_cycle(&mut self) {
        self.render_idx = 1 - self.render_idx;
    }

    /// Index of the buffer currently owned by the renderer (diagnostics).
    pub fn render_index(&self) -> usize {
        self.render_idx
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn render_and_transmit_never_alias() {
        let mut pair = BufferPair::new(vec![0u16; 64], vec![0u16; 64]);

        for _ in 0..5 {
            let render_ptr = pair.render_target().as_ptr();
            let transmit_ptr = pair.transmit_source().as_ptr();
            assert_ne!(render_ptr, transmit_ptr);

            let (transmit, render) = pair.split();
            assert_ne!(transmit.as_ptr(), render.as_ptr());

            pair.advance_cycle();
        }
    }

    #[test]
    fn advance_cycle_alternates_buffers() {
        let mut pair = BufferPair::new(vec![0u16; 8], vec![0u16; 8]);
        let first = pair.render_target().as_ptr();
        pair.advance_cycle();
        let second = pair.render_target().as_ptr();
        assert_ne!(first, second);
        pair.advance_cycle();
        assert_eq!(pair.render_target().as_ptr(), first);
    }

    #[test]
    fn renderer_writes_survive_the_other_buffer_being_flushed() {
        let mut pair = BufferPair::new(vec![0u16; 4], vec![0u16; 4]);
        pair.render_target().fill(0xAAAA);
        pair.advance_cycle();
        pair.render_target().fill(0x5555);

        let (transmit, render) = pair.split();
        assert!(transmit.iter().all(|&px| px == 0xAAAA));
        assert!(render.iter().all(|&px| px == 0x5555));
    }
}
