//! DMA-capable pixel buffer allocation.

use core::slice;

use esp_idf_svc::sys;

/// Alignment required by the SPI DMA engine, in bytes.
pub const DMA_ALIGN: usize = 64;

/// Fixed-size RGB565 buffer in DMA-capable internal memory.
///
/// Allocated once at startup via `heap_caps_aligned_alloc` and freed on
/// drop (which in practice never happens; the buffers live for the
/// process lifetime).
pub struct DmaBuffer {
    ptr: *mut u16,
    len: usize,
}

impl DmaBuffer {
    /// Allocate `len` samples of zeroed, DMA-capable memory.
    ///
    /// Returns `None` on allocation failure; there is no degraded mode
    /// without DMA memory, so callers treat that as fatal.
    pub fn new(len: usize) -> Option<Self> {
        let bytes = len * core::mem::size_of::<u16>();
        let ptr = unsafe {
            sys::heap_caps_aligned_alloc(DMA_ALIGN, bytes, sys::MALLOC_CAP_DMA) as *mut u16
        };
        if ptr.is_null() {
            return None;
        }
        unsafe { ptr.write_bytes(0, len) };
        Some(Self { ptr, len })
    }
}

impl AsRef<[u16]> for DmaBuffer {
    fn as_ref(&self) -> &[u16] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl AsMut<[u16]> for DmaBuffer {
    fn as_mut(&mut self) -> &mut [u16] {
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl Drop for DmaBuffer {
    fn drop(&mut self) {
        unsafe { sys::heap_caps_free(self.ptr.cast()) };
    }
}

// The buffer is a plain owned allocation; nothing in it is tied to the
// creating thread.
unsafe impl Send for DmaBuffer {}
