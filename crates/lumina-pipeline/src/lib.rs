//! Pixel pipeline for the Lumina AMOLED panel.
//!
//! Takes rendered RGB565 regions in the UI's logical orientation and turns
//! them into the write-window commands the panel expects, including the
//! 90-degree-rotated mount that needs re-tiling through a bounded scratch
//! buffer. Pure logic (no hardware) so it can be unit-tested without
//! flashing; the firmware crate wires it to `esp_lcd`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod buffers;
pub mod clock;
pub mod config;
pub mod error;
pub mod flush;
pub mod format;
pub mod interface;
pub mod region;
pub mod remap;

pub use buffers::BufferPair;
pub use clock::{FrameClock, TICK_INTERVAL_MS};
pub use config::{Builder, Config, Geometry, Orientation, DEFAULT_DRAW_BUF_LINES, MAX_EXTENT};
pub use error::{BuilderError, Error};
pub use flush::{FlushDriver, FlushState};
pub use format::swap_bytes;
#[cfg(feature = "graphics")]
pub use format::Rgb565Frame;
pub use interface::PanelInterface;
pub use region::{Region, ALIGN_PX};
pub use remap::{ScanlineRemapper, BAND_ROWS};
