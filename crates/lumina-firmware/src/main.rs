//! Lumina firmware: drives the CO5300 AMOLED panel through the flush
//! pipeline on an ESP32-S3.
//!
//! Single-threaded cooperative loop: the scene reports the next dirty
//! region (if any), the flush driver processes and forwards it, and
//! completion is signaled synchronously before the loop continues. The
//! only concurrent context is the 2 ms tick timer, which touches nothing
//! but the frame clock's counter.

mod dma;
mod panel;
mod scene;

use std::sync::Arc;
use std::time::Duration;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::timer::EspTaskTimerService;
use lumina_pipeline::{
    Builder, BufferPair, FlushDriver, FrameClock, Geometry, Orientation, TICK_INTERVAL_MS,
};

use dma::DmaBuffer;
use panel::EspLcdPanel;
use scene::Scene;

pub(crate) const LCD_H_RES: u32 = 280;
pub(crate) const LCD_V_RES: u32 = 456;
pub(crate) const DRAW_BUF_LINES: u32 = 152;

/// How this board's glass is mounted relative to the logical orientation.
const ORIENTATION: Orientation = Orientation::Identity;

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let panel = EspLcdPanel::init().expect("panel bring-up failed");

    let config = Builder::new()
        .geometry(Geometry::new(LCD_H_RES, LCD_V_RES).expect("panel geometry"))
        .orientation(ORIENTATION)
        .draw_buf_lines(DRAW_BUF_LINES)
        .build()
        .expect("pipeline configuration");

    let buf_len = config.buffer_len();
    log::info!("draw buffers: 2 x {} bytes", buf_len * 2);
    let (first, second) = match (DmaBuffer::new(buf_len), DmaBuffer::new(buf_len)) {
        (Some(first), Some(second)) => (first, second),
        _ => {
            // No safe degraded mode without DMA memory.
            log::error!("DMA draw buffer allocation failed ({buf_len} samples each)");
            panic!("out of DMA-capable memory");
        }
    };
    let mut buffers = BufferPair::new(first, second);
    let mut driver = FlushDriver::new(panel, config);

    let clock = Arc::new(FrameClock::new());
    let timer_service = EspTaskTimerService::new().expect("timer service");
    let tick_clock = clock.clone();
    let tick_timer = timer_service
        .timer(move || tick_clock.tick())
        .expect("tick timer");
    tick_timer
        .every(Duration::from_millis(TICK_INTERVAL_MS as u64))
        .expect("tick timer start");

    let mut scene = Scene::new();
    loop {
        if let Some(dirty) = scene.next_dirty(clock.now()) {
            let region = driver.on_quantize(dirty);
            let block = &mut buffers.render_target()[..region.pixel_count()];
            scene.render(region, block);
            if let Err(err) = driver.on_dirty_region(region, block) {
                log::error!("flush failed, cannot continue: {err}");
                panic!("panel write failure");
            }
            buffers.advance_cycle();
        }
        FreeRtos::delay_ms(16);
    }
}
