//! CO5300 panel adapter over `esp_lcd`.
//!
//! Thin wrapper around the vendor panel driver: bring-up happens once at
//! startup (QSPI bus, panel io, reset/init/gap/on), after which the
//! pipeline only sees [`PanelInterface::write_bitmap`] backed by
//! `esp_lcd_panel_draw_bitmap`.

use esp_idf_svc::sys::{self, esp, EspError};
use lumina_pipeline::PanelInterface;

use crate::{DRAW_BUF_LINES, LCD_H_RES};

const LCD_HOST: sys::spi_host_device_t = sys::spi_host_device_t_SPI2_HOST;
const PIN_CS: i32 = 9;
const PIN_CLK: i32 = 10;
const PIN_D0: i32 = 11;
const PIN_D1: i32 = 12;
const PIN_D2: i32 = 13;
const PIN_D3: i32 = 14;
const PIN_RST: i32 = 21;
const LCD_BPP: u32 = 16;
const PCLK_HZ: u32 = 40_000_000;

/// Horizontal blanking offset of the module's glass, in native pixels.
const GAP_X: i32 = 20;
const GAP_Y: i32 = 0;

// Vendor component (esp_lcd_co5300), linked in by the IDF build.
extern "C" {
    fn esp_lcd_new_panel_co5300(
        io: sys::esp_lcd_panel_io_handle_t,
        panel_dev_config: *const sys::esp_lcd_panel_dev_config_t,
        ret_panel: *mut sys::esp_lcd_panel_handle_t,
    ) -> sys::esp_err_t;
}

/// Handle to the initialized CO5300 panel.
pub struct EspLcdPanel {
    handle: sys::esp_lcd_panel_handle_t,
}

impl EspLcdPanel {
    /// Bring up the QSPI bus and the panel. Called once at startup.
    pub fn init() -> Result<Self, EspError> {
        let mut bus_cfg = sys::spi_bus_config_t::default();
        bus_cfg.sclk_io_num = PIN_CLK;
        bus_cfg.__bindgen_anon_1.data0_io_num = PIN_D0;
        bus_cfg.__bindgen_anon_2.data1_io_num = PIN_D1;
        bus_cfg.__bindgen_anon_3.data2_io_num = PIN_D2;
        bus_cfg.__bindgen_anon_4.data3_io_num = PIN_D3;
        bus_cfg.max_transfer_sz = (LCD_H_RES * DRAW_BUF_LINES * 2) as i32;
        bus_cfg.flags = sys::SPICOMMON_BUSFLAG_MASTER | sys::SPICOMMON_BUSFLAG_QUAD;
        esp!(unsafe {
            sys::spi_bus_initialize(LCD_HOST, &bus_cfg, sys::spi_common_dma_t_SPI_DMA_CH_AUTO)
        })?;

        let mut io_cfg = sys::esp_lcd_panel_io_spi_config_t::default();
        io_cfg.cs_gpio_num = PIN_CS;
        io_cfg.dc_gpio_num = -1;
        io_cfg.spi_mode = 0;
        io_cfg.pclk_hz = PCLK_HZ;
        io_cfg.trans_queue_depth = 10;
        io_cfg.lcd_cmd_bits = 32;
        io_cfg.lcd_param_bits = 8;
        io_cfg.flags.set_quad_mode(1);

        let mut io_handle: sys::esp_lcd_panel_io_handle_t = core::ptr::null_mut();
        esp!(unsafe {
            sys::esp_lcd_new_panel_io_spi(
                LCD_HOST as sys::esp_lcd_spi_bus_handle_t,
                &io_cfg,
                &mut io_handle,
            )
        })?;

        let mut panel_cfg = sys::esp_lcd_panel_dev_config_t::default();
        panel_cfg.reset_gpio_num = PIN_RST;
        panel_cfg.__bindgen_anon_1.rgb_ele_order =
            sys::lcd_rgb_element_order_t_LCD_RGB_ELEMENT_ORDER_RGB;
        panel_cfg.bits_per_pixel = LCD_BPP;

        let mut handle: sys::esp_lcd_panel_handle_t = core::ptr::null_mut();
        esp!(unsafe { esp_lcd_new_panel_co5300(io_handle, &panel_cfg, &mut handle) })?;

        esp!(unsafe { sys::esp_lcd_panel_reset(handle) })?;
        esp!(unsafe { sys::esp_lcd_panel_init(handle) })?;
        esp!(unsafe { sys::esp_lcd_panel_set_gap(handle, GAP_X, GAP_Y) })?;
        esp!(unsafe { sys::esp_lcd_panel_disp_on_off(handle, true) })?;

        log::info!("CO5300 panel up (gap {GAP_X},{GAP_Y})");
        Ok(Self { handle })
    }
}

impl PanelInterface for EspLcdPanel {
    type Error = EspError;

    fn write_bitmap(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        esp!(unsafe {
            sys::esp_lcd_panel_draw_bitmap(
                self.handle,
                x_start,
                y_start,
                x_end,
                y_end,
                pixels.as_ptr().cast(),
            )
        })
    }
}
