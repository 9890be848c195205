//! panelmux - LCD channel multiplexer firmware
//!
//! Main firmware binary for an RP2040 board driving a serial 16x2 LCD
//! panel with three buttons. Producers each own a virtual channel; the
//! display loop shows one channel at a time and lets alerts take over.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use panelmux_core::config::{parse_config, PanelConfig};

/// Embedded panel configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

mod channels;
mod mux;
mod panel;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("panelmux firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    mux::init(&config.banner);
    info!("Multiplexer ready, banner on channel 0");

    // Panel link on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.uart_baud;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.uart_baud);

    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let temp_sensor = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    // Spawn tasks
    spawner.spawn(tasks::panel_rx_task(rx)).unwrap();
    spawner.spawn(tasks::panel_tx_task(tx)).unwrap();
    spawner.spawn(tasks::blink_task(config.timing.dwell_ms)).unwrap();
    spawner.spawn(tasks::display_loop_task(config.timing)).unwrap();
    spawner.spawn(tasks::uptime_task()).unwrap();
    spawner
        .spawn(tasks::chip_temp_task(adc, temp_sensor, config.temp_alert_c))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// build.rs has already validated panel.toml, so a failure here means the
/// two validators disagree. Fall back to the defaults rather than halt.
fn load_config() -> PanelConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: cycle {}ms, hold {}ms, dwell {}ms",
                config.timing.cycle_ms, config.timing.hold_ms, config.timing.dwell_ms
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            PanelConfig::default()
        }
    }
}
