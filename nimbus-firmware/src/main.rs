//! Nimbus - Desk Clock Firmware
//!
//! Main firmware binary for an RP2040 desk clock with an RGB character
//! LCD, a climate sensor, five buttons, and a network co-processor that
//! supplies time, weather, and news.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nimbus_core::controller::Station;
use nimbus_core::input::Button;
use nimbus_drivers::display::Rgb1602;
use nimbus_drivers::indicator::LedIndicator;
use nimbus_drivers::sensor::Hts221;

use crate::modem::ModemLink;
use crate::tasks::ConsoleInput;

mod board;
mod channels;
mod config;
mod modem;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static CONSOLE_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static MODEM_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static MODEM_RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nimbus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let wake_interval_ms = config.wake_interval_ms;
    let fetch_timeout_ms = config.fetch_timeout_ms;

    // LCD and sensor sit on separate buses
    let lcd_i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let mut display = Rgb1602::new(lcd_i2c, Delay);
    match display.init() {
        Ok(()) => info!("LCD initialized"),
        // Keep running; every redraw retries the bus and records the fault
        Err(e) => warn!("LCD init failed: {:?}", e),
    }

    let sensor_i2c = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, I2cConfig::default());
    let sensor = Hts221::new(sensor_i2c);

    let led = LedIndicator::new_active_high(Output::new(p.PIN_25, Level::Low));

    // Console on UART0 (115200 baud default)
    let console_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let console_uart = console_uart.into_buffered(
        Irqs,
        CONSOLE_TX_BUF.init([0u8; 16]),
        CONSOLE_RX_BUF.init([0u8; 64]),
    );
    let (console_tx, console_rx) = console_uart.split();

    // Modem on UART1
    let modem_uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, UartConfig::default());
    let modem_uart = modem_uart.into_buffered(
        Irqs,
        MODEM_TX_BUF.init([0u8; 256]),
        MODEM_RX_BUF.init([0u8; 512]),
    );
    let (modem_tx, modem_rx) = modem_uart.split();
    let link = ModemLink::new(modem_tx, modem_rx);
    info!("UARTs initialized");

    let station = Station::new(config, display, sensor, ConsoleInput, led);

    spawner.spawn(tasks::controller_task(station)).unwrap();
    spawner.spawn(tasks::fetch_task(link, fetch_timeout_ms)).unwrap();
    spawner.spawn(tasks::console_task(console_tx, console_rx)).unwrap();

    let buttons = [
        (Input::new(p.PIN_10, Pull::Up), Button::Hour),
        (Input::new(p.PIN_11, Pull::Up), Button::Minute),
        (Input::new(p.PIN_12, Pull::Up), Button::AlarmToggle),
        (Input::new(p.PIN_13, Pull::Up), Button::Snooze),
        (Input::new(p.PIN_14, Pull::Up), Button::Mute),
    ];
    for (pin, button) in buttons {
        spawner.spawn(tasks::button_task(pin, button)).unwrap();
    }

    // Start ticking last so the first tick finds every task running
    spawner.spawn(tasks::tick_task(wake_interval_ms)).unwrap();

    info!("All tasks spawned");
}
