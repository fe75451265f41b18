//! Concrete peripheral types for the Pico wiring
//!
//! | Function         | Pins              |
//! |------------------|-------------------|
//! | Console UART0    | GP0 TX, GP1 RX    |
//! | LCD on I2C0      | GP4 SDA, GP5 SCL  |
//! | HTS221 on I2C1   | GP6 SDA, GP7 SCL  |
//! | Modem UART1      | GP8 TX, GP9 RX    |
//! | Buttons (to GND) | GP10..GP14        |
//! | Heartbeat LED    | GP25 (on board)   |

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, I2C1};
use embassy_time::Delay;

use nimbus_core::controller::Station;
use nimbus_drivers::display::Rgb1602;
use nimbus_drivers::indicator::LedIndicator;
use nimbus_drivers::sensor::Hts221;

use crate::tasks::ConsoleInput;

pub type Display = Rgb1602<I2c<'static, I2C0, Blocking>, Delay>;
pub type Sensor = Hts221<I2c<'static, I2C1, Blocking>>;
pub type StatusLed = LedIndicator<Output<'static>>;

pub type ClockStation = Station<Display, Sensor, ConsoleInput, StatusLed>;
