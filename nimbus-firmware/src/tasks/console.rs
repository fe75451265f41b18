//! Serial console line reader
//!
//! Location queries are typed on UART0. Complete lines are posted to
//! `LOCATION_INPUT`, where the controller picks them up while the input
//! screen is shown.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use nimbus_core::traits::TextInput;
use nimbus_core::Location;

use crate::channels::LOCATION_INPUT;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// `TextInput` backed by the console task
pub struct ConsoleInput;

impl TextInput for ConsoleInput {
    fn poll_line(&mut self) -> Option<Location> {
        LOCATION_INPUT.try_take()
    }
}

#[embassy_executor::task]
pub async fn console_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx) {
    info!("Console task started");

    let mut line = Location::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Console read error: {:?}", e);
                continue;
            }
        };

        // Echo so the operator sees what they type
        if let Err(e) = tx.write_all(&buf[..n]).await {
            warn!("Console write error: {:?}", e);
        }

        for &byte in &buf[..n] {
            match byte {
                b'\r' | b'\n' => {
                    if !line.is_empty() {
                        debug!("Console line: {}", line.as_str());
                        LOCATION_INPUT.signal(line.clone());
                        line.clear();
                    }
                }
                BACKSPACE | DELETE => {
                    line.pop();
                }
                // Overlong input is cut; the controller validates the rest
                0x20..=0x7E => {
                    let _ = line.push(char::from(byte));
                }
                // Non-ASCII is rejected by location validation
                _ => {
                    let _ = line.push('?');
                }
            }
        }
    }
}
