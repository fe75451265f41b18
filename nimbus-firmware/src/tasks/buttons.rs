//! Button edge tasks
//!
//! One task per button (active-low with internal pull-up). Raw press and
//! release edges are time-stamped and handed to the controller, which
//! does its own debouncing and short/long classification.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use nimbus_core::controller::Message;
use nimbus_core::input::{Button, ButtonEvent};

use crate::channels::CONTROL_CHANNEL;

#[embassy_executor::task(pool_size = 5)]
pub async fn button_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started: {:?}", button);

    loop {
        pin.wait_for_falling_edge().await;
        send(ButtonEvent::press(button, Instant::now().as_millis()));

        pin.wait_for_rising_edge().await;
        send(ButtonEvent::release(button, Instant::now().as_millis()));
    }
}

fn send(event: ButtonEvent) {
    trace!("Edge: {:?}", event);
    // Never block an edge waiter; a lost edge costs one press at most
    if CONTROL_CHANNEL.try_send(Message::Button(event)).is_err() {
        warn!("Control channel full, dropping {:?}", event);
    }
}
