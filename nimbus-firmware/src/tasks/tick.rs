//! Tick task for the main loop cadence
//!
//! Wakes the controller once at boot and then every wake interval for:
//! - Alarm evaluation
//! - Refresh scheduling
//! - Screen redraw and heartbeat

use defmt::*;
use embassy_time::{Duration, Ticker};

use nimbus_core::controller::Message;

use crate::channels::CONTROL_CHANNEL;

#[embassy_executor::task]
pub async fn tick_task(interval_ms: u64) {
    info!("Tick task started ({}ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms));

    loop {
        CONTROL_CHANNEL.send(Message::Tick).await;
        ticker.next().await;
    }
}
