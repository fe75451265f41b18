//! Main controller task
//!
//! Owns the station and handles every message from the control channel in
//! arrival order. Fetch requests go to the worker; everything else is
//! logged here.

use defmt::*;
use embassy_time::Instant;

use crate::board::ClockStation;
use crate::channels::{CONTROL_CHANNEL, FETCH_CHANNEL};

#[embassy_executor::task]
pub async fn controller_task(mut station: ClockStation) {
    info!("Controller task started");

    loop {
        let message = CONTROL_CHANNEL.receive().await;
        let now_ms = Instant::now().as_millis();

        let step = station.handle(message, now_ms);

        if let Some(action) = step.action {
            info!("Action: {:?}", action);
        }
        if let Some(event) = step.alarm {
            info!("Alarm: {:?}", event);
        }
        if let Some(diag) = step.heartbeat {
            debug!(
                "Heartbeat: up {}s, {:?}, alarm {:?}, fault {:?}",
                diag.uptime_s, diag.screen, diag.alarm, diag.last_fault
            );
        }

        for request in step.requests {
            // The controller reissues after its in-flight window expires
            if FETCH_CHANNEL.try_send(request).is_err() {
                warn!("Fetch channel full, dropping request");
            }
        }
    }
}
