//! Fetch worker
//!
//! Runs network requests one at a time so slow lookups never stall the
//! controller loop. Each request is bounded by the configured timeout; a
//! request that runs out of time is reported as a transient failure.

use defmt::*;
use embassy_time::{with_timeout, Duration};

use nimbus_core::controller::Message;
use nimbus_core::traits::{serve, FetchError, FetchOutcome};

use crate::channels::{CONTROL_CHANNEL, FETCH_CHANNEL};
use crate::modem::ModemLink;

#[embassy_executor::task]
pub async fn fetch_task(mut link: ModemLink, timeout_ms: u64) {
    info!("Fetch task started");

    let timeout = Duration::from_millis(timeout_ms);

    loop {
        let request = FETCH_CHANNEL.receive().await;
        let kind = request.kind();
        debug!("Fetching {:?}", kind);

        let outcome = match with_timeout(timeout, serve(&mut link, &request)).await {
            Ok(outcome) => outcome,
            Err(_) => FetchOutcome::failed(&request, FetchError::Timeout),
        };

        match outcome.error() {
            Some(e) => warn!("Fetch {:?} failed: {:?}", kind, e),
            None => info!("Fetch {:?} ok", kind),
        }

        CONTROL_CHANNEL.send(Message::Fetched(outcome)).await;
    }
}
