//! Network co-processor link
//!
//! Time, weather, and news come from a Wi-Fi modem on UART1 speaking the
//! framed protocol in `nimbus-protocol`. One request is outstanding at a
//! time; every request carries a fresh sequence number and replies with
//! any other number are leftovers from an abandoned exchange.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use nimbus_core::traits::{FetchError, Headlines, NetworkServices};
use nimbus_core::{TimeDocument, WeatherSummary};
use nimbus_protocol::frame::MAX_FRAME_SIZE;
use nimbus_protocol::{Frame, FrameParser, Reply, Request};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

pub struct ModemLink {
    tx: BufferedUartTx,
    rx: BufferedUartRx,
    parser: FrameParser,
    seq: u8,
    buf: [u8; RX_BUF_SIZE],
    /// Unparsed bytes are `buf[pos..len]`
    pos: usize,
    len: usize,
}

impl ModemLink {
    pub fn new(tx: BufferedUartTx, rx: BufferedUartRx) -> Self {
        Self {
            tx,
            rx,
            parser: FrameParser::new(),
            seq: 0,
            buf: [0; RX_BUF_SIZE],
            pos: 0,
            len: 0,
        }
    }

    /// Start a new exchange
    async fn send(&mut self, request: &Request) -> Result<(), FetchError> {
        self.seq = self.seq.wrapping_add(1);
        let frame = request.to_frame(self.seq).map_err(|e| {
            warn!("Failed to encode request: {:?}", e);
            FetchError::Link
        })?;

        let mut out = [0u8; MAX_FRAME_SIZE];
        let n = frame.encode(&mut out).map_err(|_| FetchError::Link)?;
        trace!("TX: {} bytes, seq {}", n, self.seq);
        self.tx.write_all(&out[..n]).await.map_err(|e| {
            warn!("UART write error: {:?}", e);
            FetchError::Link
        })
    }

    async fn next_byte(&mut self) -> Result<u8, FetchError> {
        while self.pos == self.len {
            match self.rx.read(&mut self.buf).await {
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                }
                Err(e) => {
                    warn!("UART read error: {:?}", e);
                    return Err(FetchError::Link);
                }
            }
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    async fn next_frame(&mut self) -> Result<Frame, FetchError> {
        loop {
            let byte = self.next_byte().await?;
            match self.parser.feed(byte) {
                Ok(Some(frame)) => return Ok(frame),
                Ok(None) => {}
                Err(e) => warn!("Frame parse error: {:?}", e),
            }
        }
    }

    /// Wait for the next reply belonging to the current exchange
    async fn receive(&mut self) -> Result<Reply, FetchError> {
        loop {
            let frame = self.next_frame().await?;
            if frame.seq != self.seq {
                debug!("Dropping stale reply (seq {} != {})", frame.seq, self.seq);
                continue;
            }
            return match Reply::from_frame(&frame) {
                Ok(Reply::Failure(reason)) => Err(reason.into()),
                Ok(reply) => Ok(reply),
                Err(e) => {
                    warn!("Failed to parse reply: {:?}", e);
                    Err(FetchError::Malformed)
                }
            };
        }
    }
}

impl NetworkServices for ModemLink {
    async fn fetch_time(&mut self) -> Result<TimeDocument, FetchError> {
        self.send(&Request::Time).await?;
        match self.receive().await? {
            Reply::Time(doc) => Ok(doc),
            _ => Err(FetchError::Malformed),
        }
    }

    async fn fetch_weather(&mut self, location: &str) -> Result<WeatherSummary, FetchError> {
        let location = nimbus_protocol::documents::truncated(location);
        self.send(&Request::Weather(location)).await?;
        match self.receive().await? {
            Reply::Weather(summary) => Ok(summary),
            _ => Err(FetchError::Malformed),
        }
    }

    async fn fetch_news(&mut self, headlines: &mut Headlines) -> Result<(), FetchError> {
        self.send(&Request::News).await?;
        loop {
            match self.receive().await? {
                Reply::Headline(headline) => {
                    // Anything past the display limit is dropped
                    let _ = headlines.push(headline);
                }
                Reply::NewsEnd { count } => {
                    debug!("News: {} of {} headlines kept", headlines.len(), count);
                    return Ok(());
                }
                _ => return Err(FetchError::Malformed),
            }
        }
    }
}
