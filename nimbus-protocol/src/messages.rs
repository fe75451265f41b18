//! Message types for the modem link
//!
//! Message types are divided into two categories:
//! - Controller → Modem: lookup requests and link pings
//! - Modem → Controller: documents, failures, and ping responses
//!
//! A news request is answered with one `HEADLINE` frame per story followed by
//! a single `NEWS_END` frame carrying the story count.

use heapless::Vec;
use serde::{de::DeserializeOwned, Serialize};

use crate::documents::{Headline, Location, TimeDocument, WeatherSummary};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Controller → Modem
pub const MSG_PING: u8 = 0x01;
pub const MSG_REQ_TIME: u8 = 0x10;
pub const MSG_REQ_WEATHER: u8 = 0x11;
pub const MSG_REQ_NEWS: u8 = 0x12;

// Message type IDs: Modem → Controller
pub const MSG_PONG: u8 = 0x21;
pub const MSG_TIME_DOC: u8 = 0x30;
pub const MSG_WEATHER: u8 = 0x31;
pub const MSG_HEADLINE: u8 = 0x32;
pub const MSG_NEWS_END: u8 = 0x33;
pub const MSG_FAILURE: u8 = 0x3F;

/// Why the modem could not complete a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureReason {
    /// Wi-Fi down or connection refused
    Network,
    /// The service answered but did not know the location
    NotFound,
    /// The service answered with an error status
    Upstream,
    /// The response body could not be parsed
    Malformed,
}

impl FailureReason {
    pub fn to_byte(self) -> u8 {
        match self {
            FailureReason::Network => 1,
            FailureReason::NotFound => 2,
            FailureReason::Upstream => 3,
            FailureReason::Malformed => 4,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(FailureReason::Network),
            2 => Some(FailureReason::NotFound),
            3 => Some(FailureReason::Upstream),
            4 => Some(FailureReason::Malformed),
            _ => None,
        }
    }
}

/// Requests sent from the controller to the modem
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Link liveness check
    Ping,
    /// Current time for the modem's geolocated timezone
    Time,
    /// Current weather for a location query
    Weather(Location),
    /// Top headlines
    News,
}

impl Request {
    /// Encode this request into a frame
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            Request::Ping => Ok(Frame::empty(MSG_PING, seq)),
            Request::Time => Ok(Frame::empty(MSG_REQ_TIME, seq)),
            Request::Weather(location) => Frame::new(MSG_REQ_WEATHER, seq, location.as_bytes()),
            Request::News => Ok(Frame::empty(MSG_REQ_NEWS, seq)),
        }
    }

    /// Parse a request (modem side, and for link simulation in tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PING => Ok(Request::Ping),
            MSG_REQ_TIME => Ok(Request::Time),
            MSG_REQ_WEATHER => {
                let text =
                    core::str::from_utf8(&frame.payload).map_err(|_| FrameError::InvalidFrame)?;
                let mut location = Location::new();
                location
                    .push_str(text)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(Request::Weather(location))
            }
            MSG_REQ_NEWS => Ok(Request::News),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Replies sent from the modem to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    Pong,
    Time(TimeDocument),
    Weather(WeatherSummary),
    Headline(Headline),
    /// Terminates a headline burst
    NewsEnd { count: u8 },
    Failure(FailureReason),
}

impl Reply {
    /// Parse a reply from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PONG => Ok(Reply::Pong),
            MSG_TIME_DOC => decode(&frame.payload).map(Reply::Time),
            MSG_WEATHER => decode(&frame.payload).map(Reply::Weather),
            MSG_HEADLINE => decode(&frame.payload).map(Reply::Headline),
            MSG_NEWS_END => {
                let count = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(Reply::NewsEnd { count })
            }
            MSG_FAILURE => {
                let byte = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                FailureReason::from_byte(byte)
                    .map(Reply::Failure)
                    .ok_or(FrameError::InvalidFrame)
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this reply into a frame (modem side, and for tests)
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            Reply::Pong => Ok(Frame::empty(MSG_PONG, seq)),
            Reply::Time(doc) => encode(MSG_TIME_DOC, seq, doc),
            Reply::Weather(weather) => encode(MSG_WEATHER, seq, weather),
            Reply::Headline(headline) => encode(MSG_HEADLINE, seq, headline),
            Reply::NewsEnd { count } => Frame::new(MSG_NEWS_END, seq, &[*count]),
            Reply::Failure(reason) => Frame::new(MSG_FAILURE, seq, &[reason.to_byte()]),
        }
    }
}

fn encode<T: Serialize>(msg_type: u8, seq: u8, value: &T) -> Result<Frame, FrameError> {
    let mut buf = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(value, &mut buf).map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(Frame {
        msg_type,
        seq,
        payload: Vec::from_slice(used).map_err(|_| FrameError::PayloadTooLarge)?,
    })
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, FrameError> {
    postcard::from_bytes(payload).map_err(|_| FrameError::Encoding)
}
