//! Network services trait and the fetch request/outcome pair
//!
//! Fetches run in a worker outside the controller. The controller emits a
//! [`FetchRequest`], the worker calls [`serve`] under a timeout, and the
//! resulting [`FetchOutcome`] travels back as a message.

use heapless::Vec;
use nimbus_protocol::{FailureReason, Headline, Location, TimeDocument, WeatherSummary};

use crate::scheduler::FetchKind;

/// Most headlines kept from one news fetch
pub const MAX_HEADLINES: usize = 5;

pub type Headlines = Vec<Headline, MAX_HEADLINES>;

/// Why a fetch failed
///
/// Every variant is transient from the controller's point of view except
/// `NotFound` on a weather lookup, which means the location is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// No answer within the fetch timeout
    Timeout,
    /// Wi-Fi or connection failure
    Network,
    /// The service did not recognize the query
    NotFound,
    /// The service answered with an error
    Upstream,
    /// The answer could not be parsed
    Malformed,
    /// The link to the network co-processor failed
    Link,
}

impl From<FailureReason> for FetchError {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::Network => FetchError::Network,
            FailureReason::NotFound => FetchError::NotFound,
            FailureReason::Upstream => FetchError::Upstream,
            FailureReason::Malformed => FetchError::Malformed,
        }
    }
}

/// Work for the fetch worker
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchRequest {
    Time,
    Weather(Location),
    News,
}

impl FetchRequest {
    pub fn kind(&self) -> FetchKind {
        match self {
            FetchRequest::Time => FetchKind::Time,
            FetchRequest::Weather(_) => FetchKind::Weather,
            FetchRequest::News => FetchKind::News,
        }
    }
}

/// Result of one fetch, returned to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchOutcome {
    Time(Result<TimeDocument, FetchError>),
    /// Carries the location that was asked for, so an answer for a location
    /// the user has since replaced can be recognized and dropped
    Weather {
        location: Location,
        result: Result<WeatherSummary, FetchError>,
    },
    News(Result<Headlines, FetchError>),
}

impl FetchOutcome {
    /// A failed outcome for `request`, e.g. when the worker timed out
    pub fn failed(request: &FetchRequest, error: FetchError) -> Self {
        match request {
            FetchRequest::Time => FetchOutcome::Time(Err(error)),
            FetchRequest::Weather(location) => FetchOutcome::Weather {
                location: location.clone(),
                result: Err(error),
            },
            FetchRequest::News => FetchOutcome::News(Err(error)),
        }
    }

    pub fn kind(&self) -> FetchKind {
        match self {
            FetchOutcome::Time(_) => FetchKind::Time,
            FetchOutcome::Weather { .. } => FetchKind::Weather,
            FetchOutcome::News(_) => FetchKind::News,
        }
    }

    pub fn error(&self) -> Option<FetchError> {
        match self {
            FetchOutcome::Time(r) => r.as_ref().err().copied(),
            FetchOutcome::Weather { result, .. } => result.as_ref().err().copied(),
            FetchOutcome::News(r) => r.as_ref().err().copied(),
        }
    }
}

/// Remote lookups (time, weather, news)
///
/// Implementations may take as long as the network does; callers bound each
/// call with a timeout.
#[allow(async_fn_in_trait)]
pub trait NetworkServices {
    async fn fetch_time(&mut self) -> Result<TimeDocument, FetchError>;

    async fn fetch_weather(&mut self, location: &str) -> Result<WeatherSummary, FetchError>;

    /// Fill `headlines` with the current top stories
    async fn fetch_news(&mut self, headlines: &mut Headlines) -> Result<(), FetchError>;
}

/// Run one request against the network services
pub async fn serve<N: NetworkServices>(net: &mut N, request: &FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Time => FetchOutcome::Time(net.fetch_time().await),
        FetchRequest::Weather(location) => FetchOutcome::Weather {
            location: location.clone(),
            result: net.fetch_weather(location).await,
        },
        FetchRequest::News => {
            let mut headlines = Headlines::new();
            FetchOutcome::News(net.fetch_news(&mut headlines).await.map(|()| headlines))
        }
    }
}
