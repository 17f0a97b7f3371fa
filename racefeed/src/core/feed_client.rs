use crate::core::snapshot::{RaceMetadata, RaceSnapshot};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const RACE_INFO_PATH: &str = "/api/race/info";
pub const FEED_PATH: &str = "/api/feed";
pub const RESET_PATH: &str = "/api/reset";

/// HTTP status code the feed endpoint uses to signal the end of the race.
pub const RACE_FINISHED_STATUS: u16 = 410;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("race finished (HTTP {})", RACE_FINISHED_STATUS)]
    RaceFinished,
    #[error("backend responded with HTTP status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for FeedError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(RACE_FINISHED_STATUS, _) => FeedError::RaceFinished,
            ureq::Error::Status(code, _) => FeedError::Status(code),
            ureq::Error::Transport(transport) => FeedError::Transport(transport.to_string()),
        }
    }
}

/// RaceFeed is the race simulation backend as seen by the polling controller.
pub trait RaceFeed {
    /// fetch_race_info returns the reference data of the session.
    fn fetch_race_info(&self) -> Result<RaceMetadata, FeedError>;

    /// fetch_snapshot returns the next snapshot or FeedError::RaceFinished after the last lap.
    fn fetch_snapshot(&self) -> Result<RaceSnapshot, FeedError>;

    /// reset rewinds the backend to the first lap.
    fn reset(&self) -> Result<(), FeedError>;
}

/// HttpFeed talks to the backend via blocking HTTP requests. No timeouts are configured apart
/// from the transport defaults.
#[derive(Debug)]
pub struct HttpFeed {
    agent: ureq::Agent,
    backend_url: String,
}

impl HttpFeed {
    pub fn new(backend_url: &str) -> HttpFeed {
        HttpFeed {
            agent: ureq::AgentBuilder::new().build(),
            backend_url: backend_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);

        let resp = self.agent.get(&url).call()?;
        check_status(resp.status())?;

        let body = resp
            .into_string()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))
    }
}

/// check_status treats every non-2xx status that ureq did not already turn into an error
/// (e.g. an unfollowed redirect) as a failure.
fn check_status(status: u16) -> Result<(), FeedError> {
    match status {
        200..=299 => Ok(()),
        RACE_FINISHED_STATUS => Err(FeedError::RaceFinished),
        _ => Err(FeedError::Status(status)),
    }
}

impl RaceFeed for HttpFeed {
    fn fetch_race_info(&self) -> Result<RaceMetadata, FeedError> {
        self.get_json(RACE_INFO_PATH)
    }

    fn fetch_snapshot(&self) -> Result<RaceSnapshot, FeedError> {
        self.get_json(FEED_PATH)
    }

    fn reset(&self) -> Result<(), FeedError> {
        let url = self.endpoint(RESET_PATH);
        tracing::debug!("POST {}", url);

        let resp = self.agent.post(&url).call()?;
        check_status(resp.status())
    }
}
