//! Schedule source trait.

use crate::error::SourceError;
use crate::schedule::ScheduleMode;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can return one schedule section for an airport.
///
/// The production implementation calls the flight API over HTTP; tests plug
/// in scripted sources.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the `mode` section for `airport_code`.
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded JSON body
    /// * `Err(SourceError::Transport | SourceError::Status)` - The call did not produce a body
    /// * `Err(SourceError::MalformedBody)` - A body arrived but was not JSON
    async fn fetch(&self, airport_code: &str, mode: ScheduleMode) -> Result<Value, SourceError>;
}
