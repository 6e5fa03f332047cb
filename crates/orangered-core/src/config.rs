//! Stream configuration: poll intervals, page sizes, channel capacities.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default poll interval for comment and inbox streams.
const DEFAULT_COMMENT_INTERVAL: Duration = Duration::from_secs(10);

/// Default poll interval for submission streams.
const DEFAULT_SUBMISSION_INTERVAL: Duration = Duration::from_secs(10);

/// Default page size for `submissions_after` calls.
const DEFAULT_SUBMISSION_PAGE_SIZE: u32 = 25;

/// Output channel buffer per stream instance. A full buffer backpressures
/// the poll loop; it never drops or reorders items.
const DEFAULT_CHANNEL_CAPACITY: usize = 25;

/// Error channel buffer per stream instance. Errors are pushed without
/// blocking; overflow drops the oldest-unread reports, never stalls polling.
const DEFAULT_ERROR_CAPACITY: usize = 16;

/// Knobs for stream instances. One value is shared by all streams started
/// from the same engine; individual instances never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Sleep between iterations of comment and inbox loops.
    #[serde(with = "duration_secs")]
    pub comment_interval: Duration,
    /// Sleep between iterations of submission loops.
    #[serde(with = "duration_secs")]
    pub submission_interval: Duration,
    /// Page size for submission `*_after` listings.
    pub submission_page_size: u32,
    /// Capacity of each stream's output channel.
    pub channel_capacity: usize,
    /// Capacity of each stream's error channel.
    pub error_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            comment_interval: DEFAULT_COMMENT_INTERVAL,
            submission_interval: DEFAULT_SUBMISSION_INTERVAL,
            submission_page_size: DEFAULT_SUBMISSION_PAGE_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            error_capacity: DEFAULT_ERROR_CAPACITY,
        }
    }
}

impl StreamConfig {
    pub fn with_comment_interval(mut self, interval: Duration) -> Self {
        self.comment_interval = interval;
        self
    }

    pub fn with_submission_interval(mut self, interval: Duration) -> Self {
        self.submission_interval = interval;
        self
    }

    pub fn with_submission_page_size(mut self, page_size: u32) -> Self {
        self.submission_page_size = page_size;
        self
    }
}

/// Intervals (de)serialize as whole seconds, the granularity the platform's
/// poll cadence is configured in.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        interval.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
