use std::time::Duration;

/// One line of the run plan: which definitions to replay, by how many
/// concurrent units, how many passes, and how far apart within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlanEntry {
    pub request_keys: Vec<String>,
    pub concurrency: usize,
    pub repeat_count: usize,
    pub inner_interval: Duration,
}

impl TestPlanEntry {
    #[must_use]
    pub const fn new(
        request_keys: Vec<String>,
        concurrency: usize,
        repeat_count: usize,
        inner_interval: Duration,
    ) -> Self {
        Self {
            request_keys,
            concurrency,
            repeat_count,
            inner_interval,
        }
    }

    /// Delay before sending the item at `position` within a pass.
    ///
    /// Grows linearly with the position and restarts at zero every pass.
    #[must_use]
    pub fn send_delay(&self, position: usize) -> Duration {
        let factor = u32::try_from(position).unwrap_or(u32::MAX);
        self.inner_interval.saturating_mul(factor)
    }

    /// Total sends one unit issues for this entry.
    #[must_use]
    pub fn sends_per_unit(&self) -> usize {
        self.request_keys.len().saturating_mul(self.repeat_count)
    }
}

/// Splits a comma-delimited key list, trimming each key and keeping order.
#[must_use]
pub fn split_request_keys(details: &str) -> Vec<String> {
    details
        .split(',')
        .map(|key| key.trim().to_owned())
        .collect()
}
