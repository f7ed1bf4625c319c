use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::{TestPlanEntry, split_request_keys};
use crate::error::ConfigError;

/// Top-level run configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Free-form description, logged when the run starts.
    #[serde(default)]
    pub desc: Option<String>,
    /// Catalog key -> definition file.
    pub r_files: BTreeMap<String, PathBuf>,
    pub r_config: Vec<PlanConfig>,
}

impl ConfigFile {
    /// Validates every `r_config` entry and converts it into a plan entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, naming the entry index.
    pub fn plan_entries(&self) -> Result<Vec<TestPlanEntry>, ConfigError> {
        self.r_config
            .iter()
            .enumerate()
            .map(|(index, plan)| plan.to_entry(index))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Comma-delimited catalog keys.
    pub http_details: String,
    /// Concurrent units.
    #[serde(default = "default_one")]
    pub thread: usize,
    /// Passes per unit.
    #[serde(default = "default_one")]
    pub count: usize,
    /// Stagger between list items, in seconds.
    #[serde(default)]
    pub inner_interval: f64,
}

const fn default_one() -> usize {
    1
}

impl PlanConfig {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a key is empty, `thread` or `count` is
    /// zero, or `inner_interval` is not a finite number.
    pub fn to_entry(&self, index: usize) -> Result<TestPlanEntry, ConfigError> {
        let request_keys = split_request_keys(&self.http_details);
        if self.http_details.trim().is_empty() {
            return Err(ConfigError::EmptyRequestKeys { index });
        }
        if request_keys.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyRequestKey {
                index,
                value: self.http_details.clone(),
            });
        }
        if self.thread == 0 {
            return Err(ConfigError::FieldMustBePositive {
                index,
                field: "thread",
            });
        }
        if self.count == 0 {
            return Err(ConfigError::FieldMustBePositive {
                index,
                field: "count",
            });
        }

        Ok(TestPlanEntry::new(
            request_keys,
            self.thread,
            self.count,
            interval_from_secs(index, self.inner_interval)?,
        ))
    }
}

// Negative intervals behave as no stagger.
fn interval_from_secs(index: usize, value: f64) -> Result<Duration, ConfigError> {
    if value.is_sign_negative() && value.is_finite() {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(value).map_err(|_err| ConfigError::InvalidInterval { index, value })
}
