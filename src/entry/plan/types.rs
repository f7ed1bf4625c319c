use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::dispatch::TestPlanEntry;
use crate::request::Headers;

/// Everything a run needs once the CLI and config files have been read.
pub(in crate::entry) struct RunPlan {
    pub(super) desc: Option<String>,
    pub(super) sources: BTreeMap<String, PathBuf>,
    pub(super) entries: Vec<TestPlanEntry>,
    pub(super) overrides: Headers,
    pub(super) proxy: Option<String>,
}
