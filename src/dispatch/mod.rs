//! Fans test plan entries out into concurrent replay units.
mod plan;
mod unit;


use std::sync::Arc;

use crate::catalog::RequestCatalog;
use crate::error::DispatchError;
use crate::events::{EventSink, ReplayEvent};
use crate::http::Requester;
use crate::request::RequestModel;

pub use plan::{TestPlanEntry, split_request_keys};
pub use unit::UnitReport;

use unit::{UnitPlan, run_unit};

/// Drives every plan entry against a shared, read-only catalog.
#[derive(Debug)]
pub struct DispatchEngine {
    requester: Arc<Requester>,
    events: EventSink,
}

impl DispatchEngine {
    #[must_use]
    pub fn new(requester: Requester, events: EventSink) -> Self {
        Self {
            requester: Arc::new(requester),
            events,
        }
    }

    /// Replays `entries` and returns one report per concurrent unit, ordered
    /// by entry and then by unit.
    ///
    /// Every key of every entry is resolved before anything is sent. All
    /// units of all entries then run interleaved, and the call returns only
    /// after each of them has finished. A unit that fails does not cancel its
    /// siblings; its error is kept in its report.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownRequestKey`] when an entry names a key
    /// the catalog does not hold. No unit is started in that case.
    pub async fn run(
        &self,
        entries: &[TestPlanEntry],
        catalog: &RequestCatalog,
    ) -> Result<Vec<UnitReport>, DispatchError> {
        let resolved = entries
            .iter()
            .map(|entry| {
                catalog
                    .resolve(entry.request_keys.as_slice())
                    .map(Arc::<[Arc<RequestModel>]>::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_units = entries
            .iter()
            .fold(0usize, |total, entry| total.saturating_add(entry.concurrency));
        let mut handles = Vec::with_capacity(total_units);
        for (entry_index, (entry, models)) in entries.iter().zip(resolved).enumerate() {
            for unit_index in 0..entry.concurrency {
                let plan = UnitPlan {
                    entry_index,
                    unit_index,
                    entry: entry.clone(),
                    models: Arc::clone(&models),
                };
                let handle = tokio::spawn(run_unit(Arc::clone(&self.requester), plan));
                handles.push((entry_index, unit_index, handle));
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (entry_index, unit_index, handle) in handles {
            let report = match handle.await {
                Ok(report) => report,
                Err(err) => UnitReport::aborted(
                    entry_index,
                    unit_index,
                    DispatchError::UnitAborted {
                        entry: entry_index,
                        unit: unit_index,
                        source: err,
                    },
                ),
            };
            reports.push(report);
        }

        self.events.emit(ReplayEvent::RunCompleted {
            definitions: catalog.len(),
        });
        Ok(reports)
    }
}
