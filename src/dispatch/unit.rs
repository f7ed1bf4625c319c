use std::sync::Arc;

use futures_util::future::join_all;

use crate::error::DispatchError;
use crate::http::{Requester, SendOutcome};
use crate::request::RequestModel;

use super::plan::TestPlanEntry;

/// What one concurrent unit did before it finished or stopped.
#[derive(Debug)]
pub struct UnitReport {
    /// Index of the plan entry that spawned the unit.
    pub entry: usize,
    /// Index of the unit within its entry.
    pub unit: usize,
    /// Successful sends in issue order.
    pub outcomes: Vec<SendOutcome>,
    /// First error that stopped the unit.
    pub failure: Option<DispatchError>,
}

impl UnitReport {
    const fn new(entry: usize, unit: usize) -> Self {
        Self {
            entry,
            unit,
            outcomes: Vec::new(),
            failure: None,
        }
    }

    pub(super) const fn aborted(entry: usize, unit: usize, failure: DispatchError) -> Self {
        Self {
            entry,
            unit,
            outcomes: Vec::new(),
            failure: Some(failure),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

pub(super) struct UnitPlan {
    pub(super) entry_index: usize,
    pub(super) unit_index: usize,
    pub(super) entry: TestPlanEntry,
    pub(super) models: Arc<[Arc<RequestModel>]>,
}

/// Runs every pass of one unit over its own transport session.
///
/// Sends of a pass are in flight together, each after its staggered delay,
/// and the next pass starts only once all of them have answered. A failed
/// send stops the unit after the current pass.
pub(super) async fn run_unit(requester: Arc<Requester>, plan: UnitPlan) -> UnitReport {
    let mut report = UnitReport::new(plan.entry_index, plan.unit_index);
    let session = match requester.open_session() {
        Ok(session) => session,
        Err(err) => {
            report.failure = Some(err);
            return report;
        }
    };
    report.outcomes.reserve(plan.models.len());

    for _ in 0..plan.entry.repeat_count {
        let sends = plan.models.iter().enumerate().map(|(position, model)| {
            requester.send(&session, model, plan.entry.send_delay(position))
        });
        for result in join_all(sends).await {
            match result {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(err) => {
                    report.failure.get_or_insert(err);
                }
            }
        }
        if report.failure.is_some() {
            break;
        }
    }

    drop(session);
    report
}
