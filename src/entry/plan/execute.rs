use tracing::{error, info};

use crate::catalog::RequestCatalog;
use crate::dispatch::{DispatchEngine, UnitReport};
use crate::error::{AppError, AppResult, DispatchError};
use crate::events::EventSink;
use crate::http::Requester;

use super::types::RunPlan;

pub(in crate::entry) async fn execute_plan(plan: RunPlan, events: EventSink) -> AppResult<()> {
    if let Some(desc) = plan.desc.as_deref() {
        info!("{}", desc);
    }

    let requester = Requester::new(plan.overrides, plan.proxy.as_deref(), events.clone())?;
    let catalog = RequestCatalog::load(&plan.sources, &events)?;
    let engine = DispatchEngine::new(requester, events);
    let reports = engine.run(&plan.entries, &catalog).await?;

    check_reports(&reports)
}

fn check_reports(reports: &[UnitReport]) -> AppResult<()> {
    let failures: Vec<&UnitReport> = reports.iter().filter(|report| !report.is_success()).collect();
    for report in &failures {
        if let Some(failure) = report.failure.as_ref() {
            error!(
                "Unit {} of entry {} stopped after {} sends: {}",
                report.unit,
                report.entry,
                report.outcomes.len(),
                failure
            );
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::dispatch(DispatchError::UnitsFailed {
            failed: failures.len(),
            total: reports.len(),
        }))
    }
}
