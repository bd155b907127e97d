//! Caller-facing planning entry points.
//!
//! The engine itself never fails and never blocks. This layer validates the
//! request, turns validation failures, panics, and deadline expiry into a
//! fallback [`DailySchedule`], and never retries.

use chrono::{Local, NaiveDate};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::request::ScheduleRequest;
use crate::schedule::DailySchedule;
use crate::scheduler::build_schedule;

/// Validate `request` against `today` and build its schedule.
pub fn plan_for(request: &ScheduleRequest, today: NaiveDate) -> Result<DailySchedule> {
    let input = request.validate(today)?;
    Ok(build_schedule(&input))
}

/// Validate and build, using the local calendar date when none is given.
pub fn plan(request: &ScheduleRequest) -> Result<DailySchedule> {
    plan_for(request, Local::now().date_naive())
}

/// Like [`plan`], but any failure yields a fallback schedule.
pub fn plan_or_fallback(request: &ScheduleRequest) -> DailySchedule {
    plan_or_fallback_for(request, Local::now().date_naive())
}

/// Like [`plan_for`], but any failure yields a fallback schedule.
pub fn plan_or_fallback_for(request: &ScheduleRequest, today: NaiveDate) -> DailySchedule {
    match panic::catch_unwind(AssertUnwindSafe(|| plan_for(request, today))) {
        Ok(Ok(schedule)) => schedule,
        Ok(Err(err)) => fallback(request, today, &err),
        Err(payload) => {
            let err = CoreError::Custom(format!("internal fault: {}", panic_message(payload.as_ref())));
            fallback(request, today, &err)
        }
    }
}

/// Run [`plan_or_fallback`] on a blocking worker with a deadline.
///
/// On expiry the fallback schedule is returned; the worker is left to finish
/// on its own since the engine has no cancellation points.
pub async fn plan_with_timeout(request: ScheduleRequest, limit: Duration) -> DailySchedule {
    let today = Local::now().date_naive();
    let date = request.date_or(today);
    let time_zone = request.time_zone().to_string();

    let worker = tokio::task::spawn_blocking(move || plan_or_fallback_for(&request, today));

    match tokio::time::timeout(limit, worker).await {
        Ok(Ok(schedule)) => schedule,
        Ok(Err(join_err)) => {
            warn!(error = %join_err, "planning worker failed");
            DailySchedule::fallback(date, time_zone, join_err.to_string())
        }
        Err(_) => {
            let err = CoreError::Timeout {
                millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            };
            warn!(error = %err, "planning deadline expired");
            DailySchedule::fallback(date, time_zone, err.to_string())
        }
    }
}

fn fallback(request: &ScheduleRequest, today: NaiveDate, err: &CoreError) -> DailySchedule {
    warn!(error = %err, "substituting fallback schedule");
    DailySchedule::fallback(request.date_or(today), request.time_zone(), err.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
