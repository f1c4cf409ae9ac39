//! Periodic timer tick task.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

use crate::usecase::TimerTickUseCase;

/// Run [`TimerTickUseCase::run_once`] every `period` until the handle is aborted.
///
/// A tick that overruns the period is not followed by a burst of catch-up ticks.
pub fn spawn_ticker(usecase: Arc<TimerTickUseCase>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::debug!("Timer ticker started ({:?} period)", period);

        loop {
            interval.tick().await;
            match usecase.run_once().await {
                Ok(report) if report.ended > 0 || report.conflicts > 0 => {
                    tracing::debug!("Tick: {:?}", report);
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Timer tick failed: {:?}", e),
            }
        }
    })
}
