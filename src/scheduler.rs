use crate::pipeline::Pipeline;
use anyhow::Result;
use chrono::{Local, Timelike};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

const HOUR: Duration = Duration::from_secs(3600);

/// Seconds until the next top of the hour.
pub fn secs_until_next_hour(now: chrono::DateTime<Local>) -> u64 {
    let elapsed = u64::from(now.minute()) * 60 + u64::from(now.second());
    3600 - elapsed.min(3599)
}

/// Run the pipeline once immediately, then on every top of the hour.
///
/// The interval ticks on the hour boundary without drifting; if a scan
/// overruns into the next slot the missed tick is skipped rather than
/// queued, so runs never overlap or burst. A failing run is logged and
/// the loop keeps going.
pub async fn run_autopilot(pipeline: Pipeline) -> Result<()> {
    info!("initial scan before entering the hourly schedule");
    run_once(&pipeline).await;

    let first_tick = Instant::now() + Duration::from_secs(secs_until_next_hour(Local::now()));
    let mut ticker = interval_at(first_tick, HOUR);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        run_once(&pipeline).await;
    }
}

async fn run_once(pipeline: &Pipeline) {
    let started = Local::now();
    info!("scheduled scan started at {}", started.format("%I:%M %p"));

    match pipeline.run().await {
        Ok(summary) => {
            info!(
                total_found = summary.total_found,
                published = summary.published,
                "scheduled scan finished"
            );
        }
        Err(e) => {
            error!("scheduled scan failed: {e:#}");
        }
    }
}
