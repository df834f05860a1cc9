//! Scheduled background jobs
//!
//! Two tasks: a non-blocking cache warm-up at startup, and a daily refresh
//! at 02:00 Singapore time. A failed run is logged and retried on the next
//! tick; neither task can terminate the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use tracing::{error, info};

use crate::pipeline::Refresher;

/// Daily refresh time, Singapore clock.
const REFRESH_TIME: (u32, u32) = (2, 0);

fn singapore() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("fixed UTC+8 offset")
}

/// Delay until the next 02:00 SGT after `now`.
fn delay_until_next_run(now: DateTime<Utc>) -> Duration {
    let local = now.with_timezone(&singapore());
    let run_time = NaiveTime::from_hms_opt(REFRESH_TIME.0, REFRESH_TIME.1, 0)
        .expect("valid refresh time");

    let mut next = local.date_naive().and_time(run_time);
    if next <= local.naive_local() {
        next += chrono::Duration::days(1);
    }

    let next = singapore()
        .from_local_datetime(&next)
        .single()
        .expect("fixed offset has no DST gaps");

    (next - local)
        .to_std()
        .unwrap_or(Duration::from_secs(60))
}

/// Spawn the warm-up and the daily refresh loop.
pub fn start(refresher: Arc<Refresher>) {
    let warm_up = Arc::clone(&refresher);
    tokio::spawn(async move {
        if let Err(err) = warm_up.ensure_loaded().await {
            error!(
                error = %err,
                "Cache warm-up failed; the next scheduled refresh will retry"
            );
        } else {
            info!("Cache warm-up complete");
        }
    });

    tokio::spawn(async move {
        loop {
            let delay = delay_until_next_run(Utc::now());
            info!(in_secs = delay.as_secs(), "Next scheduled refresh");
            tokio::time::sleep(delay).await;

            match refresher.refresh().await {
                Ok(report) => {
                    info!(count = report.accepted, "Scheduled refresh complete");
                }
                Err(err) => error!(error = %err, "Scheduled refresh failed"),
            }
        }
    });

    info!("Scheduled jobs started: daily refresh at 02:00 SGT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_delay_before_run_time() {
        // 00:00 SGT is 16:00 UTC the previous day; two hours to go
        let delay = delay_until_next_run(utc("2024-06-14T16:00:00Z"));
        assert_eq!(delay, Duration::from_secs(2 * 3600));
    }

    #[test]
    fn test_delay_after_run_time_rolls_to_next_day() {
        // 03:00 SGT, the run for today has passed: 23 hours to go
        let delay = delay_until_next_run(utc("2024-06-14T19:00:00Z"));
        assert_eq!(delay, Duration::from_secs(23 * 3600));
    }

    #[test]
    fn test_delay_exactly_at_run_time_schedules_tomorrow() {
        let delay = delay_until_next_run(utc("2024-06-14T18:00:00Z"));
        assert_eq!(delay, Duration::from_secs(24 * 3600));
    }
}
