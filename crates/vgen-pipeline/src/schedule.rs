//! Daily schedule mode.
//!
//! `--schedule` runs the pipeline every day at 03:00 local time.

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Hour of day (local time) for scheduled runs.
pub const RUN_HOUR: u32 = 3;

/// Next run time strictly after `now`.
pub fn next_run_at(now: NaiveDateTime) -> NaiveDateTime {
    let today_run = now.date().and_hms_opt(RUN_HOUR, 0, 0).expect("valid run time");
    if now < today_run {
        today_run
    } else {
        today_run + ChronoDuration::days(1)
    }
}

/// Delay from `now` until the next run.
pub fn delay_until_next_run(now: NaiveDateTime) -> Duration {
    (next_run_at(now) - now).to_std().unwrap_or_default()
}

/// Run `job` every day at the scheduled hour, forever.
pub async fn run_daily<F, Fut>(mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Local::now().naive_local();
        let next = next_run_at(now);
        let delay = delay_until_next_run(now);
        info!("Next scheduled run at {}", next);
        tokio::time::sleep(delay).await;
        job().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_next_run_before_run_hour() {
        let next = next_run_at(at(1, 30));
        assert_eq!(next, at(3, 0));
    }

    #[test]
    fn test_next_run_after_run_hour() {
        let next = next_run_at(at(12, 0));
        assert_eq!(
            next,
            NaiveDate::from_ymd_opt(2026, 8, 8)
                .unwrap()
                .and_hms_opt(3, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_next_run_exactly_at_run_hour() {
        // A run at exactly 03:00 schedules the next one for tomorrow
        let next = next_run_at(at(3, 0));
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 8, 8).unwrap());
    }

    #[test]
    fn test_delay_until_next_run() {
        let delay = delay_until_next_run(at(2, 0));
        assert_eq!(delay, Duration::from_secs(3600));
    }
}
