use std::time::Instant;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

/// Wall-clock and monotonic time as seen by the controller.
pub trait Clock {
    type Tz: TimeZone;

    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Self::Tz>;

    /// Monotonic time used for tick pacing and animation phases.
    fn instant(&self) -> Instant;
}

/// The real clock in the user's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// The next `hour:00:00` strictly after `now`: today's if still ahead, else tomorrow's.
///
/// Returns `None` for an hour outside `0..24`.
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    if let Some(target) = at_hour(&tz, today, hour) {
        if target > *now {
            return Some(target);
        }
    }
    at_hour(&tz, today.succ_opt()?, hour)
}

fn at_hour<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        // Skipped by a DST jump; the wall clock reads the next hour instead.
        tz.from_local_datetime(&(naive + Duration::hours(1))).earliest()
    })
}
