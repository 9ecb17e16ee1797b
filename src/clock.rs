use std::time::Instant;

use chrono::{DateTime, Local};

/// The two time sources a run needs.
///
/// `monotonic` measures the child's lifetime and must never go backwards.
/// `calendar` only stamps the report.
pub trait Clock {
    fn monotonic(&self) -> Instant;
    fn calendar(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn monotonic(&self) -> Instant {
        Instant::now()
    }

    fn calendar(&self) -> DateTime<Local> {
        Local::now()
    }
}
