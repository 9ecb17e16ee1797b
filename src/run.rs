use crate::clock::{Clock, SystemClock};
use crate::error::RunError;
use crate::hardware::{self, HostSource, RealHost};
use crate::proc::{spawn_child, wait_child};
use crate::report::PerformanceReport;
use crate::ProfileConfig;

use std::io::{self, Write};

use tracing::trace;

/// Runs the target once, prints the report to stdout and saves it to the output file.
pub fn run(config: &ProfileConfig) -> Result<PerformanceReport, RunError> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    run_with(config, &SystemClock, &RealHost, &mut stdout_lock)
}

#[tracing::instrument(level = "trace", err, skip(config, clock, host, out))]
pub fn run_with(
    config: &ProfileConfig,
    clock: &impl Clock,
    host: &impl HostSource,
    out: &mut impl Write,
) -> Result<PerformanceReport, RunError> {
    trace!(?config);

    let t0 = clock.monotonic();

    let child_pid = spawn_child(&config.target).map_err(|source| RunError::Launch {
        target: config.target.clone(),
        source,
    })?;
    trace!(?child_pid);

    let usage = wait_child(child_pid).map_err(|source| RunError::Wait { source })?;
    let real_duration = clock.monotonic().saturating_duration_since(t0);

    trace!(code = ?usage.code, signal = ?usage.signal, ?real_duration);
    trace!(?usage);

    let report = PerformanceReport {
        target_name: config.target.display().to_string(),
        timestamp: clock.calendar(),
        hardware_info: hardware::describe(host),
        elapsed_seconds: real_duration.as_secs_f64(),
        cpu_seconds: usage.cpu_time().as_secs_f64(),
        peak_memory_kb: usage.max_rss,
        total_system_memory_kb: hardware::total_memory_kb(),
    };

    // Both deliveries are attempted. A broken stdout never costs the file.
    let printed = report.write_to(out);
    let saved = report.save(&config.output);

    match (printed, saved) {
        (Ok(()), Ok(())) => Ok(report),
        (Err(err), Ok(())) => Err(RunError::Stdout(err)),
        (Ok(()), Err(source)) => Err(RunError::OutputWrite {
            path: config.output.clone(),
            source,
        }),
        (Err(stdout), Err(file)) => Err(RunError::Delivery {
            stdout,
            path: config.output.clone(),
            file,
        }),
    }
}
