#![deny(clippy::all)]

mod clock;
mod error;
mod hardware;
mod proc;
mod report;
mod run;

pub use crate::clock::{Clock, SystemClock};
pub use crate::error::RunError;
pub use crate::hardware::{describe, total_memory_kb, HardwareInfo, HostSource, RealHost};
pub use crate::report::{PerformanceReport, CTIME_FORMAT};
pub use crate::run::{run, run_with};

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "runprof", version, about)]
pub struct ProfileConfig {
    /// Program to run, launched without arguments
    #[clap(parse(from_os_str), value_name = "target-program-path")]
    pub target: PathBuf,

    /// File that receives a copy of the report
    #[clap(parse(from_os_str), value_name = "output-file-path")]
    pub output: PathBuf,
}

impl ProfileConfig {
    pub fn new(target: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            output: output.into(),
        }
    }
}
