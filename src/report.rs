use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};

/// `ctime(3)` layout, without the trailing newline.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub target_name: String,
    pub timestamp: DateTime<Local>,
    pub hardware_info: String,
    pub elapsed_seconds: f64,
    pub cpu_seconds: f64,
    pub peak_memory_kb: u64,         // KiB
    pub total_system_memory_kb: u64, // KiB
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Target Program Name: {}", self.target_name)?;
        writeln!(f, "Current Date: {}", self.timestamp.format(CTIME_FORMAT))?;
        writeln!(f, "Hardware Information")?;
        f.write_str(&self.hardware_info)?;
        writeln!(f, "Elapsed Time (seconds): {:.6}", self.elapsed_seconds)?;
        writeln!(f, "RAM Usage (KB): {}", self.peak_memory_kb)?;
        writeln!(f, "CPU Usage (seconds): {:.6}", self.cpu_seconds)?;
        writeln!(f, "Memory Usage (KB): {}", self.total_system_memory_kb)?;
        Ok(())
    }
}

impl PerformanceReport {
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }

    /// Writes the report to `path`, truncating any previous content.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)
    }
}
