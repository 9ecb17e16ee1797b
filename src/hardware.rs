//! Best-effort description of the host.
//!
//! Every fact is read on its own. A fact that cannot be read is left out of
//! the description and never turns into an error.

use std::fmt;
use std::io;
use std::path::Path;

use tracing::{debug, trace, warn};

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";
pub const MEMINFO_PATH: &str = "/proc/meminfo";
pub const OS_RELEASE_PATH: &str = "/etc/os-release";
pub const OS_NAME_VAR: &str = "PRETTY_NAME";

/// Where host facts come from.
pub trait HostSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn env_var(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealHost;

impl HostSource for RealHost {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    pub cpu_model: Option<String>,
    pub cpu_cores: Option<String>,
    pub total_ram: Option<String>,
    pub os_version: Option<String>,
}

impl HardwareInfo {
    pub fn probe(host: &impl HostSource) -> Self {
        let cpuinfo = read_optional(host, CPUINFO_PATH);
        let meminfo = read_optional(host, MEMINFO_PATH);

        let info = Self {
            cpu_model: cpuinfo.as_deref().and_then(|s| find_field(s, "model name")),
            cpu_cores: cpuinfo.as_deref().and_then(|s| find_field(s, "cpu cores")),
            total_ram: meminfo.as_deref().and_then(mem_total),
            os_version: os_version(host),
        };

        trace!(?info);
        info
    }

    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    fn lines(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let facts = [
            ("CPU Model", &self.cpu_model),
            ("CPU Cores", &self.cpu_cores),
            ("Total RAM", &self.total_ram),
            ("OS Version", &self.os_version),
        ];
        IntoIterator::into_iter(facts).filter_map(|(label, value)| Some((label, value.as_deref()?)))
    }
}

impl fmt::Display for HardwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.lines() {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

/// Renders whatever facts `host` provides, one `Label: value` line each.
pub fn describe(host: &impl HostSource) -> String {
    HardwareInfo::probe(host).to_string()
}

/// Physical memory of the host in KiB, from `sysconf`. Zero if unknown.
pub fn total_memory_kb() -> u64 {
    let query = |name: libc::c_int, var: &str| {
        let ret = unsafe { libc::sysconf(name) };
        if ret > 0 {
            Some(ret as u64)
        } else {
            let err = io::Error::last_os_error();
            warn!(?var, %err, "sysconf failed");
            None
        }
    };

    let pages = query(libc::_SC_PHYS_PAGES, "_SC_PHYS_PAGES");
    let page_size = query(libc::_SC_PAGESIZE, "_SC_PAGESIZE");

    match (pages, page_size) {
        (Some(pages), Some(page_size)) => pages.saturating_mul(page_size) / 1024,
        _ => {
            warn!("physical memory size is unavailable");
            0
        }
    }
}

fn read_optional(host: &impl HostSource, path: &str) -> Option<String> {
    match host.read_to_string(Path::new(path)) {
        Ok(content) => Some(content),
        Err(err) => {
            debug!(?path, %err, "failed to read host file");
            None
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

/// First `key : value` entry of a `/proc/cpuinfo` style file.
fn find_field(content: &str, key: &str) -> Option<String> {
    let value = content.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        if k.trim() == key {
            non_empty(v)
        } else {
            None
        }
    });
    if value.is_none() {
        debug!(?key, "field not found");
    }
    value
}

fn mem_total(meminfo: &str) -> Option<String> {
    let kb: u64 = find_field(meminfo, "MemTotal")?
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(format!("{} kB", kb))
}

fn os_version(host: &impl HostSource) -> Option<String> {
    if let Some(name) = host.env_var(OS_NAME_VAR).as_deref().and_then(non_empty) {
        return Some(name);
    }

    let content = read_optional(host, OS_RELEASE_PATH)?;
    let name = content.lines().find_map(|line| {
        let value = line.strip_prefix("PRETTY_NAME=")?;
        non_empty(value.trim().trim_matches(|c: char| c == '"' || c == '\''))
    });
    if name.is_none() {
        debug!("os name not found");
    }
    name
}
