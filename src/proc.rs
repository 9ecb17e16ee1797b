use std::os::unix::process::CommandExt;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use std::{io, mem};

use nix::errno::Errno;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;

#[derive(Debug)]
pub struct ChildUsage {
    pub code: Option<i32>,
    pub signal: Option<i32>,
    pub user_time: Duration,
    pub sys_time: Duration,
    pub max_rss: u64, // KiB
}

impl ChildUsage {
    pub fn cpu_time(&self) -> Duration {
        self.user_time + self.sys_time
    }
}

/// Launches `bin` with no arguments and the parent's stdio.
///
/// A bare file name refers to the working directory, the way `execv` sees it,
/// instead of being looked up in `PATH`.
pub fn spawn_child(bin: &Path) -> io::Result<Pid> {
    let exec_path: PathBuf = match bin.components().next() {
        Some(Component::Normal(_)) if bin.components().count() == 1 => Path::new(".").join(bin),
        _ => bin.to_owned(),
    };

    let child = Command::new(&exec_path)
        .arg0(bin)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    // `Child` neither waits nor kills on drop. The pid is reaped by `wait_child`.
    Ok(Pid::from_raw(child.id() as _))
}

/// Blocks until the child terminates and returns the usage the kernel
/// accounted to it at reap time.
pub fn wait_child(child_pid: Pid) -> io::Result<ChildUsage> {
    let mut status: libc::c_int = 0;
    let mut usage: libc::rusage = unsafe { mem::zeroed() };

    loop {
        let ret = unsafe { libc::wait4(child_pid.as_raw(), &mut status, 0, &mut usage) };
        match Errno::result(ret) {
            Ok(_) => break,
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(io::Error::from_raw_os_error(errno as i32)),
        }
    }

    let (code, signal) = match WaitStatus::from_raw(child_pid, status)? {
        WaitStatus::Exited(_, code) => (Some(code), None),
        WaitStatus::Signaled(_, signal, _) => (None, Some(signal as i32)),
        _ => (None, None),
    };

    Ok(ChildUsage {
        code,
        signal,
        user_time: timeval_to_duration(usage.ru_utime),
        sys_time: timeval_to_duration(usage.ru_stime),
        max_rss: usage.ru_maxrss.max(0) as u64,
    })
}

fn timeval_to_duration(tv: libc::timeval) -> Duration {
    Duration::new(tv.tv_sec.max(0) as u64, (tv.tv_usec.max(0) as u32) * 1000)
}
