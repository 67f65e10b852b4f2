//! Process resource usage probes (CPU time, resident memory).
//!
//! Both readings are process-wide: runs executing concurrently in the same
//! process see each other's CPU time and allocations.

use std::time::Duration;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A point-in-time reading of process resource usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSnapshot {
    /// CPU time consumed by all threads of the process so far.
    pub cpu_time: Duration,
    /// Current resident set size of the process, in bytes.
    pub resident_bytes: u64,
}

impl UsageSnapshot {
    /// Take a snapshot of the current process.
    pub fn capture() -> Self {
        Self {
            cpu_time: process_cpu_time(),
            resident_bytes: resident_bytes(),
        }
    }
}

/// CPU time consumed by the current process across all threads.
pub fn process_cpu_time() -> Duration {
    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut ts = MaybeUninit::<libc::timespec>::uninit();
        // Safety: clock_gettime only writes into the provided timespec.
        let ret = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, ts.as_mut_ptr()) };
        if ret == 0 {
            let ts = unsafe { ts.assume_init() };
            return Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32);
        }
    }

    Duration::ZERO
}

/// Current resident set size of this process in bytes; zero when the
/// platform does not expose it.
pub fn resident_bytes() -> u64 {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return 0;
    };

    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    system.process(pid).map(sysinfo::Process::memory).unwrap_or(0)
}
