//! Host hardware summary (CPU count, frequency, memory).

use serde::Serialize;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, System};

/// Bytes per gibibyte.
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Hardware summary reported by `GET /api/system-info`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub cpu_count: usize,
    pub cpu_freq: Option<CpuFrequency>,
    pub memory: MemorySummary,
    pub platform: PlatformSummary,
}

/// CPU frequency in MHz across logical cores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuFrequency {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// Memory totals in GB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemorySummary {
    pub total: f64,
    pub available: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub platform: &'static str,
    pub family: &'static str,
    pub arch: &'static str,
}

impl SystemInfo {
    /// Probe the running host. Blocking; call from `spawn_blocking`.
    pub fn probe() -> Self {
        let mut system = System::new();
        system.refresh_cpu_specifics(CpuRefreshKind::everything());
        system.refresh_memory_specifics(MemoryRefreshKind::everything());

        let frequencies: Vec<u64> = system.cpus().iter().map(sysinfo::Cpu::frequency).collect();

        let cpu_count = match system.cpus().len() {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        };

        Self {
            cpu_count,
            cpu_freq: summarize_frequencies(&frequencies),
            memory: MemorySummary {
                total: bytes_to_gb(system.total_memory()),
                available: bytes_to_gb(system.available_memory()),
            },
            platform: PlatformSummary {
                platform: std::env::consts::OS,
                family: std::env::consts::FAMILY,
                arch: std::env::consts::ARCH,
            },
        }
    }
}

/// Reduce per-core frequencies (MHz) to mean / min / max.
///
/// Cores reporting 0 are ignored; `None` when no core reports a frequency
/// (common inside VMs and containers).
pub fn summarize_frequencies(per_core_mhz: &[u64]) -> Option<CpuFrequency> {
    let known: Vec<f64> = per_core_mhz
        .iter()
        .filter(|&&mhz| mhz > 0)
        .map(|&mhz| mhz as f64)
        .collect();
    if known.is_empty() {
        return None;
    }

    Some(CpuFrequency {
        current: known.iter().sum::<f64>() / known.len() as f64,
        min: known.iter().copied().fold(f64::INFINITY, f64::min),
        max: known.iter().copied().fold(0.0, f64::max),
    })
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_reduce_to_mean_min_max() {
        let freq = summarize_frequencies(&[2000, 3000, 4000]).unwrap();
        assert_eq!(freq.current, 3000.0);
        assert_eq!(freq.min, 2000.0);
        assert_eq!(freq.max, 4000.0);
    }

    #[test]
    fn unreported_cores_are_ignored() {
        let freq = summarize_frequencies(&[0, 2400, 0]).unwrap();
        assert_eq!(freq.current, 2400.0);
        assert_eq!(freq.min, 2400.0);
        assert!(summarize_frequencies(&[0, 0]).is_none());
        assert!(summarize_frequencies(&[]).is_none());
    }

    #[test]
    fn converts_bytes_to_gb() {
        assert_eq!(bytes_to_gb(16 * 1024 * 1024 * 1024), 16.0);
        assert_eq!(bytes_to_gb(0), 0.0);
    }

    #[test]
    fn probe_reports_host_memory() {
        let info = SystemInfo::probe();
        assert!(info.cpu_count >= 1);
        assert!(info.memory.total > 0.0);
        assert!(info.memory.available <= info.memory.total);
        assert!(!info.platform.platform.is_empty());
    }
}
