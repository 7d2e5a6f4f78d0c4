//! System Metadata Collection
//!
//! CPU model detection reads `/proc/cpuinfo` and degrades to "Unknown" on
//! other platforms.

use super::execution::ExecutionConfig;
use chrono::Utc;
use lapbench_report::{ReportMeta, SuiteInfo, SystemInfo};

/// Version of the JSON report layout
pub const SCHEMA_VERSION: u32 = 1;

/// Build report metadata for a run of `suite` under `config`
pub fn build_report_meta(suite: SuiteInfo, config: &ExecutionConfig) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        suite,
        timestamp: Utc::now(),
        laps: config.laps,
        clock: config.clock.as_str().to_string(),
        system,
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}
