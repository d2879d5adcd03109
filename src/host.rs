//! Host fact queries (hostname, OS, architecture, CPU count).
//!
//! Queries go through the [`HostInfoProvider`] trait so tests can substitute
//! deterministic values instead of depending on the machine they run on.

use serde::Serialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Sentinel for host facts the OS would not reveal.
pub const UNKNOWN: &str = "unknown";

/// Read-only attributes of the machine and runtime the service runs on.
///
/// Every field is always populated; a failed lookup degrades to
/// [`UNKNOWN`] (or 1 for `cpu_count`) instead of aborting the response.
#[derive(Debug, Clone, Serialize)]
pub struct HostInfo {
    /// Machine hostname.
    pub hostname: String,
    /// Operating system name, e.g. "Ubuntu".
    pub platform: String,
    /// Operating system version string.
    pub platform_version: String,
    /// CPU architecture, e.g. "x86_64".
    pub architecture: String,
    /// Logical CPU count.
    pub cpu_count: usize,
    /// Version of the Rust toolchain that built the service.
    pub rust_version: String,
}

/// Source of host facts, swappable for testing.
pub trait HostInfoProvider: Send + Sync {
    /// Snapshot the host facts.
    fn host_info(&self) -> HostInfo;
}

/// Real provider backed by the `sysinfo` crate.
#[derive(Debug, Clone, Default)]
pub struct SysinfoProvider;

impl HostInfoProvider for SysinfoProvider {
    fn host_info(&self) -> HostInfo {
        // Only the CPU list is needed; skip memory/process refreshes.
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        let cpu_count = match system.cpus().len() {
            0 => 1,
            n => n,
        };

        // cpu_arch returns an owned String; empty means the lookup failed.
        let architecture = match System::cpu_arch() {
            arch if arch.is_empty() => UNKNOWN.to_string(),
            arch => arch,
        };

        HostInfo {
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            platform: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            platform_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            architecture,
            cpu_count,
            rust_version: env!("SERVICE_RUST_VERSION").to_string(),
        }
    }
}

// A fixed `HostInfo` is itself a provider, which is all tests need.
impl HostInfoProvider for HostInfo {
    fn host_info(&self) -> HostInfo {
        self.clone()
    }
}

impl HostInfo {
    /// Fixed host facts for tests.
    pub fn fixture() -> Self {
        Self {
            hostname: "test-host".to_string(),
            platform: "TestOS".to_string(),
            platform_version: "1.0".to_string(),
            architecture: "x86_64".to_string(),
            cpu_count: 4,
            rust_version: env!("SERVICE_RUST_VERSION").to_string(),
        }
    }
}
