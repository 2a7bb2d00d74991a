//! Device property snapshots.
//!
//! [`DeviceProperties`] is a read-only record of one device's capabilities,
//! fetched per call and never cached. The actual driver queries live in the
//! `query` submodule and are only compiled with the `cuda` feature;
//! everything else in this module is plain host data.

pub mod sm_cores;

#[cfg(feature = "cuda")]
pub mod query;

use serde::Serialize;

/// Policy controlling how many host threads/processes may use a device
/// concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ComputeMode {
    /// Multiple host threads can use the device simultaneously.
    #[default]
    Default,
    /// Only one host thread in one process can use the device.
    Exclusive,
    /// No host thread can use the device.
    Prohibited,
    /// Many threads in one process can use the device.
    ExclusiveProcess,
    /// The driver reported a mode this build does not know about.
    Unknown,
}

impl ComputeMode {
    /// Map the raw `ComputeMode` device attribute to the enumerator.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => ComputeMode::Default,
            1 => ComputeMode::Exclusive,
            2 => ComputeMode::Prohibited,
            3 => ComputeMode::ExclusiveProcess,
            _ => ComputeMode::Unknown,
        }
    }

    /// Descriptive string used by the device report.
    pub fn description(&self) -> &'static str {
        match self {
            ComputeMode::Default => {
                "Default (multiple host threads can use the device simultaneously)"
            }
            ComputeMode::Exclusive => {
                "Exclusive (only one host thread in one process can use the device)"
            }
            ComputeMode::Prohibited => "Prohibited (no host thread can use the device)",
            ComputeMode::ExclusiveProcess => {
                "Exclusive Process (many threads in one process can use the device)"
            }
            ComputeMode::Unknown => "Unknown",
        }
    }
}

/// Capability snapshot for a single device ordinal.
///
/// Created transiently by `query::query_device_properties` and consumed by
/// the report printer; serializable for the `--json` output mode.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DeviceProperties {
    pub name: String,
    /// Latest CUDA version supported by the installed driver, as (major, minor).
    pub driver_version: (i32, i32),
    /// API version of the context the snapshot was taken under.
    pub api_version: (i32, i32),
    pub compute_major: i32,
    pub compute_minor: i32,
    /// Total global memory in bytes.
    pub total_global_mem: usize,
    pub multiprocessor_count: i32,
    /// Peak GPU clock in kHz.
    pub clock_rate_khz: i32,
    /// Peak memory clock in kHz.
    pub memory_clock_rate_khz: i32,
    pub memory_bus_width_bits: i32,
    pub l2_cache_size: i32,
    pub max_texture_1d: i32,
    pub max_texture_2d: (i32, i32),
    pub max_texture_3d: (i32, i32, i32),
    /// (width, layers)
    pub max_texture_1d_layered: (i32, i32),
    /// (width, height, layers)
    pub max_texture_2d_layered: (i32, i32, i32),
    pub total_const_mem: i32,
    pub shared_mem_per_block: i32,
    pub regs_per_block: i32,
    pub warp_size: i32,
    pub max_threads_per_multiprocessor: i32,
    pub max_threads_per_block: i32,
    pub max_block_dim: (i32, i32, i32),
    pub max_grid_dim: (i32, i32, i32),
    pub max_pitch: i32,
    pub texture_alignment: i32,
    pub concurrent_kernels: bool,
    pub async_engine_count: i32,
    pub kernel_exec_timeout: bool,
    pub integrated: bool,
    pub can_map_host_memory: bool,
    pub surface_alignment: i32,
    pub ecc_enabled: bool,
    pub tcc_driver: bool,
    pub unified_addressing: bool,
    pub pci_domain_id: i32,
    pub pci_bus_id: i32,
    pub pci_device_id: i32,
    pub compute_mode: ComputeMode,
}

impl DeviceProperties {
    /// Cores per multiprocessor for this device's compute capability.
    pub fn cores_per_multiprocessor(&self) -> i32 {
        sm_cores::cores_per_multiprocessor(self.compute_major, self.compute_minor)
    }

    /// Total core count across all multiprocessors.
    pub fn total_cores(&self) -> i32 {
        self.cores_per_multiprocessor() * self.multiprocessor_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_mode_mapping() {
        assert_eq!(ComputeMode::from_raw(0), ComputeMode::Default);
        assert_eq!(ComputeMode::from_raw(1), ComputeMode::Exclusive);
        assert_eq!(ComputeMode::from_raw(2), ComputeMode::Prohibited);
        assert_eq!(ComputeMode::from_raw(3), ComputeMode::ExclusiveProcess);
        assert_eq!(ComputeMode::from_raw(4), ComputeMode::Unknown);
        assert_eq!(ComputeMode::from_raw(-1), ComputeMode::Unknown);
    }

    #[test]
    fn total_cores_derive_from_table() {
        let props = DeviceProperties {
            compute_major: 3,
            compute_minor: 5,
            multiprocessor_count: 13,
            ..Default::default()
        };
        assert_eq!(props.cores_per_multiprocessor(), 192);
        assert_eq!(props.total_cores(), 192 * 13);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let props = DeviceProperties {
            name: "GeForce GTX 780".to_string(),
            compute_mode: ComputeMode::ExclusiveProcess,
            ..Default::default()
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"GeForce GTX 780\""));
        assert!(json.contains("ExclusiveProcess"));
    }
}
