//! Formatted device report and the CSV-style masterlog summary line.

use crate::device::DeviceProperties;

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Print the labeled property report for one device to stdout.
pub fn print_device_report(index: u32, props: &DeviceProperties) {
    println!("\nDevice {}: \"{}\"", index, props.name);
    println!(
        "  CUDA Driver Version / API Version:             {}.{} / {}.{}",
        props.driver_version.0, props.driver_version.1, props.api_version.0, props.api_version.1
    );
    println!(
        "  CUDA Capability Major/Minor version number:    {}.{}",
        props.compute_major, props.compute_minor
    );
    println!(
        "  Total amount of global memory:                 {:.0} MBytes ({} bytes)",
        props.total_global_mem as f64 / 1048576.0,
        props.total_global_mem
    );
    let cores_per_sm = props.cores_per_multiprocessor();
    println!(
        "  ({:2}) Multiprocessors, ({:3}) CUDA Cores/MP:     {} CUDA Cores",
        props.multiprocessor_count,
        cores_per_sm,
        cores_per_sm * props.multiprocessor_count
    );
    println!(
        "  GPU Max Clock rate:                            {:.0} MHz ({:.2} GHz)",
        props.clock_rate_khz as f64 * 1e-3,
        props.clock_rate_khz as f64 * 1e-6
    );
    println!(
        "  Memory Clock rate:                             {:.0} MHz",
        props.memory_clock_rate_khz as f64 * 1e-3
    );
    println!(
        "  Memory Bus Width:                              {}-bit",
        props.memory_bus_width_bits
    );
    if props.l2_cache_size > 0 {
        println!(
            "  L2 Cache Size:                                 {} bytes",
            props.l2_cache_size
        );
    }
    println!(
        "  Maximum Texture Dimension Size (x,y,z):        1D=({}), 2D=({}, {}), 3D=({}, {}, {})",
        props.max_texture_1d,
        props.max_texture_2d.0,
        props.max_texture_2d.1,
        props.max_texture_3d.0,
        props.max_texture_3d.1,
        props.max_texture_3d.2
    );
    println!(
        "  Maximum Layered 1D Texture Size, (num) layers: 1D=({}), {} layers",
        props.max_texture_1d_layered.0, props.max_texture_1d_layered.1
    );
    println!(
        "  Maximum Layered 2D Texture Size, (num) layers: 2D=({}, {}), {} layers",
        props.max_texture_2d_layered.0,
        props.max_texture_2d_layered.1,
        props.max_texture_2d_layered.2
    );
    println!(
        "  Total amount of constant memory:               {} bytes",
        props.total_const_mem
    );
    println!(
        "  Total amount of shared memory per block:       {} bytes",
        props.shared_mem_per_block
    );
    println!(
        "  Total number of registers available per block: {}",
        props.regs_per_block
    );
    println!(
        "  Warp size:                                     {}",
        props.warp_size
    );
    println!(
        "  Maximum number of threads per multiprocessor:  {}",
        props.max_threads_per_multiprocessor
    );
    println!(
        "  Maximum number of threads per block:           {}",
        props.max_threads_per_block
    );
    println!(
        "  Max dimension size of a thread block (x,y,z):  ({}, {}, {})",
        props.max_block_dim.0, props.max_block_dim.1, props.max_block_dim.2
    );
    println!(
        "  Max dimension size of a grid size    (x,y,z):  ({}, {}, {})",
        props.max_grid_dim.0, props.max_grid_dim.1, props.max_grid_dim.2
    );
    println!(
        "  Maximum memory pitch:                          {} bytes",
        props.max_pitch
    );
    println!(
        "  Texture alignment:                             {} bytes",
        props.texture_alignment
    );
    println!(
        "  Concurrent kernel execution:                   {} with {} copy engine(s)",
        yes_no(props.concurrent_kernels),
        props.async_engine_count
    );
    println!(
        "  Run time limit on kernels:                     {}",
        yes_no(props.kernel_exec_timeout)
    );
    println!(
        "  Integrated GPU sharing Host Memory:            {}",
        yes_no(props.integrated)
    );
    println!(
        "  Support host page-locked memory mapping:       {}",
        yes_no(props.can_map_host_memory)
    );
    println!(
        "  Alignment requirement for Surfaces:            {}",
        yes_no(props.surface_alignment > 0)
    );
    println!(
        "  Device has ECC support:                        {}",
        if props.ecc_enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    #[cfg(windows)]
    println!(
        "  CUDA Device Driver Mode (TCC or WDDM):         {}",
        if props.tcc_driver {
            "TCC (Tesla Compute Cluster Driver)"
        } else {
            "WDDM (Windows Display Driver Model)"
        }
    );
    println!(
        "  Device supports Unified Addressing (UVA):      {}",
        yes_no(props.unified_addressing)
    );
    println!(
        "  Device PCI Domain ID / Bus ID / location ID:   {} / {} / {}",
        props.pci_domain_id, props.pci_bus_id, props.pci_device_id
    );
    println!("  Compute Mode:");
    println!("     < {} >", props.compute_mode.description());
}

/// One-line masterlog summary: tool name, driver version, API version and
/// device name, comma-separated.
pub fn csv_summary(index: u32, props: &DeviceProperties) -> String {
    format!(
        "deviceQuery, CUDA Driver = CUDART, CUDA Driver Version = {}.{}, CUDA API Version = {}.{}, Device{} = {}",
        props.driver_version.0,
        props.driver_version.1,
        props.api_version.0,
        props.api_version.1,
        index,
        props.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ComputeMode;

    fn sample_props() -> DeviceProperties {
        DeviceProperties {
            name: "Tesla K20c".to_string(),
            driver_version: (11, 4),
            api_version: (11, 2),
            compute_major: 3,
            compute_minor: 5,
            multiprocessor_count: 13,
            compute_mode: ComputeMode::Default,
            ..Default::default()
        }
    }

    #[test]
    fn csv_summary_lists_versions_then_name() {
        let line = csv_summary(0, &sample_props());
        assert_eq!(
            line,
            "deviceQuery, CUDA Driver = CUDART, CUDA Driver Version = 11.4, \
             CUDA API Version = 11.2, Device0 = Tesla K20c"
        );

        let driver = line.find("CUDA Driver Version").unwrap();
        let api = line.find("CUDA API Version").unwrap();
        let name = line.find("Tesla K20c").unwrap();
        assert!(driver < api && api < name);
    }

    #[test]
    fn report_prints_without_panicking() {
        print_device_report(0, &sample_props());
        print_device_report(1, &DeviceProperties::default());
    }
}
