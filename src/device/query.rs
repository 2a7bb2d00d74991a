//! Driver-API queries behind a scoped context acquisition.
//!
//! Every entry point initializes the driver (repeat initialization is a
//! no-op for the driver) and holds the device's primary context only for
//! the duration of the call.

use cust::context::Context;
use cust::device::{Device, DeviceAttribute};
use cust::error::CudaResult;
use cust::{CudaApiVersion, CudaFlags};

use super::{ComputeMode, DeviceProperties};

/// Number of CUDA-capable devices visible to the driver.
pub fn device_count() -> CudaResult<u32> {
    cust::init(CudaFlags::empty())?;
    Device::num_devices()
}

/// Fetch the property snapshot for one device ordinal.
///
/// An out-of-range ordinal surfaces as the driver's own `InvalidDevice`
/// error. The device's primary context is retained around the attribute
/// reads and released before returning; callers must not assume any device
/// context persists after this call.
pub fn query_device_properties(index: u32) -> CudaResult<DeviceProperties> {
    cust::init(CudaFlags::empty())?;
    let device = Device::get_device(index)?;
    let ctx = Context::new(device)?;

    let driver = CudaApiVersion::get()?;
    let api = ctx.get_api_version()?;
    let attr = |attribute: DeviceAttribute| device.get_attribute(attribute);

    let props = DeviceProperties {
        name: device.name()?,
        driver_version: (driver.major(), driver.minor()),
        api_version: (api.major(), api.minor()),
        compute_major: attr(DeviceAttribute::ComputeCapabilityMajor)?,
        compute_minor: attr(DeviceAttribute::ComputeCapabilityMinor)?,
        total_global_mem: device.total_memory()?,
        multiprocessor_count: attr(DeviceAttribute::MultiprocessorCount)?,
        clock_rate_khz: attr(DeviceAttribute::ClockRate)?,
        memory_clock_rate_khz: attr(DeviceAttribute::MemoryClockRate)?,
        memory_bus_width_bits: attr(DeviceAttribute::GlobalMemoryBusWidth)?,
        l2_cache_size: attr(DeviceAttribute::L2CacheSize)?,
        max_texture_1d: attr(DeviceAttribute::MaximumTexture1DWidth)?,
        max_texture_2d: (
            attr(DeviceAttribute::MaximumTexture2DWidth)?,
            attr(DeviceAttribute::MaximumTexture2DHeight)?,
        ),
        max_texture_3d: (
            attr(DeviceAttribute::MaximumTexture3DWidth)?,
            attr(DeviceAttribute::MaximumTexture3DHeight)?,
            attr(DeviceAttribute::MaximumTexture3DDepth)?,
        ),
        max_texture_1d_layered: (
            attr(DeviceAttribute::MaximumTexture1DLayeredWidth)?,
            attr(DeviceAttribute::MaximumTexture1DLayeredLayers)?,
        ),
        max_texture_2d_layered: (
            attr(DeviceAttribute::MaximumTexture2DLayeredWidth)?,
            attr(DeviceAttribute::MaximumTexture2DLayeredHeight)?,
            attr(DeviceAttribute::MaximumTexture2DLayeredLayers)?,
        ),
        total_const_mem: attr(DeviceAttribute::TotalConstantMemory)?,
        shared_mem_per_block: attr(DeviceAttribute::MaxSharedMemoryPerBlock)?,
        regs_per_block: attr(DeviceAttribute::MaxRegistersPerBlock)?,
        warp_size: attr(DeviceAttribute::WarpSize)?,
        max_threads_per_multiprocessor: attr(DeviceAttribute::MaxThreadsPerMultiprocessor)?,
        max_threads_per_block: attr(DeviceAttribute::MaxThreadsPerBlock)?,
        max_block_dim: (
            attr(DeviceAttribute::MaxBlockDimX)?,
            attr(DeviceAttribute::MaxBlockDimY)?,
            attr(DeviceAttribute::MaxBlockDimZ)?,
        ),
        max_grid_dim: (
            attr(DeviceAttribute::MaxGridDimX)?,
            attr(DeviceAttribute::MaxGridDimY)?,
            attr(DeviceAttribute::MaxGridDimZ)?,
        ),
        max_pitch: attr(DeviceAttribute::MaxPitch)?,
        texture_alignment: attr(DeviceAttribute::TextureAlignment)?,
        concurrent_kernels: attr(DeviceAttribute::ConcurrentKernels)? != 0,
        async_engine_count: attr(DeviceAttribute::AsyncEngineCount)?,
        kernel_exec_timeout: attr(DeviceAttribute::KernelExecTimeout)? != 0,
        integrated: attr(DeviceAttribute::Integrated)? != 0,
        can_map_host_memory: attr(DeviceAttribute::CanMapHostMemory)? != 0,
        surface_alignment: attr(DeviceAttribute::SurfaceAlignment)?,
        ecc_enabled: attr(DeviceAttribute::EccEnabled)? != 0,
        tcc_driver: attr(DeviceAttribute::TccDriver)? != 0,
        unified_addressing: attr(DeviceAttribute::UnifiedAddressing)? != 0,
        pci_domain_id: attr(DeviceAttribute::PciDomainId)?,
        pci_bus_id: attr(DeviceAttribute::PciBusId)?,
        pci_device_id: attr(DeviceAttribute::PciDeviceId)?,
        compute_mode: ComputeMode::from_raw(attr(DeviceAttribute::ComputeMode)?),
    };

    // Releasing the primary context discards the device state tied to it.
    drop(ctx);
    Ok(props)
}
