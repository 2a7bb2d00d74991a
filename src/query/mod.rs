//! Orchestration for the device-query diagnostic.
//!
//! Settings come from `devicequery.json` when present, overridden by
//! command-line arguments; the report itself is produced by the
//! [`crate::device`] and [`crate::ui`] modules.

use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::Path;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Name of the optional settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "devicequery.json";

/// Settings for one diagnostic run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuerySettings {
    #[serde(rename = "DeviceIndex", default)]
    pub device_index: u32,
    #[serde(rename = "ShowHostInfo", default = "default_show_host_info")]
    pub show_host_info: bool,
    #[serde(rename = "JsonOutput", default)]
    pub json_output: bool,
}

fn default_show_host_info() -> bool {
    true
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            show_host_info: true,
            json_output: false,
        }
    }
}

impl QuerySettings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an
    /// error rather than a silent fallback.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }

    /// Apply command-line overrides on top of the file-provided values.
    ///
    /// A bare number selects the device index; flags toggle output modes.
    pub fn apply_args<I>(&mut self, args: I) -> io::Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        for arg in args {
            match arg.as_str() {
                "--json" => self.json_output = true,
                "--no-host-info" => self.show_host_info = false,
                other => {
                    self.device_index = other.parse().map_err(|_| {
                        Error::new(
                            ErrorKind::InvalidInput,
                            format!("unrecognized argument: {}", other),
                        )
                    })?;
                }
            }
        }
        Ok(())
    }
}

/// Run the device-query diagnostic: title block, host information, then the
/// property report (or JSON snapshot) for the selected device.
///
/// Any driver failure is fatal to the run and surfaces as the returned
/// error; there is no partial-result reporting.
pub fn run_device_query(settings: &QuerySettings) -> io::Result<()> {
    if !settings.json_output {
        let separator = "=".repeat(60);
        println!("\n{}", separator);
        println!("{:^60}", "CUDA Device Query (Driver API)".bold().cyan());
        println!("{}\n", separator);

        if settings.show_host_info {
            print_host_summary();
        }
    }

    query_and_report(settings)
}

#[cfg(feature = "cuda")]
fn query_and_report(settings: &QuerySettings) -> io::Result<()> {
    use crate::device::query;
    use crate::ui::report;

    let count = query::device_count().map_err(cuda_to_io)?;
    let props = query::query_device_properties(settings.device_index).map_err(cuda_to_io)?;

    if settings.json_output {
        println!("{}", serde_json::to_string_pretty(&props)?);
    } else {
        println!("Detected {} CUDA capable device(s)", count);
        report::print_device_report(settings.device_index, &props);
        println!("\n{}", report::csv_summary(settings.device_index, &props));
    }
    Ok(())
}

#[cfg(not(feature = "cuda"))]
fn query_and_report(_settings: &QuerySettings) -> io::Result<()> {
    Err(Error::new(
        ErrorKind::Unsupported,
        "built without CUDA support, rebuild with --features cuda",
    ))
}

#[cfg(feature = "cuda")]
fn cuda_to_io(err: cust::error::CudaError) -> Error {
    Error::new(ErrorKind::Other, format!("CUDA driver error: {}", err))
}

fn print_host_summary() {
    println!("{}", "Host Information".bold().yellow());
    println!("━━━━━━━━━━━━━━━━");

    let info = os_info::get();
    println!("▸ OS:     {} {}", info.os_type(), info.version());
    println!("▸ CPU:    {}", cpu_brand());

    let mut sys = sysinfo::System::new();
    sys.refresh_memory();
    println!(
        "▸ Memory: {:.1} GB",
        sys.total_memory() as f64 / (1024.0 * 1024.0 * 1024.0)
    );
    println!();
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn cpu_brand() -> String {
    raw_cpuid::CpuId::new()
        .get_processor_brand_string()
        .map(|brand| brand.as_str().trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn cpu_brand() -> String {
    "Unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_missing() {
        let settings = QuerySettings::load(Path::new("no-such-settings-file.json")).unwrap();
        assert_eq!(settings.device_index, 0);
        assert!(settings.show_host_info);
        assert!(!settings.json_output);
    }

    #[test]
    fn parses_pascal_case_keys() {
        let settings: QuerySettings =
            serde_json::from_str(r#"{"DeviceIndex": 2, "JsonOutput": true}"#).unwrap();
        assert_eq!(settings.device_index, 2);
        assert!(settings.json_output);
        // absent key keeps its default
        assert!(settings.show_host_info);
    }

    #[test]
    fn rejects_negative_device_index() {
        let result = serde_json::from_str::<QuerySettings>(r#"{"DeviceIndex": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn args_override_settings() {
        let mut settings = QuerySettings::default();
        settings
            .apply_args(["1".to_string(), "--json".to_string()])
            .unwrap();
        assert_eq!(settings.device_index, 1);
        assert!(settings.json_output);

        settings.apply_args(["--no-host-info".to_string()]).unwrap();
        assert!(!settings.show_host_info);
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let mut settings = QuerySettings::default();
        let err = settings.apply_args(["--bogus".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
