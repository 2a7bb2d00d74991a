//! Developer utilities for CUDA benchmarking projects.
//!
//! Three independent helpers, each usable on its own:
//!
//! - [`timer::BenchmarkTimer`]: single start/stop measurements against the
//!   platform performance counter.
//! - [`debug_check!`]: debug-only assertion that compiles to nothing in
//!   release builds.
//! - [`query::run_device_query`]: prints a property report for one
//!   CUDA-capable device (requires the `cuda` feature).

pub mod assertion;
pub mod device;
pub mod query;
pub mod timer;
pub mod ui;

pub use query::run_device_query;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
