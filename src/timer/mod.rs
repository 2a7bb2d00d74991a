//! High-resolution benchmark timer built on the platform performance counter.
//!
//! Tick sources:
//! - **Windows**: `QueryPerformanceCounter`, with the frequency reported by
//!   `QueryPerformanceFrequency`
//! - **Unix**: `clock_gettime(CLOCK_MONOTONIC)` in nanosecond ticks
//!
//! Both counters are free-running and immune to wall-clock adjustments.

use colored::Colorize;

#[cfg(windows)]
mod ticks {
    use windows_sys::Win32::System::Performance::{
        QueryPerformanceCounter, QueryPerformanceFrequency,
    };

    /// Counter ticks per second. Fixed at boot.
    pub fn frequency() -> i64 {
        let mut freq = 0i64;
        // Cannot fail on Windows XP or later.
        unsafe { QueryPerformanceFrequency(&mut freq) };
        freq
    }

    pub fn now() -> i64 {
        let mut count = 0i64;
        unsafe { QueryPerformanceCounter(&mut count) };
        count
    }
}

#[cfg(unix)]
mod ticks {
    use std::mem;

    /// CLOCK_MONOTONIC ticks are nanoseconds.
    pub fn frequency() -> i64 {
        1_000_000_000
    }

    pub fn now() -> i64 {
        let mut ts: libc::timespec = unsafe { mem::zeroed() };
        unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        ts.tv_sec as i64 * 1_000_000_000 + ts.tv_nsec as i64
    }
}

/// Single start/stop measurement against the platform performance counter.
///
/// The counter frequency is captured once at construction and reused for
/// every measurement made with the same instance. Not synchronized; one
/// instance belongs to one thread.
#[derive(Debug, Clone)]
pub struct BenchmarkTimer {
    frequency: f64,
    start_ticks: i64,
    end_ticks: i64,
    started: bool,
}

impl BenchmarkTimer {
    pub fn new() -> Self {
        Self {
            frequency: ticks::frequency() as f64,
            start_ticks: 0,
            end_ticks: 0,
            started: false,
        }
    }

    /// Record the start instant. Calling `start` again before [`end`](Self::end)
    /// simply overwrites the previous start; only the most recent one is used.
    pub fn start(&mut self) {
        self.started = true;
        self.start_ticks = ticks::now();
    }

    /// Record the end instant of a measurement begun with [`start`](Self::start).
    ///
    /// Without a matching `start` this logs a diagnostic and leaves the
    /// elapsed-time state untouched.
    pub fn end(&mut self) {
        if !self.started {
            eprintln!(
                "{} timer not started, end() ignored",
                "Warning:".bold().yellow()
            );
            return;
        }
        self.started = false;
        self.end_ticks = ticks::now();
    }

    /// Elapsed time between the recorded start and end instants, in
    /// milliseconds. Computed in floating point, so sub-millisecond
    /// precision is preserved.
    pub fn elapsed_milliseconds(&self) -> f64 {
        1000.0 * (self.end_ticks - self.start_ticks) as f64 / self.frequency
    }
}

impl Default for BenchmarkTimer {
    fn default() -> Self {
        Self::new()
    }
}
