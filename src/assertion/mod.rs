//! Debug-only assertion with call-site context.
//!
//! [`debug_check!`](crate::debug_check) is the development-time counterpart
//! of a hard invariant: in debug builds a failed check prints the source
//! file, line and a formatted message to stderr, then terminates the
//! process. In release builds the macro expands to nothing at all; the
//! condition and the message arguments are never evaluated.

/// Check an invariant in debug builds only.
///
/// When the condition is false, prints the call-site file and line together
/// with a `format!`-style message to stderr and exits the process with a
/// failure status. The condition is evaluated exactly once.
///
/// ```
/// use cuda_bench_utils::debug_check;
///
/// let samples = vec![1.0f64, 2.0];
/// debug_check!(!samples.is_empty(), "need samples, got {}", samples.len());
/// ```
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_check {
    ($cond:expr, $($msg:tt)+) => {{
        if !($cond) {
            eprintln!(
                "Assertion failed in file: {} at line: {} with debug message: {}",
                file!(),
                line!(),
                format_args!($($msg)+)
            );
            ::std::process::exit(-1);
        }
    }};
}

/// Check an invariant in debug builds only.
///
/// Release-build form: expands to nothing, so neither the condition nor the
/// message arguments are evaluated.
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_check {
    ($cond:expr, $($msg:tt)+) => {};
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::process::Command;

    const TRIP_ENV: &str = "CUDA_BENCH_UTILS_TRIP_CHECK";

    #[cfg(debug_assertions)]
    #[test]
    fn condition_evaluated_exactly_once() {
        let mut evaluations = 0;
        debug_check!(
            {
                evaluations += 1;
                evaluations == 1
            },
            "tripped unexpectedly"
        );
        assert_eq!(evaluations, 1);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    #[allow(unused_mut)]
    fn release_build_never_evaluates_condition() {
        let mut evaluations = 0;
        debug_check!(
            {
                evaluations += 1;
                false
            },
            "never printed"
        );
        assert_eq!(evaluations, 0);
    }

    // Re-runs this test binary with TRIP_ENV set so the failing check runs
    // in a child process whose exit status and stderr can be inspected.
    #[test]
    fn failing_check_exits_with_context() {
        if env::var_os(TRIP_ENV).is_some() {
            debug_check!(1 + 1 == 3, "arithmetic broke: {}", 42);
            return;
        }

        let test_name = format!(
            "{}::failing_check_exits_with_context",
            module_path!()
                .split_once("::")
                .map(|(_, rest)| rest)
                .unwrap_or("tests")
        );
        let exe = env::current_exe().expect("test binary path");
        let output = Command::new(exe)
            .args([test_name.as_str(), "--exact", "--nocapture"])
            .env(TRIP_ENV, "1")
            .output()
            .expect("failed to re-run test binary");

        if cfg!(debug_assertions) {
            assert!(!output.status.success());
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("Assertion failed in file:"));
            assert!(stderr.contains(file!()));
            assert!(stderr.contains("at line:"));
            assert!(stderr.contains("arithmetic broke: 42"));
        } else {
            // the check compiles away, so the child test just passes
            assert!(output.status.success());
        }
    }
}
